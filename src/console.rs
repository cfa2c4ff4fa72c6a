//! Raw console output.
//!
//! The host language's buffered text path mangles output when the console is
//! on a high code page, so console-bound text bypasses it: the buffer is
//! handed straight to the OS write primitive, with the console output code
//! page switched to UTF-8 for the duration when the text does not fit the
//! configured page. The prior code page is restored on every exit path.

use std::borrow::Cow;

use crate::codepage::{self, CP_UTF8};
use crate::common::ScopeGuard;
use crate::errors::{Error, Result};

/// Largest buffer handed to a single OS write call. The console write
/// primitive does not reliably deliver bigger buffers in one call.
pub const WRITE_CHUNK: usize = 0x4000;

/// The console operations the raw writer drives. The writer is generic over
/// this so the chunking and restore logic runs without a live console.
pub trait Console {
    type Handle: Copy;

    /// Current output code page.
    fn output_cp(&mut self) -> Result<u32>;

    /// Change the output code page.
    fn set_output_cp(&mut self, cp: u32) -> Result<()>;

    /// Write `buf` to `handle`, returning the byte count the OS confirmed.
    fn write(&mut self, handle: Self::Handle, buf: &[u8]) -> Result<usize>;
}

/// Write a canonical UTF-8 buffer straight to a console handle.
///
/// If the console is on a legacy code page and every character of `buf` fits
/// that page, the re-encoded bytes are written with the console untouched.
/// Otherwise the console is switched to UTF-8 first. Either way the pre-call
/// code page is back in place when this returns, success or failure.
pub fn write_console<C: Console>(
    api: &mut C,
    handle: C::Handle,
    buf: &[u8],
    limit: usize,
) -> Result<()> {
    let saved = api.output_cp()?;
    let mut data = Cow::Borrowed(buf);
    if saved != CP_UTF8 {
        match std::str::from_utf8(buf)
            .ok()
            .and_then(|text| codepage::encode_exact(saved, text))
        {
            Some(narrow) => data = Cow::Owned(narrow),
            None => api.set_output_cp(CP_UTF8)?,
        }
    }

    // From here on the saved code page must come back no matter how the
    // write goes. A failed restore cannot usefully propagate over the write
    // result, so it is only logged.
    let mut api = ScopeGuard::new(api, |api| {
        if api.output_cp().ok() != Some(saved) {
            if let Err(err) = api.set_output_cp(saved) {
                log::warn!("could not restore console code page {saved}: {err}");
            }
        }
    });

    let mut start = 0;
    while start < data.len() {
        let end = data.len().min(start + limit);
        let confirmed = api.write(handle, &data[start..end])?;
        // Advance by what the OS confirmed, not by the chunk size; partial
        // writes resume from the true cursor. Zero confirmed bytes would
        // spin forever, so it is surfaced as a failed write.
        if confirmed == 0 {
            return Err(Error::ConsoleWrite { code: 0 });
        }
        start += confirmed;
    }
    Ok(())
}

#[cfg(windows)]
pub use win32::Win32Console;

#[cfg(windows)]
mod win32 {
    use windows_sys::Win32::Foundation::{GetLastError, HANDLE, INVALID_HANDLE_VALUE};
    use windows_sys::Win32::Storage::FileSystem::WriteFile;
    use windows_sys::Win32::System::Console::{
        GetConsoleMode, GetConsoleOutputCP, GetStdHandle, SetConsoleOutputCP, STD_ERROR_HANDLE,
        STD_OUTPUT_HANDLE,
    };

    use crate::errors::{Error, Result};
    use crate::output::Stream;

    /// The live Win32 console.
    pub struct Win32Console;

    impl Win32Console {
        /// The standard handle for `stream`. Owned by the OS; never closed
        /// here.
        pub fn std_handle(stream: Stream) -> Result<HANDLE> {
            let id = match stream {
                Stream::Stdout => STD_OUTPUT_HANDLE,
                Stream::Stderr => STD_ERROR_HANDLE,
            };
            let handle = unsafe { GetStdHandle(id) };
            if handle.is_null() || handle == INVALID_HANDLE_VALUE {
                return Err(Error::ConsoleWrite {
                    code: unsafe { GetLastError() },
                });
            }
            Ok(handle)
        }

        /// True when `handle` is an interactive console rather than a
        /// redirected file or pipe.
        pub fn is_console(handle: HANDLE) -> bool {
            let mut mode = 0;
            unsafe { GetConsoleMode(handle, &mut mode) != 0 }
        }
    }

    impl super::Console for Win32Console {
        type Handle = HANDLE;

        fn output_cp(&mut self) -> Result<u32> {
            let cp = unsafe { GetConsoleOutputCP() };
            if cp == 0 {
                return Err(Error::CodePage {
                    code: unsafe { GetLastError() },
                });
            }
            Ok(cp)
        }

        fn set_output_cp(&mut self, cp: u32) -> Result<()> {
            if unsafe { SetConsoleOutputCP(cp) } == 0 {
                return Err(Error::CodePage {
                    code: unsafe { GetLastError() },
                });
            }
            Ok(())
        }

        fn write(&mut self, handle: HANDLE, buf: &[u8]) -> Result<usize> {
            let mut confirmed = 0;
            let ok = unsafe {
                WriteFile(
                    handle,
                    buf.as_ptr(),
                    buf.len() as u32,
                    &mut confirmed,
                    std::ptr::null_mut(),
                )
            };
            if ok == 0 {
                return Err(Error::ConsoleWrite {
                    code: unsafe { GetLastError() },
                });
            }
            Ok(confirmed as usize)
        }
    }
}

//! Routing user-visible text to the console or a redirected stream.

use crate::errors::Result;
use crate::locale;

/// Output target of the host's write hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

#[cfg(unix)]
impl Stream {
    fn fd(self) -> libc::c_int {
        match self {
            Stream::Stdout => libc::STDOUT_FILENO,
            Stream::Stderr => libc::STDERR_FILENO,
        }
    }
}

/// True when `stream` is attached to an interactive console or terminal
/// rather than redirected to a file or pipe.
pub fn console_attached(stream: Stream) -> bool {
    #[cfg(windows)]
    {
        match crate::console::Win32Console::std_handle(stream) {
            Ok(handle) => crate::console::Win32Console::is_console(handle),
            Err(_) => false,
        }
    }
    #[cfg(unix)]
    {
        (unsafe { libc::isatty(stream.fd()) }) == 1
    }
}

/// Write canonical `text` to an interactive `stream`.
///
/// On the console-API platform this takes the raw write path that juggles
/// the output code page; a terminal elsewhere simply takes locale-encoded
/// bytes on the descriptor.
pub fn write_console_text(stream: Stream, text: &str, limit: usize) -> Result<()> {
    #[cfg(windows)]
    {
        use crate::console::Win32Console;
        let handle = Win32Console::std_handle(stream)?;
        crate::console::write_console(&mut Win32Console, handle, text.as_bytes(), limit)
    }
    #[cfg(unix)]
    {
        let _ = limit;
        write_native(stream, text)
    }
}

/// Encode canonical `text` for the locale and write the bytes to the raw
/// descriptor, bypassing any buffered text layer.
pub fn write_native(stream: Stream, text: &str) -> Result<()> {
    let bytes = locale::encode_native(text)?;
    write_raw(stream, &bytes)
}

#[cfg(unix)]
fn write_raw(stream: Stream, bytes: &[u8]) -> Result<()> {
    let fd = stream.fd();
    let mut rest = bytes;
    while !rest.is_empty() {
        let n = unsafe { libc::write(fd, rest.as_ptr().cast(), rest.len()) };
        if n < 0 {
            let err = errno::errno();
            if err.0 == libc::EINTR {
                continue;
            }
            return Err(std::io::Error::from_raw_os_error(err.0).into());
        }
        if n == 0 {
            return Err(std::io::Error::from(std::io::ErrorKind::WriteZero).into());
        }
        rest = &rest[n as usize..];
    }
    Ok(())
}

#[cfg(windows)]
fn write_raw(stream: Stream, bytes: &[u8]) -> Result<()> {
    use std::io::Write;
    match stream {
        Stream::Stdout => std::io::stdout().lock().write_all(bytes)?,
        Stream::Stderr => std::io::stderr().lock().write_all(bytes)?,
    }
    Ok(())
}

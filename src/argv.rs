//! Recovering command-line arguments as canonical UTF-8.

use crate::decode::LocalDecoder;
use crate::errors::Result;

/// The command line after the program name, as canonical UTF-8 byte strings.
///
/// On the console-API platform the arguments are re-parsed from the wide
/// command line, so characters outside the ANSI code page survive; every
/// recovered string is marked canonical in the decoder's memo. Elsewhere the
/// OS argument bytes go through the idempotent locale decoder.
pub fn utf8_argv(decoder: &mut LocalDecoder) -> Result<Vec<Vec<u8>>> {
    native_argv(decoder)
}

#[cfg(windows)]
fn native_argv(decoder: &mut LocalDecoder) -> Result<Vec<Vec<u8>>> {
    use widestring::U16CStr;
    use windows_sys::Win32::Foundation::LocalFree;
    use windows_sys::Win32::System::Environment::GetCommandLineW;
    use windows_sys::Win32::UI::Shell::CommandLineToArgvW;

    use crate::common::ScopeGuard;
    use crate::errors::Error;

    let mut count = 0;
    let argv = unsafe { CommandLineToArgvW(GetCommandLineW(), &mut count) };
    if argv.is_null() {
        return Err(std::io::Error::last_os_error().into());
    }
    // The argv block is a single LocalAlloc allocation.
    let argv = ScopeGuard::new(argv, |argv| unsafe {
        LocalFree(argv.cast());
    });

    let mut args = Vec::new();
    for i in 1..count as usize {
        let arg = unsafe { U16CStr::from_ptr_str(*argv.add(i)) };
        let arg = arg.to_string().map_err(|_| Error::Encoding {
            context: "command line is not valid UTF-16",
        })?;
        decoder.mark_canonical(arg.as_bytes());
        args.push(arg.into_bytes());
    }
    Ok(args)
}

#[cfg(unix)]
fn native_argv(decoder: &mut LocalDecoder) -> Result<Vec<Vec<u8>>> {
    use std::os::unix::ffi::OsStrExt;

    std::env::args_os()
        .skip(1)
        .map(|arg| decoder.decode(arg.as_bytes()))
        .collect()
}

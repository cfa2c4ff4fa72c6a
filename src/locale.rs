//! The ambient locale encoding and conversions through it.

use encoding_rs::{Encoding, UTF_8};
use once_cell::sync::OnceCell;

use crate::errors::{Error, Result};

static NATIVE: OnceCell<&'static Encoding> = OnceCell::new();

/// The encoding the OS ambient locale expects for byte-oriented text.
/// Detected once per process.
pub fn native_encoding() -> &'static Encoding {
    NATIVE.get_or_init(detect)
}

#[cfg(windows)]
fn detect() -> &'static Encoding {
    let acp = unsafe { windows_sys::Win32::Globalization::GetACP() };
    crate::codepage::encoding_for(acp).unwrap_or(UTF_8)
}

#[cfg(unix)]
fn detect() -> &'static Encoding {
    for name in ["LC_ALL", "LC_CTYPE", "LANG"] {
        let Ok(value) = std::env::var(name) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        // The strongest set variable decides, even when it names no codeset
        // ("C", "POSIX").
        return codeset(&value)
            .and_then(|cs| Encoding::for_label(cs.as_bytes()))
            .unwrap_or(UTF_8);
    }
    UTF_8
}

/// The codeset part of a locale name: the "ISO-8859-2" of
/// "pl_PL.ISO-8859-2@euro".
pub fn codeset(locale: &str) -> Option<&str> {
    let (_, rest) = locale.split_once('.')?;
    Some(rest.split('@').next().unwrap_or(rest))
}

/// Decode native-locale bytes to canonical UTF-8 bytes. Malformed input is
/// an error, never silently replaced.
pub fn decode_native(s: &[u8]) -> Result<Vec<u8>> {
    let encoding = native_encoding();
    if encoding == UTF_8 {
        return match std::str::from_utf8(s) {
            Ok(_) => Ok(s.to_vec()),
            Err(_) => Err(Error::Encoding {
                context: "locale bytes are not valid UTF-8",
            }),
        };
    }
    let (text, had_errors) = encoding.decode_without_bom_handling(s);
    if had_errors {
        return Err(Error::Encoding {
            context: "byte string is not valid in the locale encoding",
        });
    }
    Ok(text.into_owned().into_bytes())
}

/// Encode canonical text into the native locale encoding. Characters the
/// locale cannot represent are an error, never silently replaced.
pub fn encode_native(text: &str) -> Result<Vec<u8>> {
    let encoding = native_encoding();
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return Err(Error::Encoding {
            context: "text is not representable in the locale encoding",
        });
    }
    Ok(bytes.into_owned())
}

/// Wrap a message-catalog lookup whose results are in the locale encoding,
/// so callers always see canonical UTF-8.
pub fn wrap_gettext<F>(lookup: F) -> impl Fn(&str) -> Result<Vec<u8>>
where
    F: Fn(&str) -> Vec<u8>,
{
    move |message| decode_native(&lookup(message))
}

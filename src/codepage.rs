//! Windows code page lookup, backed by encoding_rs.

use encoding_rs::Encoding;

use crate::errors::{Error, Result};

/// The UTF-8 code page identifier.
pub const CP_UTF8: u32 = 65001;

/// Resolve a Windows code page identifier to an encoding.
///
/// Covers the ANSI and DBCS pages consoles are commonly configured with.
/// Returns `None` for pages encoding_rs carries no table for (most OEM
/// pages); callers treat those as "cannot re-encode, switch to UTF-8".
pub fn encoding_for(cp: u32) -> Option<&'static Encoding> {
    let label = match cp {
        866 => "IBM866",
        874 => "windows-874",
        932 => "shift_jis",
        936 => "gbk",
        949 => "euc-kr",
        950 => "big5",
        1250 => "windows-1250",
        1251 => "windows-1251",
        1252 => "windows-1252",
        1253 => "windows-1253",
        1254 => "windows-1254",
        1255 => "windows-1255",
        1256 => "windows-1256",
        1257 => "windows-1257",
        1258 => "windows-1258",
        20866 => "koi8-r",
        21866 => "koi8-u",
        28591 => "iso-8859-1",
        28592 => "iso-8859-2",
        28593 => "iso-8859-3",
        28594 => "iso-8859-4",
        28595 => "iso-8859-5",
        28596 => "iso-8859-6",
        28597 => "iso-8859-7",
        28598 => "iso-8859-8",
        28603 => "iso-8859-13",
        28605 => "iso-8859-15",
        54936 => "gb18030",
        65001 => "utf-8",
        _ => return None,
    };
    Encoding::for_label(label.as_bytes())
}

/// Encode `text` into code page `cp`, but only if every character is
/// representable there. Anything lossy returns `None` rather than writing
/// substitutes.
pub fn encode_exact(cp: u32, text: &str) -> Option<Vec<u8>> {
    if cp == CP_UTF8 {
        return Some(text.as_bytes().to_vec());
    }
    let encoding = encoding_for(cp)?;
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return None;
    }
    Some(bytes.into_owned())
}

/// Strict decode of `bytes` from code page `cp`.
pub fn decode(cp: u32, bytes: &[u8]) -> Result<String> {
    if cp == CP_UTF8 {
        return String::from_utf8(bytes.to_vec()).map_err(|_| Error::Encoding {
            context: "byte string is not valid UTF-8",
        });
    }
    let encoding = encoding_for(cp).ok_or(Error::Encoding {
        context: "code page has no decoding table",
    })?;
    let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        return Err(Error::Encoding {
            context: "byte string is not valid in its code page",
        });
    }
    Ok(text.into_owned())
}

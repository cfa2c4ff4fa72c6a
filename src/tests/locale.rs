use crate::locale::{codeset, decode_native, encode_native, wrap_gettext};

#[test]
fn test_codeset_extraction() {
    assert_eq!(codeset("pl_PL.ISO-8859-2"), Some("ISO-8859-2"));
    assert_eq!(codeset("de_DE.UTF-8@euro"), Some("UTF-8"));
    assert_eq!(codeset("en_US"), None);
    assert_eq!(codeset("C"), None);
    assert_eq!(codeset("POSIX"), None);
}

#[test]
fn test_ascii_survives_any_locale() {
    // Every encoding the detector can pick is ASCII-compatible, so plain
    // ASCII must round-trip regardless of the test machine's environment.
    assert_eq!(decode_native(b"hello, world").unwrap(), b"hello, world");
    assert_eq!(encode_native("hello, world").unwrap(), b"hello, world");
}

#[test]
fn test_wrap_gettext_recodes_catalog_text() {
    let lookup = wrap_gettext(|message: &str| format!("[{message}]").into_bytes());
    assert_eq!(lookup("abort").unwrap(), b"[abort]");
}

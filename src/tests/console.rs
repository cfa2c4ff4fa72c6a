use crate::codepage::CP_UTF8;
use crate::console::{write_console, Console};
use crate::errors::{Error, Result};
use crate::output::{console_attached, Stream};

/// In-memory console: records writes, caps confirmed bytes per call, can be
/// told to fail the nth write.
struct FakeConsole {
    cp: u32,
    writes: Vec<Vec<u8>>,
    max_write: usize,
    fail_on_call: Option<usize>,
    set_calls: usize,
}

impl FakeConsole {
    fn new(cp: u32) -> Self {
        Self {
            cp,
            writes: Vec::new(),
            max_write: usize::MAX,
            fail_on_call: None,
            set_calls: 0,
        }
    }

    fn written(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl Console for FakeConsole {
    type Handle = u8;

    fn output_cp(&mut self) -> Result<u32> {
        Ok(self.cp)
    }

    fn set_output_cp(&mut self, cp: u32) -> Result<()> {
        self.set_calls += 1;
        self.cp = cp;
        Ok(())
    }

    fn write(&mut self, _handle: u8, buf: &[u8]) -> Result<usize> {
        if self.fail_on_call == Some(self.writes.len()) {
            return Err(Error::ConsoleWrite { code: 5 });
        }
        let n = buf.len().min(self.max_write);
        self.writes.push(buf[..n].to_vec());
        Ok(n)
    }
}

#[test]
fn test_large_buffer_is_chunked() {
    // 40000 bytes at a 16384 limit: exactly 16384 + 16384 + 7232.
    let buf = vec![b'x'; 40000];
    let mut console = FakeConsole::new(CP_UTF8);
    write_console(&mut console, 0, &buf, 16384).unwrap();
    let sizes: Vec<usize> = console.writes.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![16384, 16384, 7232]);
    assert_eq!(console.written(), buf);
    assert_eq!(console.set_calls, 0);
}

#[test]
fn test_partial_writes_resume_from_confirmed_cursor() {
    let buf = vec![b'y'; 5000];
    let mut console = FakeConsole::new(CP_UTF8);
    console.max_write = 999;
    write_console(&mut console, 0, &buf, 16384).unwrap();
    // Nothing written twice, nothing skipped.
    assert_eq!(console.written(), buf);
    assert!(console.writes.iter().all(|w| w.len() <= 999));
}

#[test]
fn test_lossless_fast_path_keeps_code_page() {
    // "привет" fits windows-1251, so the console is never reprogrammed and
    // the bytes on the wire are in the original code page.
    let mut console = FakeConsole::new(1251);
    write_console(&mut console, 0, "привет".as_bytes(), 16384).unwrap();
    assert_eq!(console.set_calls, 0);
    assert_eq!(console.cp, 1251);
    assert_eq!(console.written(), vec![0xEF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2]);
}

#[test]
fn test_switches_to_utf8_when_text_does_not_fit() {
    let mut console = FakeConsole::new(1251);
    write_console(&mut console, 0, "日本語".as_bytes(), 16384).unwrap();
    // One switch in, one restore out.
    assert_eq!(console.set_calls, 2);
    assert_eq!(console.cp, 1251);
    assert_eq!(console.written(), "日本語".as_bytes());
}

#[test]
fn test_code_page_restored_after_write_failure() {
    let mut console = FakeConsole::new(866);
    console.fail_on_call = Some(1);
    let text = "こんにちは世界".repeat(10);
    let result = write_console(&mut console, 0, text.as_bytes(), 16);
    assert!(matches!(result, Err(Error::ConsoleWrite { code: 5 })));
    assert_eq!(console.cp, 866);
}

#[test]
fn test_undecodable_buffer_still_written_raw() {
    // Not UTF-8 at all: no fast path, switch and write the bytes as-is.
    let mut console = FakeConsole::new(1251);
    write_console(&mut console, 0, &[0xFF, 0xFE, 0x00], 16384).unwrap();
    assert_eq!(console.written(), vec![0xFF, 0xFE, 0x00]);
    assert_eq!(console.cp, 1251);
}

#[test]
fn test_zero_confirmed_bytes_is_an_error() {
    let mut console = FakeConsole::new(CP_UTF8);
    console.max_write = 0;
    let result = write_console(&mut console, 0, b"abc", 16384);
    assert!(matches!(result, Err(Error::ConsoleWrite { .. })));
}

#[test]
fn test_console_attached_smoke() {
    // Just exercise the probe; under a test harness the streams are
    // normally redirected.
    let _ = console_attached(Stream::Stdout);
    let _ = console_attached(Stream::Stderr);
}

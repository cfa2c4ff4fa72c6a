use std::cell::Cell;
use std::rc::Rc;

use crate::decode::LocalDecoder;
use crate::errors::Error;

/// A latin-1-flavored locale decode with a call counter.
fn counting_decoder() -> (LocalDecoder, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let decoder = LocalDecoder::new(Box::new(move |s| {
        counter.set(counter.get() + 1);
        Ok(s.iter().map(|&b| char::from(b)).collect::<String>().into_bytes())
    }));
    (decoder, calls)
}

#[test]
fn test_decode_is_idempotent() {
    let (mut decoder, _) = counting_decoder();
    let once = decoder.decode(b"caf\xe9").unwrap();
    assert_eq!(once, "café".as_bytes());
    let twice = decoder.decode(&once).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn test_memo_hit_skips_the_primitive() {
    let (mut decoder, calls) = counting_decoder();
    let first = decoder.decode(b"/tmp/x").unwrap();
    assert_eq!(first, b"/tmp/x");
    assert_eq!(calls.get(), 1);
    // The result is memoized, so the identical input decodes for free.
    let second = decoder.decode(b"/tmp/x").unwrap();
    assert_eq!(second, b"/tmp/x");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_mark_canonical_suppresses_decoding() {
    let mut decoder = LocalDecoder::new(Box::new(|_| {
        Err(Error::Encoding {
            context: "the primitive must not run",
        })
    }));
    decoder.mark_canonical("zażółć".as_bytes());
    let result = decoder.decode("zażółć".as_bytes()).unwrap();
    assert_eq!(result, "zażółć".as_bytes());
}

#[test]
fn test_primitive_errors_propagate() {
    let mut decoder = LocalDecoder::new(Box::new(|_| {
        Err(Error::Encoding {
            context: "undecodable",
        })
    }));
    assert!(decoder.decode(b"\xff").is_err());
}

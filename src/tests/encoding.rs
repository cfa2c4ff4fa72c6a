use crate::convert::Value;
use crate::encoding::{to_canonical, to_native, wrap_boundary};
use crate::errors::Error;

#[test]
fn test_round_trip() {
    // Tuple/list mix with a non-string leaf; the 42 must come through
    // bitwise identical and the strings must round-trip exactly.
    let input = Value::List(vec![
        Value::bytes(&b"a.txt"[..]),
        Value::Tuple(vec![Value::bytes(&b"b.txt"[..]), Value::Int(42)]),
        Value::bytes(&b"c.txt"[..]),
    ]);
    let canonical = to_canonical(input.clone()).unwrap();
    assert_eq!(
        canonical,
        Value::List(vec![
            Value::text("a.txt"),
            Value::Tuple(vec![Value::text("b.txt"), Value::Int(42)]),
            Value::text("c.txt"),
        ])
    );
    assert_eq!(to_native(canonical).unwrap(), input);
}

#[test]
fn test_round_trip_non_ascii() {
    let input = Value::bytes("świat".as_bytes());
    let back = to_native(to_canonical(input.clone()).unwrap()).unwrap();
    assert_eq!(back, input);
}

#[test]
fn test_invalid_utf8_rejected() {
    let input = Value::List(vec![Value::bytes(&b"ok"[..]), Value::bytes(&b"\xc3\x28"[..])]);
    match to_canonical(input) {
        Err(Error::Encoding { .. }) => {}
        other => panic!("expected encoding error, got {other:?}"),
    }
}

#[test]
fn test_non_string_leaves_identical() {
    let input = Value::Tuple(vec![Value::Int(9), Value::Null, Value::Bool(false)]);
    assert_eq!(to_canonical(input.clone()).unwrap(), input);
}

#[test]
fn test_wrap_boundary_converts_positional_args_and_result() {
    let op = wrap_boundary(Box::new(|args, _| {
        // The operation sees decoded text.
        let Some(Value::Text(s)) = args.first() else {
            panic!("argument arrived undecoded: {args:?}");
        };
        Ok(Value::Text(format!("{s}!")))
    }));
    let result = op(vec![Value::bytes("naïve".as_bytes())], Vec::new()).unwrap();
    assert_eq!(result, Value::bytes("naïve!".as_bytes()));
}

#[test]
fn test_wrap_boundary_leaves_kwargs_alone() {
    // Keyword arguments pass through unconverted.
    let op = wrap_boundary(Box::new(|_, kwargs| {
        let (name, value) = &kwargs[0];
        assert_eq!(name, "flag");
        assert!(matches!(value, Value::Bytes(_)));
        Ok(Value::Null)
    }));
    let kwargs = vec![("flag".to_owned(), Value::bytes(&b"raw"[..]))];
    assert_eq!(op(Vec::new(), kwargs).unwrap(), Value::Null);
}

#[test]
fn test_wrap_boundary_propagates_bad_argument() {
    let op = wrap_boundary(Box::new(|_, _| Ok(Value::Null)));
    let result = op(vec![Value::bytes(&b"\xff"[..])], Vec::new());
    assert!(matches!(result, Err(Error::Encoding { .. })));
}

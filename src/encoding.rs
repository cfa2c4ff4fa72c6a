//! The two directions of the UTF-8 boundary codec.

use crate::convert::{map_convert, Value};
use crate::errors::{Error, Result};

/// Decode every byte-string leaf of `value` into text.
///
/// This is the inbound half of the boundary: the host's UTF-8 byte strings
/// become decoded text that OS-facing operations can consume. A leaf that is
/// not valid UTF-8 fails the whole conversion.
pub fn to_canonical(value: Value) -> Result<Value> {
    map_convert(
        &|v| {
            let Value::Bytes(b) = v else { unreachable!() };
            match String::from_utf8(b) {
                Ok(s) => Ok(Value::Text(s)),
                Err(_) => Err(Error::Encoding {
                    context: "byte string is not valid UTF-8",
                }),
            }
        },
        &|v| matches!(v, Value::Bytes(_)),
        value,
    )
}

/// Encode every text leaf of `value` back into a UTF-8 byte string.
///
/// The outbound half. A straight encode: text is Unicode, so this direction
/// cannot fail today, but it keeps the fallible signature of its twin.
pub fn to_native(value: Value) -> Result<Value> {
    map_convert(
        &|v| {
            let Value::Text(s) = v else { unreachable!() };
            Ok(Value::Bytes(s.into_bytes()))
        },
        &|v| matches!(v, Value::Text(_)),
        value,
    )
}

/// Positional arguments and the result of a boundary operation.
pub type Kwargs = Vec<(String, Value)>;

/// A host entry point lifted into value space.
pub type BoundaryOp = Box<dyn Fn(Vec<Value>, Kwargs) -> Result<Value>>;

/// Wrap `op` so its positional arguments are decoded before the call and its
/// result is encoded after. Keyword arguments pass through unconverted.
pub fn wrap_boundary(op: BoundaryOp) -> BoundaryOp {
    Box::new(move |args, kwargs| {
        let args = args
            .into_iter()
            .map(to_canonical)
            .collect::<Result<Vec<_>>>()?;
        to_native(op(args, kwargs)?)
    })
}

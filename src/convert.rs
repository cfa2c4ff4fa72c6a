//! Structure-preserving conversion of boundary values.

use crate::errors::Result;

/// A value crossing the encoding boundary.
///
/// The set of shapes is closed on purpose: conversion dispatches on the tag,
/// so the recursion in [`map_convert`] is exhaustive. Byte strings are the
/// host's internal representation and are valid UTF-8 by contract; text is
/// the decoded form handed to OS-facing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A canonical UTF-8 byte string.
    Bytes(Vec<u8>),
    /// Decoded text.
    Text(String),
    Int(i64),
    Bool(bool),
    Null,
    /// Variable-length sequence.
    List(Vec<Value>),
    /// Fixed-arity group. Kept distinct from `List` so a converted value
    /// comes back in the shape it went in.
    Tuple(Vec<Value>),
}

impl Value {
    pub fn bytes(s: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(s.into())
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Visit every byte-string leaf, in structure order.
    pub fn for_each_bytes(&self, f: &mut impl FnMut(&[u8])) {
        match self {
            Value::Bytes(b) => f(b),
            Value::List(items) | Value::Tuple(items) => {
                for item in items {
                    item.for_each_bytes(f);
                }
            }
            _ => {}
        }
    }
}

/// Apply `convert` to every leaf accepted by `can_convert`, recursing through
/// lists and tuples without changing their shape or order. All other leaves
/// pass through untouched. The first leaf error aborts the whole conversion.
pub fn map_convert<C, P>(convert: &C, can_convert: &P, value: Value) -> Result<Value>
where
    C: Fn(Value) -> Result<Value>,
    P: Fn(&Value) -> bool,
{
    if can_convert(&value) {
        return convert(value);
    }
    match value {
        Value::List(items) => Ok(Value::List(convert_seq(convert, can_convert, items)?)),
        Value::Tuple(items) => Ok(Value::Tuple(convert_seq(convert, can_convert, items)?)),
        other => Ok(other),
    }
}

fn convert_seq<C, P>(convert: &C, can_convert: &P, items: Vec<Value>) -> Result<Vec<Value>>
where
    C: Fn(Value) -> Result<Value>,
    P: Fn(&Value) -> bool,
{
    items
        .into_iter()
        .map(|item| map_convert(convert, can_convert, item))
        .collect()
}

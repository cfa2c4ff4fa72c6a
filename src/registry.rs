//! Named boundary operations, wrapped once at registration.

use std::collections::HashMap;

use crate::convert::Value;
use crate::encoding::{wrap_boundary, BoundaryOp, Kwargs};
use crate::errors::{Error, Result};

/// The host entry points routed through the codec.
///
/// Instead of patching host functions in place, each entry point is
/// installed here under a logical name; the codec is composed around it
/// exactly once, at installation. The host dispatches by name afterwards.
#[derive(Default)]
pub struct Registry {
    ops: HashMap<String, BoundaryOp>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `op` under `name` with the boundary codec composed around it:
    /// callers pass byte strings, `op` sees decoded text.
    pub fn install(&mut self, name: &str, op: BoundaryOp) {
        self.ops.insert(name.to_owned(), wrap_boundary(op));
    }

    /// Install `op` as-is, for operations that already speak canonical byte
    /// strings on both sides.
    pub fn install_raw(&mut self, name: &str, op: BoundaryOp) {
        self.ops.insert(name.to_owned(), op);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Dispatch `name`.
    pub fn call(&self, name: &str, args: Vec<Value>, kwargs: Kwargs) -> Result<Value> {
        match self.ops.get(name) {
            Some(op) => op(args, kwargs),
            None => Err(Error::UnknownOperation(name.to_owned())),
        }
    }
}

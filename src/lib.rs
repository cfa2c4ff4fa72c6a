//! Keep a version-control client's strings UTF-8 on hosts whose ambient
//! encoding is not.
//!
//! Strings enter the client two ways: the command line and file names coming
//! back from the filesystem. Both are normalized to UTF-8 at the boundary and
//! converted back to what the OS expects on the way out. Console output gets
//! special treatment because the buffered text path corrupts high code-page
//! output: it is written raw, with the console output code page switched to
//! UTF-8 for the duration of the write and restored afterwards.
//!
//! The host stays on a single internal representation ([`convert::Value`]
//! byte strings are always valid UTF-8) and routes its OS-facing entry points
//! through a [`registry::Registry`] built once at startup.

pub mod argv;
pub mod codepage;
pub mod common;
pub mod console;
pub mod convert;
pub mod decode;
pub mod encoding;
pub mod errors;
pub mod fsops;
pub mod locale;
pub mod output;
pub mod path;
pub mod registry;
pub mod shim;

#[cfg(test)]
mod tests;

pub use errors::{Error, Result};
pub use shim::{Config, Shim};

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong at the encoding boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A byte string that was expected to be valid in its encoding is not,
    /// or text cannot be represented in a narrower target encoding.
    #[error("encoding error: {context}")]
    Encoding { context: &'static str },

    /// The OS write primitive reported failure, or confirmed no progress.
    #[error("console write failed (os error {code})")]
    ConsoleWrite { code: u32 },

    /// The console output code page could not be read or changed.
    #[error("console code page call failed (os error {code})")]
    CodePage { code: u32 },

    /// Dispatch on a boundary operation name nothing registered.
    #[error("unknown boundary operation {0:?}")]
    UnknownOperation(String),

    /// A registered operation was handed the wrong argument shape.
    #[error("boundary operation argument error: {0}")]
    Argument(&'static str),

    #[error(transparent)]
    Io(#[from] io::Error),
}

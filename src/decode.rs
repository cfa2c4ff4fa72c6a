//! Double-decode suppression for the host's from-locale primitive.

use std::collections::HashSet;

use crate::errors::Result;

/// The underlying locale decode: native bytes in, canonical UTF-8 out.
pub type DecodeFn = Box<dyn FnMut(&[u8]) -> Result<Vec<u8>>>;

/// Wraps a from-locale decode with a memo of strings already known to be
/// canonical.
///
/// The host's own internals cross the boundary more than once for the same
/// string; decoding an already-decoded string through a non-UTF-8 locale
/// would corrupt it. Every decode result (and every string produced
/// canonical by some other path, see [`LocalDecoder::mark_canonical`]) is
/// remembered, and a memoized input comes back unchanged. Entries are never
/// evicted for the life of the process.
pub struct LocalDecoder {
    decode: DecodeFn,
    seen: HashSet<Vec<u8>>,
}

impl LocalDecoder {
    pub fn new(decode: DecodeFn) -> Self {
        Self {
            decode,
            seen: HashSet::new(),
        }
    }

    /// A decoder over the ambient locale encoding.
    pub fn for_locale() -> Self {
        Self::new(Box::new(|s| crate::locale::decode_native(s)))
    }

    /// Decode `s` from the locale, unless it is already canonical.
    pub fn decode(&mut self, s: &[u8]) -> Result<Vec<u8>> {
        if self.seen.contains(s) {
            return Ok(s.to_vec());
        }
        let result = (self.decode)(s)?;
        self.seen.insert(result.clone());
        Ok(result)
    }

    /// Record a string that became canonical without going through
    /// [`LocalDecoder::decode`], so a later decode leaves it alone.
    pub fn mark_canonical(&mut self, s: &[u8]) {
        self.seen.insert(s.to_vec());
    }
}

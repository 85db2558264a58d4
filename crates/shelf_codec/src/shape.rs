//! Top-level payload shapes.

use serde_json::Value;
use std::fmt;

/// The top-level shape of a stored payload.
///
/// A JSON array is a collection; anything else (an object, or a scalar for
/// scalar records) is a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Exactly one encoded record.
    Single,
    /// An array of encoded records.
    Collection,
}

impl Shape {
    /// Classifies a parsed JSON value.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        if value.is_array() {
            Self::Collection
        } else {
            Self::Single
        }
    }

    /// Classifies JSON bytes by their first significant byte.
    ///
    /// Only meaningful for bytes already known to be valid JSON; use
    /// [`crate::peek_shape`] for untrusted input.
    pub(crate) fn sniff(bytes: &[u8]) -> Option<Self> {
        bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .map(|&b| if b == b'[' { Self::Collection } else { Self::Single })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("single record"),
            Self::Collection => f.write_str("record collection"),
        }
    }
}

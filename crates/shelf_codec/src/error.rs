//! Error types for the codec crate.

use crate::shape::Shape;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during encoding or decoding.
///
/// `ShapeMismatch` is deliberately kept apart from `Malformed`: the bytes
/// were valid JSON, only the top level was the other shape. Callers branch
/// on that difference.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Failed to encode a value to JSON.
    #[error("encoding failed: {message}")]
    EncodingFailed {
        /// Description of the encoding error.
        message: String,
    },

    /// The payload parsed as JSON but its top level is the wrong shape.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// The shape the caller asked for.
        expected: Shape,
        /// The shape actually present.
        found: Shape,
    },

    /// The payload is not valid JSON, or does not match the record schema.
    #[error("malformed payload: {message}")]
    Malformed {
        /// Description of the decoding error.
        message: String,
    },
}

impl CodecError {
    /// Create an encoding failed error.
    pub fn encoding_failed(message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            message: message.into(),
        }
    }

    /// Create a malformed payload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Returns `true` for a top-level shape mismatch.
    #[must_use]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}

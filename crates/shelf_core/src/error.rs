//! Error types for Shelf core.

use shelf_codec::{CodecError, Shape};
use shelf_storage::StorageError;
use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in Shelf core operations.
///
/// Every variant that concerns a storage unit carries the unit's identity
/// key so a caller juggling several record types can tell them apart.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No storage unit exists yet for this record type.
    #[error("no stored data for '{key}'")]
    NotFound {
        /// Identity key of the record type.
        key: String,
    },

    /// The stored payload is valid JSON of the other top-level shape.
    #[error("shape mismatch for '{key}': expected {expected}, found {found}")]
    ShapeMismatch {
        /// Identity key of the record type.
        key: String,
        /// The shape the caller asked for.
        expected: Shape,
        /// The shape actually stored.
        found: Shape,
    },

    /// The stored payload is not valid JSON or does not fit the record type.
    #[error("malformed data for '{key}': {message}")]
    Malformed {
        /// Identity key of the record type.
        key: String,
        /// Description of the decode failure.
        message: String,
    },

    /// A record could not be encoded.
    #[error("failed to encode '{key}': {message}")]
    Encoding {
        /// Identity key of the record type.
        key: String,
        /// Description of the encode failure.
        message: String,
    },

    /// I/O error while reading, writing or removing a storage unit.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The record type's identity key cannot be used as a file name.
    #[error("invalid identity key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The store configuration cannot be applied.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Converts a storage error raised for the unit `key`.
    pub fn from_storage(key: &str, err: StorageError) -> Self {
        match err {
            StorageError::NotFound { .. } => Self::NotFound {
                key: key.to_string(),
            },
            StorageError::Io(e) => Self::Io(e),
            StorageError::NotADirectory { path } => Self::invalid_config(format!(
                "storage root is not a directory: {}",
                path.display()
            )),
        }
    }

    /// Converts a codec error raised for the unit `key`.
    pub fn from_codec(key: &str, err: CodecError) -> Self {
        let key = key.to_string();
        match err {
            CodecError::ShapeMismatch { expected, found } => Self::ShapeMismatch {
                key,
                expected,
                found,
            },
            CodecError::Malformed { message } => Self::Malformed { key, message },
            CodecError::EncodingFailed { message } => Self::Encoding { key, message },
        }
    }

    /// Returns `true` if no storage unit exists.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the stored payload has the other top-level shape.
    #[must_use]
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(self, Self::ShapeMismatch { .. })
    }
}

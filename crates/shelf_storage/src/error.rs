//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested slot does not exist.
    #[error("slot not found: {name}")]
    NotFound {
        /// Name of the missing slot.
        name: String,
    },

    /// The backend root is missing or is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending root path.
        path: PathBuf,
    },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Returns `true` if this error reports a missing slot.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

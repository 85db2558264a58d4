//! Storage location resolution.
//!
//! Maps a record type's identity key to the slot name of its storage unit.
//! Resolution is a pure function of the type, so the same type finds the
//! same file across process restarts.

use crate::error::{CoreError, CoreResult};
use crate::persistible::Persistible;

/// File extension of every storage unit.
pub const FILE_EXTENSION: &str = "json";

/// The resolved location of one record type's storage unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    key: &'static str,
    file_name: String,
}

impl Location {
    /// Resolves the location for a record type.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if the type's identity key is not
    /// a usable file name.
    pub fn of<T: Persistible>() -> CoreResult<Self> {
        Self::for_key(T::FILE_NAME)
    }

    /// Resolves the location for a raw identity key.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if the key is empty, is `.` or
    /// `..`, or contains a path separator or NUL byte.
    pub fn for_key(key: &'static str) -> CoreResult<Self> {
        validate_key(key)?;
        Ok(Self {
            key,
            file_name: format!("{key}.{FILE_EXTENSION}"),
        })
    }

    /// Returns the identity key.
    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the slot name, `<key>.json`.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn validate_key(key: &str) -> CoreResult<()> {
    if key.is_empty() {
        return Err(CoreError::invalid_key(key, "key is empty"));
    }
    if key == "." || key == ".." {
        return Err(CoreError::invalid_key(key, "key is a relative path component"));
    }
    if key.contains(['/', '\\']) {
        return Err(CoreError::invalid_key(key, "key contains a path separator"));
    }
    if key.contains('\0') {
        return Err(CoreError::invalid_key(key, "key contains a NUL byte"));
    }
    Ok(())
}

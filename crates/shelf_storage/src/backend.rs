//! Storage backend trait definition.

use crate::error::StorageResult;
use std::path::PathBuf;

/// A whole-slot storage backend for Shelf.
///
/// Storage backends are **opaque byte stores** keyed by slot name. Shelf
/// resolves a record type to a slot name and owns the encoding; backends
/// never look inside the payload.
///
/// # Invariants
///
/// - `read` returns exactly the bytes of the last successful `replace`
/// - `replace` is all-or-nothing: a failed replace leaves the old bytes intact
/// - `remove` of a missing slot succeeds and reports `false`
/// - Backends must be `Send + Sync` for shared access
///
/// Backends take no locks across calls. Two writers racing on the same
/// slot get last-writer-wins; callers serialize per slot if they need more.
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send + Sync + std::fmt::Debug {
    /// Reads the full contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`](crate::StorageError::NotFound) if the
    /// slot does not exist, or an I/O error if the read fails.
    fn read(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Replaces the full contents of a slot, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written. The previous contents
    /// remain readable in that case.
    fn replace(&self, name: &str, data: &[u8]) -> StorageResult<()>;

    /// Removes a slot.
    ///
    /// Returns `true` if the slot existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be removed.
    fn remove(&self, name: &str) -> StorageResult<bool>;

    /// Returns `true` if the slot exists.
    ///
    /// # Errors
    ///
    /// Returns an error if existence cannot be determined.
    fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Returns the filesystem path backing a slot, if the backend has one.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

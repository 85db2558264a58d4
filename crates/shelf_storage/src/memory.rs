//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::trace;

/// An in-memory storage backend.
///
/// This backend stores all slots in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use shelf_storage::{StorageBackend, InMemoryBackend};
///
/// let backend = InMemoryBackend::new();
/// backend.replace("a.json", b"test data").unwrap();
/// assert!(backend.exists("a.json").unwrap());
/// assert_eq!(backend.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    slots: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with one pre-existing slot.
    ///
    /// Useful for seeding hand-written or corrupted payloads in tests.
    #[must_use]
    pub fn with_slot(name: impl Into<String>, data: Vec<u8>) -> Self {
        let backend = Self::new();
        backend.slots.write().insert(name.into(), data);
        backend
    }

    /// Returns a copy of a slot's bytes, if present.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<Vec<u8>> {
        self.slots.read().get(name).cloned()
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns `true` if no slot exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// Removes every slot.
    pub fn clear(&self) {
        self.slots.write().clear();
    }
}

impl StorageBackend for InMemoryBackend {
    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.slots
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::not_found(name))
    }

    fn replace(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        self.slots.write().insert(name.to_string(), data.to_vec());
        trace!(slot = name, bytes = data.len(), "replaced slot");
        Ok(())
    }

    fn remove(&self, name: &str) -> StorageResult<bool> {
        Ok(self.slots.write().remove(name).is_some())
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        Ok(self.slots.read().contains_key(name))
    }

    fn locate(&self, _name: &str) -> Option<PathBuf> {
        None
    }
}

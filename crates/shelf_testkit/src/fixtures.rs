//! Test fixtures and store helpers.
//!
//! Provides temporary stores that clean up after themselves, plus direct
//! access to the raw bytes of a unit so tests can check what actually hit
//! the disk.

use serde::{Deserialize, Serialize};
use shelf_core::{Location, Persistible, Store};
use shelf_storage::{FileBackend, InMemoryBackend, StorageBackend};
use std::path::Path;
use std::sync::{Arc, Once};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

/// Sample record type used across Shelf tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Note number.
    pub id: u32,
    /// Note text.
    pub title: String,
    /// Whether the note is pinned.
    pub pinned: bool,
}

impl Note {
    /// Creates an unpinned note.
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            pinned: false,
        }
    }
}

impl Persistible for Note {
    const FILE_NAME: &'static str = "notes";
}

/// A test store with automatic cleanup.
pub struct TempStore {
    /// The store instance.
    pub store: Store,
    backend: Arc<dyn StorageBackend>,
    /// The temporary directory (kept alive to prevent cleanup).
    temp_dir: Option<TempDir>,
}

impl TempStore {
    /// Creates a new in-memory test store.
    pub fn memory() -> Self {
        let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::new());
        Self {
            store: Store::with_backend(Arc::clone(&backend)),
            backend,
            temp_dir: None,
        }
    }

    /// Creates a new file-based test store in a fresh temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend = FileBackend::open(temp_dir.path())
            .expect("Failed to open file backend")
            .sync_on_write(false);
        let backend: Arc<dyn StorageBackend> = Arc::new(backend);

        Self {
            store: Store::with_backend(Arc::clone(&backend)),
            backend,
            temp_dir: Some(temp_dir),
        }
    }

    /// Returns the store directory if file-based, None if in-memory.
    pub fn dir(&self) -> Option<&Path> {
        self.temp_dir.as_ref().map(TempDir::path)
    }

    /// Returns the raw bytes of `T`'s unit, or `None` if it is absent.
    pub fn raw<T: Persistible>(&self) -> Option<Vec<u8>> {
        let location = Location::of::<T>().expect("Invalid identity key");
        self.backend.read(location.file_name()).ok()
    }

    /// Overwrites `T`'s unit with raw bytes, bypassing the merge engine.
    pub fn seed_raw<T: Persistible>(&self, bytes: &[u8]) {
        let location = Location::of::<T>().expect("Invalid identity key");
        self.backend
            .replace(location.file_name(), bytes)
            .expect("Failed to seed unit");
    }
}

impl std::ops::Deref for TempStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary in-memory store.
///
/// # Example
///
/// ```rust
/// use shelf_testkit::{with_temp_store, Note};
///
/// with_temp_store(|store| {
///     store.save(&Note::new(1, "a")).unwrap();
/// });
/// ```
pub fn with_temp_store<F, R>(f: F) -> R
where
    F: FnOnce(&Store) -> R,
{
    let temp = TempStore::memory();
    f(&temp.store)
}

/// Runs a test with a temporary file-based store and its directory.
pub fn with_file_store<F, R>(f: F) -> R
where
    F: FnOnce(&Store, &Path) -> R,
{
    let temp = TempStore::file();
    let dir = temp.dir().expect("File store should have a directory");
    f(&temp.store, dir)
}

/// Installs a tracing subscriber for tests, once per process.
///
/// Filtering follows `RUST_LOG`, defaulting to `warn`. Output goes through
/// the test harness so it is only shown for failing tests.
pub fn init_test_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// A store whose note unit holds one record.
    pub fn single_note_store() -> TempStore {
        let temp = TempStore::memory();
        temp.save(&Note::new(1, "only"))
            .expect("Failed to save note");
        temp
    }

    /// A store whose note unit holds `count` distinct notes as a collection.
    pub fn note_collection_store(count: u32) -> TempStore {
        let temp = TempStore::memory();
        let notes: Vec<Note> = (0..count)
            .map(|i| Note::new(i, format!("note {i}")))
            .collect();
        temp.save_all(&notes).expect("Failed to save notes");
        temp
    }

    /// A store whose note unit holds a truncated JSON array.
    pub fn corrupt_collection_store() -> TempStore {
        let temp = TempStore::memory();
        temp.seed_raw::<Note>(br#"[{"id": 1, "title": "cut"#);
        temp
    }
}

//! The store handle.

use crate::collection::CollectionStore;
use crate::config::Config;
use crate::dispatch::{self, StoredData};
use crate::error::{CoreError, CoreResult};
use crate::merge::SaveOutcome;
use crate::persistible::Persistible;
use crate::single::SingleStore;
use crate::unit::Unit;
use shelf_storage::{FileBackend, InMemoryBackend, StorageBackend, StorageError};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// A Shelf store: one JSON file per record type under a root directory.
///
/// The handle holds no record data. Every call resolves the record type's
/// unit and goes to the backend, so two handles over the same directory
/// always see the same state.
///
/// # Concurrency
///
/// `Store` is `Send + Sync` and cheap to clone, but saves are
/// read-merge-write sequences with no locking. Only the final write is
/// atomic. Callers that save the same record type from several threads
/// must serialize those saves themselves, for example with one mutex per
/// record type.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use shelf_core::{Persistible, SaveOutcome, Store, StoredData};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// struct Note {
///     text: String,
/// }
///
/// impl Persistible for Note {
///     const FILE_NAME: &'static str = "notes";
/// }
///
/// let store = Store::open_in_memory();
/// let first = Note { text: "first".into() };
/// let second = Note { text: "second".into() };
///
/// assert_eq!(store.save(&first)?, SaveOutcome::Created);
/// assert_eq!(store.save(&second)?, SaveOutcome::Escalated);
///
/// match store.load_data::<Note>()? {
///     StoredData::Collection(notes) => assert_eq!(notes.len(), 2),
///     StoredData::Single(_) => unreachable!(),
/// }
/// # Ok::<(), shelf_core::CoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    backend: Arc<dyn StorageBackend>,
}

impl Store {
    /// Opens a file-backed store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the root is not a directory,
    /// or is missing while `create_if_missing` is false. Returns an I/O
    /// error if the root cannot be created.
    pub fn open(config: Config) -> CoreResult<Self> {
        let backend = if config.create_if_missing {
            FileBackend::open_with_create_dirs(config.root())
        } else {
            FileBackend::open(config.root())
        }
        .map_err(|e| match e {
            StorageError::Io(io) => CoreError::Io(io),
            other => CoreError::invalid_config(other.to_string()),
        })?
        .sync_on_write(config.sync_on_write);

        info!(root = %config.root().display(), "opened store");
        Ok(Self::with_backend(Arc::new(backend)))
    }

    /// Opens a store that keeps everything in memory.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::with_backend(Arc::new(InMemoryBackend::new()))
    }

    /// Opens a store over an existing backend.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn unit<T: Persistible>(&self) -> CoreResult<Unit<T>> {
        Unit::resolve(Arc::clone(&self.backend))
    }

    /// Returns a handle for loading and saving `T` as a single record.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if `T::FILE_NAME` is not a usable
    /// file name.
    pub fn single<T: Persistible>(&self) -> CoreResult<SingleStore<T>> {
        self.unit().map(SingleStore::new)
    }

    /// Returns a handle for loading and saving `T` as a collection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidKey`] if `T::FILE_NAME` is not a usable
    /// file name.
    pub fn collection<T: Persistible>(&self) -> CoreResult<CollectionStore<T>> {
        self.unit().map(CollectionStore::new)
    }

    /// Saves one record. See [`SingleStore::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid, the record cannot be encoded,
    /// or the write fails.
    pub fn save<T: Persistible>(&self, record: &T) -> CoreResult<SaveOutcome> {
        self.single::<T>()?.save(record)
    }

    /// Saves a collection of records. See [`CollectionStore::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid, a record cannot be encoded,
    /// or the write fails.
    pub fn save_all<T: Persistible>(&self, records: &[T]) -> CoreResult<SaveOutcome> {
        self.collection::<T>()?.save(records)
    }

    /// Loads the unit of `T` as one record. See [`SingleStore::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is absent, holds a collection, or
    /// cannot be read or decoded.
    pub fn load_single<T: Persistible>(&self) -> CoreResult<T> {
        self.single::<T>()?.load()
    }

    /// Loads the unit of `T` as a collection. See [`CollectionStore::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is absent, holds a single record, or
    /// cannot be read or decoded.
    pub fn load_collection<T: Persistible>(&self) -> CoreResult<Vec<T>> {
        self.collection::<T>()?.load()
    }

    /// Loads the unit of `T` in whichever shape it is stored.
    ///
    /// # Errors
    ///
    /// Returns any failure other than a shape mismatch, including
    /// [`CoreError::NotFound`] for an absent unit. Telling "no data yet"
    /// apart from "unreadable data" is up to the caller.
    pub fn load_data<T: Persistible>(&self) -> CoreResult<StoredData<T>> {
        dispatch::load_data(&self.unit::<T>()?)
    }

    /// Loads the unit of `T` and hands the result to `on_result`.
    ///
    /// The callback runs only when loading succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`Store::load_data`]; the callback is not invoked on error.
    pub fn load<T, F>(&self, on_result: F) -> CoreResult<()>
    where
        T: Persistible,
        F: FnOnce(StoredData<T>),
    {
        dispatch::load_with(&self.unit::<T>()?, on_result)
    }

    /// Deletes the unit of `T`, returning it to the absent state.
    ///
    /// Returns `true` if a unit existed. Deleting an absent unit succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the file cannot be removed.
    pub fn delete<T: Persistible>(&self) -> CoreResult<bool> {
        let unit = self.unit::<T>()?;
        let removed = unit.remove()?;
        debug!(key = unit.key(), removed, "deleted unit");
        Ok(removed)
    }

    /// Returns `true` if a unit exists for `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or existence cannot be checked.
    pub fn exists<T: Persistible>(&self) -> CoreResult<bool> {
        self.unit::<T>()?.exists()
    }

    /// Returns the file path of `T`'s unit, or `None` for in-memory stores.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid.
    pub fn path<T: Persistible>(&self) -> CoreResult<Option<PathBuf>> {
        Ok(self.unit::<T>()?.path())
    }
}

//! Typed access to one storage unit.

use crate::error::{CoreError, CoreResult};
use crate::location::Location;
use crate::persistible::Persistible;
use shelf_storage::StorageBackend;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;

/// The storage unit of record type `T`: its location plus the backend.
///
/// Every method goes straight to the backend. Nothing read from disk is
/// kept between calls.
pub(crate) struct Unit<T> {
    backend: Arc<dyn StorageBackend>,
    location: Location,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Unit<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            location: self.location.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Persistible> Unit<T> {
    /// Resolves the unit for `T` on the given backend.
    pub(crate) fn resolve(backend: Arc<dyn StorageBackend>) -> CoreResult<Self> {
        Ok(Self {
            backend,
            location: Location::of::<T>()?,
            _marker: PhantomData,
        })
    }

    pub(crate) fn key(&self) -> &'static str {
        self.location.key()
    }

    pub(crate) fn path(&self) -> Option<PathBuf> {
        self.backend.locate(self.location.file_name())
    }

    fn read(&self) -> CoreResult<Vec<u8>> {
        self.backend
            .read(self.location.file_name())
            .map_err(|e| CoreError::from_storage(self.key(), e))
    }

    fn write(&self, bytes: &[u8]) -> CoreResult<()> {
        self.backend
            .replace(self.location.file_name(), bytes)
            .map_err(|e| CoreError::from_storage(self.key(), e))
    }

    /// Decodes the unit as exactly one record.
    pub(crate) fn load_single(&self) -> CoreResult<T> {
        let bytes = self.read()?;
        shelf_codec::decode_single(&bytes).map_err(|e| CoreError::from_codec(self.key(), e))
    }

    /// Decodes the unit as a sequence of records.
    pub(crate) fn load_collection(&self) -> CoreResult<Vec<T>> {
        let bytes = self.read()?;
        shelf_codec::decode_collection(&bytes).map_err(|e| CoreError::from_codec(self.key(), e))
    }

    /// Overwrites the unit with one record.
    pub(crate) fn write_single(&self, record: &T) -> CoreResult<()> {
        let bytes =
            shelf_codec::encode_single(record).map_err(|e| CoreError::from_codec(self.key(), e))?;
        self.write(&bytes)
    }

    /// Overwrites the unit with a sequence of records.
    pub(crate) fn write_collection(&self, records: &[&T]) -> CoreResult<()> {
        let bytes = shelf_codec::encode_collection(records)
            .map_err(|e| CoreError::from_codec(self.key(), e))?;
        self.write(&bytes)
    }

    pub(crate) fn exists(&self) -> CoreResult<bool> {
        self.backend
            .exists(self.location.file_name())
            .map_err(|e| CoreError::from_storage(self.key(), e))
    }

    pub(crate) fn remove(&self) -> CoreResult<bool> {
        self.backend
            .remove(self.location.file_name())
            .map_err(|e| CoreError::from_storage(self.key(), e))
    }
}

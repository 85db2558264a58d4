//! Single-record store.

use crate::error::CoreResult;
use crate::merge::{save_record, SaveOutcome};
use crate::persistible::Persistible;
use crate::unit::Unit;
use std::path::PathBuf;

/// Typed access to a record type's unit as one record.
///
/// Saving never blindly overwrites: it goes through the merge engine, which
/// escalates the unit to a collection when a different record is already
/// stored.
pub struct SingleStore<T> {
    unit: Unit<T>,
}

impl<T> Clone for SingleStore<T> {
    fn clone(&self) -> Self {
        Self {
            unit: self.unit.clone(),
        }
    }
}

impl<T: Persistible> SingleStore<T> {
    pub(crate) fn new(unit: Unit<T>) -> Self {
        Self { unit }
    }

    /// Returns the identity key of `T`.
    pub fn key(&self) -> &'static str {
        self.unit.key()
    }

    /// Returns the file backing this unit, if the backend has one.
    pub fn path(&self) -> Option<PathBuf> {
        self.unit.path()
    }

    /// Loads the stored record.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`](crate::CoreError::NotFound) if nothing is stored yet
    /// - [`CoreError::ShapeMismatch`](crate::CoreError::ShapeMismatch) if a collection is stored
    /// - [`CoreError::Malformed`](crate::CoreError::Malformed) if the payload cannot be decoded
    /// - [`CoreError::Io`](crate::CoreError::Io) if the read fails
    pub fn load(&self) -> CoreResult<T> {
        self.unit.load_single()
    }

    /// Saves a record, merging it with whatever the unit holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or the write fails.
    /// Read and decode failures of the existing unit are handled by the
    /// merge engine and never surface here.
    pub fn save(&self, record: &T) -> CoreResult<SaveOutcome> {
        save_record(&self.unit, record)
    }
}

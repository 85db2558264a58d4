//! Collection store: load and save a deduplicated set of records.

use crate::error::CoreResult;
use crate::merge::SaveOutcome;
use crate::persistible::Persistible;
use crate::unit::Unit;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// Typed access to a record type's unit as a collection.
///
/// Saving unions the given records with whatever collection is already on
/// disk, by value equality. The resulting order is unspecified.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use shelf_core::{Persistible, Store};
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// struct Tag(String);
///
/// impl Persistible for Tag {
///     const FILE_NAME: &'static str = "tags";
/// }
///
/// let store = Store::open_in_memory();
/// let tags = store.collection::<Tag>()?;
///
/// tags.save(&[Tag("rust".into()), Tag("json".into())])?;
/// tags.save(&[Tag("rust".into())])?;
/// assert_eq!(tags.load()?.len(), 2);
/// # Ok::<(), shelf_core::CoreError>(())
/// ```
pub struct CollectionStore<T> {
    unit: Unit<T>,
}

impl<T> Clone for CollectionStore<T> {
    fn clone(&self) -> Self {
        Self {
            unit: self.unit.clone(),
        }
    }
}

impl<T: Persistible> CollectionStore<T> {
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

    /// Loads the stored records.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`](crate::CoreError::NotFound) if nothing is stored yet
    /// - [`CoreError::ShapeMismatch`](crate::CoreError::ShapeMismatch) if a single record is stored
    /// - [`CoreError::Malformed`](crate::CoreError::Malformed) if the payload cannot be decoded
    /// - [`CoreError::Io`](crate::CoreError::Io) if the read fails
    pub fn load(&self) -> CoreResult<Vec<T>> {
        self.unit.load_collection()
    }

    /// Saves records, merging them into the stored collection.
    ///
    /// An empty slice is a no-op: the unit is neither read nor written.
    ///
    /// # Errors
    ///
    /// Returns an error if the merged collection cannot be encoded or
    /// written. Failing to read the existing collection is not an error;
    /// the given records are then written as they are.
    pub fn save(&self, records: &[T]) -> CoreResult<SaveOutcome> {
        let candidate: Vec<&T> = records.iter().collect();
        save_candidate(&self.unit, &candidate)
    }
}

/// Writes `candidate` to the unit, unioned with a non-empty stored collection.
///
/// Without a readable, non-empty collection on disk the candidate is written
/// as given, duplicates included. This is also the path that turns a
/// single-record file into a collection: its collection load fails with a
/// shape mismatch, so the candidate replaces it whole.
pub(crate) fn save_candidate<T: Persistible>(
    unit: &Unit<T>,
    candidate: &[&T],
) -> CoreResult<SaveOutcome> {
    if candidate.is_empty() {
        debug!(key = unit.key(), "empty collection save skipped");
        return Ok(SaveOutcome::Skipped);
    }

    let existing = match unit.load_collection() {
        Ok(existing) if !existing.is_empty() => existing,
        _ => {
            unit.write_collection(candidate)?;
            debug!(key = unit.key(), records = candidate.len(), "collection written");
            return Ok(SaveOutcome::Replaced);
        }
    };

    let merged: HashSet<&T> = candidate.iter().copied().chain(existing.iter()).collect();
    let merged: Vec<&T> = merged.into_iter().collect();
    unit.write_collection(&merged)?;
    debug!(
        key = unit.key(),
        existing = existing.len(),
        records = merged.len(),
        "collection merged"
    );
    Ok(SaveOutcome::Merged)
}

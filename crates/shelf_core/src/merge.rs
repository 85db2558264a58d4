//! Merge engine: the single-record save protocol.
//!
//! Saving one record first tries to read the unit as a single record and
//! routes on the result:
//!
//! ```text
//! load single      stored shape           action
//! ---------------  ---------------------  ---------------------------------------
//! Ok(e), e == r    Single(e)              nothing
//! Ok(e), e != r    Single(e)              write Collection [e, r]      (escalate)
//! ShapeMismatch    Collection(S)          write S + r if r not in S    (append)
//! any other error  Absent / unreadable    write Single(r)              (create)
//! ```
//!
//! A unit never goes back from Collection to Single through a save. Only
//! [`Store::delete`](crate::Store::delete) returns it to Absent.

use crate::collection::save_candidate;
use crate::error::CoreResult;
use crate::persistible::Persistible;
use crate::unit::Unit;
use tracing::{debug, warn};

/// What a save did to the storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveOutcome {
    /// No unit existed; the record was written as a single record.
    Created,
    /// The record was already stored; nothing was written.
    Unchanged,
    /// A different single record was stored; both were written as a collection.
    Escalated,
    /// The record was added to the stored collection.
    Appended,
    /// The stored payload could not be decoded and was overwritten by the record.
    Overwritten,
    /// Records were unioned with the stored collection.
    Merged,
    /// Records were written as given, replacing whatever was stored.
    Replaced,
    /// Nothing was written: an empty collection, or a stored collection that
    /// could not be re-read.
    Skipped,
}

impl SaveOutcome {
    /// Returns `true` if the unit's bytes were replaced.
    #[must_use]
    pub fn wrote(self) -> bool {
        !matches!(self, Self::Unchanged | Self::Skipped)
    }
}

/// Saves one record according to the protocol above.
pub(crate) fn save_record<T: Persistible>(unit: &Unit<T>, record: &T) -> CoreResult<SaveOutcome> {
    match unit.load_single() {
        Ok(existing) if existing == *record => {
            debug!(key = unit.key(), "record already stored");
            Ok(SaveOutcome::Unchanged)
        }
        Ok(existing) => {
            save_candidate(unit, &[&existing, record])?;
            debug!(key = unit.key(), "single record escalated to collection");
            Ok(SaveOutcome::Escalated)
        }
        Err(err) if err.is_shape_mismatch() => append_record(unit, record),
        Err(err) => {
            let outcome = if err.is_not_found() {
                SaveOutcome::Created
            } else {
                // A corrupt collection is discarded here too.
                warn!(key = unit.key(), error = %err, "unreadable unit overwritten by single record");
                SaveOutcome::Overwritten
            };
            unit.write_single(record)?;
            debug!(key = unit.key(), ?outcome, "single record written");
            Ok(outcome)
        }
    }
}

fn append_record<T: Persistible>(unit: &Unit<T>, record: &T) -> CoreResult<SaveOutcome> {
    let existing = match unit.load_collection() {
        Ok(existing) => existing,
        Err(err) => {
            warn!(key = unit.key(), error = %err, "stored collection unreadable, record not saved");
            return Ok(SaveOutcome::Skipped);
        }
    };

    if existing.contains(record) {
        debug!(key = unit.key(), "record already in collection");
        return Ok(SaveOutcome::Unchanged);
    }

    let mut candidate: Vec<&T> = existing.iter().collect();
    candidate.push(record);
    save_candidate(unit, &candidate)?;
    debug!(key = unit.key(), records = candidate.len(), "record appended to collection");
    Ok(SaveOutcome::Appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::store::Store;
    use crate::test_support::FailingBackend;
    use crate::StoredData;
    use serde::{Deserialize, Serialize};
    use shelf_storage::{InMemoryBackend, StorageBackend};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    struct Contact {
        name: String,
        email: String,
    }

    impl Persistible for Contact {
        const FILE_NAME: &'static str = "contacts";
    }

    fn contact(name: &str) -> Contact {
        Contact {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    fn stored(store: &Store) -> StoredData<Contact> {
        store.load_data::<Contact>().unwrap()
    }

    fn names(records: Vec<Contact>) -> Vec<String> {
        let mut names: Vec<String> = records.into_iter().map(|c| c.name).collect();
        names.sort();
        names
    }

    #[test]
    fn absent_to_single() {
        let store = Store::open_in_memory();

        assert_eq!(store.save(&contact("Ada")).unwrap(), SaveOutcome::Created);
        assert_eq!(stored(&store), StoredData::Single(contact("Ada")));
    }

    #[test]
    fn same_single_is_unchanged() {
        let backend = Arc::new(InMemoryBackend::new());
        let store = Store::with_backend(backend.clone());

        store.save(&contact("Ada")).unwrap();
        let before = backend.slot("contacts.json").unwrap();

        assert_eq!(store.save(&contact("Ada")).unwrap(), SaveOutcome::Unchanged);
        assert_eq!(backend.slot("contacts.json").unwrap(), before);
    }

    #[test]
    fn different_single_escalates() {
        let store = Store::open_in_memory();

        store.save(&contact("Ada")).unwrap();
        assert_eq!(store.save(&contact("Brian")).unwrap(), SaveOutcome::Escalated);

        let records = store.load_collection::<Contact>().unwrap();
        assert_eq!(names(records), vec!["Ada", "Brian"]);
    }

    #[test]
    fn collection_append() {
        let store = Store::open_in_memory();

        store.save(&contact("Ada")).unwrap();
        store.save(&contact("Brian")).unwrap();
        assert_eq!(store.save(&contact("Cleo")).unwrap(), SaveOutcome::Appended);

        let records = store.load_collection::<Contact>().unwrap();
        assert_eq!(names(records), vec!["Ada", "Brian", "Cleo"]);
    }

    #[test]
    fn collection_member_is_unchanged() {
        let backend = Arc::new(InMemoryBackend::new());
        let store = Store::with_backend(backend.clone());

        store.save(&contact("Ada")).unwrap();
        store.save(&contact("Brian")).unwrap();
        let before = backend.slot("contacts.json").unwrap();

        assert_eq!(store.save(&contact("Ada")).unwrap(), SaveOutcome::Unchanged);
        assert_eq!(backend.slot("contacts.json").unwrap(), before);
    }

    #[test]
    fn collection_never_shrinks_to_single() {
        let store = Store::open_in_memory();

        store.save(&contact("Ada")).unwrap();
        store.save(&contact("Brian")).unwrap();
        store.save(&contact("Ada")).unwrap();
        store.save(&contact("Brian")).unwrap();

        assert!(matches!(stored(&store), StoredData::Collection(_)));
    }

    #[test]
    fn stored_empty_collection_gets_record() {
        let backend = Arc::new(InMemoryBackend::with_slot("contacts.json", b"[]".to_vec()));
        let store = Store::with_backend(backend);

        assert_eq!(store.save(&contact("Ada")).unwrap(), SaveOutcome::Appended);
        assert_eq!(
            stored(&store),
            StoredData::Collection(vec![contact("Ada")])
        );
    }

    #[test]
    fn unreadable_collection_is_left_alone() {
        // Valid JSON array, wrong element schema: single load reports a shape
        // mismatch, the collection reload then fails and nothing is written.
        let payload = br#"[{"nickname": "x"}]"#.to_vec();
        let backend = Arc::new(InMemoryBackend::with_slot("contacts.json", payload.clone()));
        let store = Store::with_backend(backend.clone());

        assert_eq!(store.save(&contact("Ada")).unwrap(), SaveOutcome::Skipped);
        assert_eq!(backend.slot("contacts.json").unwrap(), payload);
    }

    #[test]
    fn corrupt_file_is_overwritten_by_single() {
        let backend = Arc::new(InMemoryBackend::with_slot(
            "contacts.json",
            br#"[{"name": "Ada", "#.to_vec(),
        ));
        let store = Store::with_backend(backend);

        assert_eq!(store.save(&contact("Brian")).unwrap(), SaveOutcome::Overwritten);
        assert_eq!(stored(&store), StoredData::Single(contact("Brian")));
    }

    #[test]
    fn single_with_wrong_schema_is_overwritten() {
        let backend = Arc::new(InMemoryBackend::new());
        backend
            .replace("contacts.json", br#"{"nickname": "x"}"#)
            .unwrap();
        let store = Store::with_backend(backend);

        assert_eq!(store.save(&contact("Ada")).unwrap(), SaveOutcome::Overwritten);
        assert_eq!(stored(&store), StoredData::Single(contact("Ada")));
    }

    #[test]
    fn create_write_failure_is_returned() {
        let backend = Arc::new(FailingBackend::new());
        let store = Store::with_backend(backend.clone());
        backend.fail_writes(true);

        let err = store.save(&contact("Ada")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
        assert!(backend.slot("contacts.json").is_none());
    }

    #[test]
    fn escalate_write_failure_is_returned() {
        let backend = Arc::new(FailingBackend::new());
        let store = Store::with_backend(backend.clone());
        store.save(&contact("Ada")).unwrap();
        let before = backend.slot("contacts.json").unwrap();

        backend.fail_writes(true);
        let err = store.save(&contact("Brian")).unwrap_err();

        assert!(matches!(err, CoreError::Io(_)));
        assert_eq!(backend.slot("contacts.json").unwrap(), before);
    }

    #[test]
    fn append_write_failure_is_returned() {
        let backend = Arc::new(FailingBackend::new());
        let store = Store::with_backend(backend.clone());
        store.save(&contact("Ada")).unwrap();
        store.save(&contact("Brian")).unwrap();
        let before = backend.slot("contacts.json").unwrap();

        backend.fail_writes(true);
        let err = store.save(&contact("Cleo")).unwrap_err();

        assert!(matches!(err, CoreError::Io(_)));
        assert_eq!(backend.slot("contacts.json").unwrap(), before);
    }

    #[test]
    fn read_failure_leads_to_overwrite() {
        let backend = Arc::new(FailingBackend::new());
        let store = Store::with_backend(backend.clone());
        store.save(&contact("Ada")).unwrap();
        store.save(&contact("Brian")).unwrap();

        backend.fail_reads(true);
        assert_eq!(store.save(&contact("Cleo")).unwrap(), SaveOutcome::Overwritten);

        backend.fail_reads(false);
        assert_eq!(stored(&store), StoredData::Single(contact("Cleo")));
    }

    #[test]
    fn outcome_wrote() {
        assert!(SaveOutcome::Created.wrote());
        assert!(SaveOutcome::Escalated.wrote());
        assert!(SaveOutcome::Overwritten.wrote());
        assert!(!SaveOutcome::Unchanged.wrote());
        assert!(!SaveOutcome::Skipped.wrote());
    }
}

//! Reference model of a storage unit.
//!
//! Tracks the shape and the distinct records a unit should hold after a
//! sequence of saves. Collection order and multiplicity are not modelled:
//! the store only promises set contents.

use crate::generators::SaveOp;
use shelf_core::{Shape, StoredData};
use std::collections::HashSet;
use std::hash::Hash;

/// Expected state of one storage unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitModel<T: Eq + Hash> {
    /// Nothing stored.
    Absent,
    /// One record stored.
    Single(T),
    /// A collection holding these distinct records.
    Collection(HashSet<T>),
}

impl<T: Eq + Hash + Clone> UnitModel<T> {
    /// Applies a single-record save.
    pub fn save(&mut self, record: &T) {
        *self = match std::mem::replace(self, Self::Absent) {
            Self::Absent => Self::Single(record.clone()),
            Self::Single(existing) if existing == *record => Self::Single(existing),
            Self::Single(existing) => Self::Collection([existing, record.clone()].into()),
            Self::Collection(mut set) => {
                set.insert(record.clone());
                Self::Collection(set)
            }
        };
    }

    /// Applies a collection save.
    pub fn save_all(&mut self, records: &[T]) {
        if records.is_empty() {
            return;
        }
        *self = match std::mem::replace(self, Self::Absent) {
            Self::Collection(mut set) if !set.is_empty() => {
                set.extend(records.iter().cloned());
                Self::Collection(set)
            }
            // A stored single record is not read back as a collection, so
            // the batch replaces it.
            _ => Self::Collection(records.iter().cloned().collect()),
        };
    }

    /// Returns the expected shape, or `None` when absent.
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Absent => None,
            Self::Single(_) => Some(Shape::Single),
            Self::Collection(_) => Some(Shape::Collection),
        }
    }

    /// Returns `true` if loaded data matches this model.
    pub fn matches(&self, data: &StoredData<T>) -> bool {
        match (self, data) {
            (Self::Single(expected), StoredData::Single(actual)) => expected == actual,
            (Self::Collection(expected), StoredData::Collection(actual)) => {
                let actual: HashSet<T> = actual.iter().cloned().collect();
                *expected == actual
            }
            _ => false,
        }
    }
}

impl UnitModel<crate::fixtures::Note> {
    /// Applies a generated save operation.
    pub fn apply(&mut self, op: &SaveOp) {
        match op {
            SaveOp::Save(note) => self.save(note),
            SaveOp::SaveAll(notes) => self.save_all(notes),
        }
    }
}

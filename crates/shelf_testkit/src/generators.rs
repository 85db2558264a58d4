//! Property-based test generators using proptest.
//!
//! Note ids come from a small range so generated sequences hit the
//! "already stored" paths often.

use crate::fixtures::Note;
use proptest::prelude::*;

/// Strategy for generating notes from a deliberately small value space.
pub fn note_strategy() -> impl Strategy<Value = Note> {
    (0u32..6, prop::sample::select(vec!["buy milk", "call mom", "ship it"]), any::<bool>())
        .prop_map(|(id, title, pinned)| Note {
            id,
            title: title.to_string(),
            pinned,
        })
}

/// Strategy for generating two notes that are not equal.
pub fn distinct_note_pair_strategy() -> impl Strategy<Value = (Note, Note)> {
    (note_strategy(), note_strategy()).prop_filter("notes must differ", |(a, b)| a != b)
}

/// A save operation against the note unit.
#[derive(Debug, Clone)]
pub enum SaveOp {
    /// Save one note.
    Save(Note),
    /// Save a batch of notes, possibly empty.
    SaveAll(Vec<Note>),
}

/// Strategy for generating save operations.
pub fn save_op_strategy() -> impl Strategy<Value = SaveOp> {
    prop_oneof![
        4 => note_strategy().prop_map(SaveOp::Save),
        1 => prop::collection::vec(note_strategy(), 0..4).prop_map(SaveOp::SaveAll),
    ]
}

/// Strategy for generating a sequence of save operations.
pub fn save_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<SaveOp>> {
    prop::collection::vec(save_op_strategy(), min_ops..max_ops)
}

/// Strategy for generating a sequence of single-note saves.
pub fn single_save_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<Note>> {
    prop::collection::vec(note_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

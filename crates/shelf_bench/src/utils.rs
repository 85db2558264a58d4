//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use shelf_testkit::Note;

/// Generate `count` distinct notes.
pub fn generate_notes(count: u32) -> Vec<Note> {
    (0..count)
        .map(|i| Note::new(i, format!("benchmark note number {i}")))
        .collect()
}

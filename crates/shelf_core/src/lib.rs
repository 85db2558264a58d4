//! # Shelf Core
//!
//! A single-file JSON record store.
//!
//! Each record type gets one storage unit, `<root>/<FILE_NAME>.json`. The
//! first save writes the record alone; saving a different record of the
//! same type turns the file into a deduplicated JSON array, and later saves
//! add to it. A unit moves only forward through these states:
//!
//! ```text
//! Absent --save(r)--> Single(r) --save(s), s != r--> Collection({r, s}) --save(t)--> ...
//! ```
//!
//! This crate provides:
//! - [`Persistible`], the trait a record type implements
//! - [`Store`], the handle that resolves and opens storage units
//! - [`SingleStore`] and [`CollectionStore`], typed handles per shape
//! - The merge engine behind every save, reported as a [`SaveOutcome`]
//! - Typed load dispatch returning [`StoredData`]
//!
//! There is no cache and no locking: every call reads the file again, and
//! callers serialize saves to the same record type themselves.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod dispatch;
mod error;
mod location;
mod merge;
mod persistible;
mod single;
mod store;
#[cfg(test)]
mod test_support;
mod unit;

pub use collection::CollectionStore;
pub use config::Config;
pub use dispatch::StoredData;
pub use error::{CoreError, CoreResult};
pub use location::{Location, FILE_EXTENSION};
pub use merge::SaveOutcome;
pub use persistible::Persistible;
pub use single::SingleStore;
pub use store::Store;

pub use shelf_codec::Shape;
pub use shelf_storage::{FileBackend, InMemoryBackend, StorageBackend};

//! # Shelf Storage
//!
//! Storage backend trait and implementations for Shelf.
//!
//! A backend holds named **slots**, each one an opaque byte payload that is
//! always read and replaced as a whole. Backends do not interpret the data
//! they store; Shelf owns the JSON format and the merge rules on top.
//!
//! ## Design Principles
//!
//! - A slot is read whole and replaced whole, never patched
//! - A replace is atomic: readers see the old bytes or the new bytes
//! - Removing a missing slot is not an error
//! - Must be `Send + Sync` so a store handle can be shared across threads
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - One file per slot inside a root directory
//!
//! ## Example
//!
//! ```rust
//! use shelf_storage::{StorageBackend, InMemoryBackend};
//!
//! let backend = InMemoryBackend::new();
//! backend.replace("notes.json", b"{}").unwrap();
//! assert_eq!(backend.read("notes.json").unwrap(), b"{}");
//! assert!(backend.remove("notes.json").unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;

//! # Shelf Testkit
//!
//! Test utilities for Shelf.
//!
//! This crate provides:
//! - Temporary stores (file or memory backed) with raw slot access
//! - Seeded scenarios: single, collection and corrupt units
//! - Property-based test generators using proptest
//! - A reference model of the save state machine
//!
//! ## Usage
//!
//! ```rust
//! use shelf_testkit::prelude::*;
//!
//! with_temp_store(|store| {
//!     store.save(&Note::new(1, "first")).unwrap();
//!     assert!(store.exists::<Note>().unwrap());
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;

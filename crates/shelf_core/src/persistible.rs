//! Record trait for types stored by Shelf.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::hash::Hash;

/// Trait for record types that Shelf can persist.
///
/// Implementors provide the identity key: a stable name, derived from the
/// type and never from an instance, that picks the storage unit. Every
/// value of the type shares that one unit. Serialization comes from serde;
/// `Eq` and `Hash` drive deduplication when records are merged.
///
/// A record must not serialize to a JSON array, since an array on disk
/// means "collection of records". Saving such a record fails with
/// [`CoreError::Encoding`](crate::CoreError::Encoding).
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use shelf_core::Persistible;
///
/// #[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// struct Bookmark {
///     url: String,
///     title: String,
/// }
///
/// impl Persistible for Bookmark {
///     const FILE_NAME: &'static str = "bookmarks";
/// }
/// ```
pub trait Persistible: Serialize + DeserializeOwned + Eq + Hash {
    /// Identity key of this record type.
    ///
    /// The storage unit lives at `<root>/<FILE_NAME>.json`. The key must be
    /// a plain file name: non-empty, with no path separators.
    const FILE_NAME: &'static str;
}

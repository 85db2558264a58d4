//! # Shelf Codec
//!
//! Shape-aware JSON encoding/decoding for Shelf.
//!
//! A Shelf file holds either one record (any JSON value other than an
//! array) or a collection of records (a JSON array). This crate encodes
//! both shapes as pretty-printed JSON and, on decode, tells a caller *why*
//! a payload did not fit:
//!
//! - [`CodecError::ShapeMismatch`] - valid JSON, but the other top-level shape
//! - [`CodecError::Malformed`] - invalid JSON, or a schema mismatch inside
//!
//! ## Usage
//!
//! ```
//! use shelf_codec::{decode_collection, decode_single, encode_single, CodecError, Shape};
//!
//! let bytes = encode_single(&42u32).unwrap();
//! assert_eq!(decode_single::<u32>(&bytes).unwrap(), 42);
//!
//! let err = decode_collection::<u32>(&bytes).unwrap_err();
//! assert_eq!(
//!     err,
//!     CodecError::ShapeMismatch { expected: Shape::Collection, found: Shape::Single }
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decoder;
mod encoder;
mod error;
mod shape;

pub use decoder::{decode_collection, decode_single, peek_shape};
pub use encoder::{encode_collection, encode_single, to_pretty_json};
pub use error::{CodecError, CodecResult};
pub use shape::Shape;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        title: String,
        count: i64,
        done: bool,
    }

    fn entry_strategy() -> impl Strategy<Value = Entry> {
        ("[a-zA-Z0-9 ]{0,16}", any::<i64>(), any::<bool>())
            .prop_map(|(title, count, done)| Entry { title, count, done })
    }

    #[test]
    fn single_payload_never_decodes_as_collection() {
        let bytes = encode_single(&Entry {
            title: "a".into(),
            count: 1,
            done: false,
        })
        .unwrap();

        assert_eq!(peek_shape(&bytes).unwrap(), Shape::Single);
        assert!(decode_collection::<Entry>(&bytes).unwrap_err().is_shape_mismatch());
    }

    proptest! {
        #[test]
        fn encoded_shape_matches_decoder(entries in prop::collection::vec(entry_strategy(), 0..6)) {
            let bytes = encode_collection(&entries).unwrap();
            prop_assert_eq!(peek_shape(&bytes).unwrap(), Shape::Collection);
            prop_assert_eq!(decode_collection::<Entry>(&bytes).unwrap(), entries);
            prop_assert!(decode_single::<Entry>(&bytes).unwrap_err().is_shape_mismatch());
        }
    }
}

//! Pretty-printed JSON encoder.

use crate::error::{CodecError, CodecResult};
use crate::shape::Shape;
use serde::Serialize;

/// Encode a value to pretty-printed JSON bytes.
///
/// Output uses two-space indentation and is stable for a given value and
/// field order, so re-encoding an unchanged record yields identical bytes.
///
/// # Errors
///
/// Returns an error if the value's `Serialize` impl fails (for example a
/// map with non-string keys).
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    serde_json::to_vec_pretty(value).map_err(|e| CodecError::encoding_failed(e.to_string()))
}

/// Encode one record as a single-shaped payload.
///
/// # Errors
///
/// Returns an error if encoding fails, or if the record itself encodes as
/// a JSON array. Such a payload would read back as a collection.
pub fn encode_single<T: Serialize>(record: &T) -> CodecResult<Vec<u8>> {
    let bytes = to_pretty_json(record)?;
    if Shape::sniff(&bytes) == Some(Shape::Collection) {
        return Err(CodecError::encoding_failed(
            "record encodes as a JSON array, which is reserved for collections",
        ));
    }
    Ok(bytes)
}

/// Encode records as a collection-shaped payload.
///
/// # Errors
///
/// Returns an error if any record fails to encode.
pub fn encode_collection<T: Serialize>(records: &[T]) -> CodecResult<Vec<u8>> {
    to_pretty_json(records)
}

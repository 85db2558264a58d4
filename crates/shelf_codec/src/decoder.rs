//! Shape-aware JSON decoder.
//!
//! Decoding happens in two steps. The bytes are first checked to be valid
//! JSON without building a tree; syntax errors stop there as `Malformed`.
//! The top-level shape is then compared with what the caller asked for,
//! producing `ShapeMismatch` before any typed deserialization runs. Only
//! then are the bytes deserialized into the record type, where schema
//! errors are again `Malformed`.

use crate::error::{CodecError, CodecResult};
use crate::shape::Shape;
use serde::de::{DeserializeOwned, IgnoredAny};

/// Validate a payload and report its top-level shape.
///
/// # Errors
///
/// Returns `Malformed` if the bytes are not valid JSON.
pub fn peek_shape(bytes: &[u8]) -> CodecResult<Shape> {
    serde_json::from_slice::<IgnoredAny>(bytes).map_err(|e| CodecError::malformed(e.to_string()))?;
    Shape::sniff(bytes).ok_or_else(|| CodecError::malformed("empty payload"))
}

/// Decode exactly one record.
///
/// # Errors
///
/// - `ShapeMismatch` if the payload is a JSON array
/// - `Malformed` if the payload is not JSON or does not fit `T`
pub fn decode_single<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    expect_shape(bytes, Shape::Single)?;
    into_typed(bytes)
}

/// Decode a sequence of records.
///
/// # Errors
///
/// - `ShapeMismatch` if the payload is not a JSON array
/// - `Malformed` if the payload is not JSON or an element does not fit `T`
pub fn decode_collection<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<Vec<T>> {
    expect_shape(bytes, Shape::Collection)?;
    into_typed(bytes)
}

fn expect_shape(bytes: &[u8], expected: Shape) -> CodecResult<()> {
    let found = peek_shape(bytes)?;
    if found != expected {
        return Err(CodecError::ShapeMismatch { expected, found });
    }
    Ok(())
}

fn into_typed<T: DeserializeOwned>(bytes: &[u8]) -> CodecResult<T> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::malformed(e.to_string()))
}

//! Typed load dispatch: read a unit without knowing its shape.

use crate::error::CoreResult;
use crate::persistible::Persistible;
use crate::unit::Unit;
use shelf_codec::Shape;

/// The contents of a storage unit, in whichever shape it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredData<T> {
    /// The unit holds exactly one record.
    Single(T),
    /// The unit holds a collection of records.
    Collection(Vec<T>),
}

impl<T> StoredData<T> {
    /// Returns the stored shape.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Single(_) => Shape::Single,
            Self::Collection(_) => Shape::Collection,
        }
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Collection(records) => records.len(),
        }
    }

    /// Returns `true` for a stored empty collection.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens either shape into a vector of records.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(record) => vec![record],
            Self::Collection(records) => records,
        }
    }
}

/// Loads the unit as a single record, falling back to a collection on a
/// shape mismatch. Every other failure is returned as is.
pub(crate) fn load_data<T: Persistible>(unit: &Unit<T>) -> CoreResult<StoredData<T>> {
    match unit.load_single() {
        Ok(record) => Ok(StoredData::Single(record)),
        Err(err) if err.is_shape_mismatch() => unit.load_collection().map(StoredData::Collection),
        Err(err) => Err(err),
    }
}

/// Callback form of [`load_data`]. The callback only runs on success.
pub(crate) fn load_with<T, F>(unit: &Unit<T>, on_result: F) -> CoreResult<()>
where
    T: Persistible,
    F: FnOnce(StoredData<T>),
{
    let data = load_data(unit)?;
    on_result(data);
    Ok(())
}

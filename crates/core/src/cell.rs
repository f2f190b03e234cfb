//! `DataCell` — tagged cell value.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::blob::{BlobCell, BlobWrapperCell};
use crate::types::DataType;

/// A single typed value inside a table.
///
/// There is no null: absence is the explicit [`Missing`](DataCell::Missing)
/// sentinel. Large payloads appear either as a raw [`Blob`](DataCell::Blob)
/// or, inside collections, as a deferred
/// [`BlobWrapper`](DataCell::BlobWrapper).
#[derive(Debug, Clone, PartialEq)]
pub enum DataCell {
    Missing,
    Int(i64),
    Double(f64),
    Str(String),
    Blob(BlobCell),
    BlobWrapper(BlobWrapperCell),
}

impl DataCell {
    pub fn is_missing(&self) -> bool {
        matches!(self, DataCell::Missing)
    }

    /// Type tag of this cell. For a wrapper this is the declared payload
    /// type; the payload itself is not resolved.
    pub fn cell_type(&self) -> DataType {
        match self {
            DataCell::Missing => DataType::Missing,
            DataCell::Int(_) => DataType::Int,
            DataCell::Double(_) => DataType::Double,
            DataCell::Str(_) => DataType::Str,
            DataCell::Blob(blob) => blob.blob_type(),
            DataCell::BlobWrapper(wrapper) => wrapper.blob_type(),
        }
    }
}

impl From<i64> for DataCell {
    fn from(value: i64) -> Self {
        DataCell::Int(value)
    }
}

impl From<f64> for DataCell {
    fn from(value: f64) -> Self {
        DataCell::Double(value)
    }
}

impl From<&str> for DataCell {
    fn from(value: &str) -> Self {
        DataCell::Str(value.to_owned())
    }
}

impl From<String> for DataCell {
    fn from(value: String) -> Self {
        DataCell::Str(value)
    }
}

impl From<BlobCell> for DataCell {
    fn from(value: BlobCell) -> Self {
        DataCell::Blob(value)
    }
}

impl From<BlobWrapperCell> for DataCell {
    fn from(value: BlobWrapperCell) -> Self {
        DataCell::BlobWrapper(value)
    }
}

// Doubles hash by bit pattern, consistent with `PartialEq` on f64 for every
// value that compares equal to itself.
impl Hash for DataCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            DataCell::Missing => state.write_u8(0),
            DataCell::Int(v) => {
                state.write_u8(1);
                v.hash(state);
            }
            DataCell::Double(v) => {
                state.write_u8(2);
                v.to_bits().hash(state);
            }
            DataCell::Str(v) => {
                state.write_u8(3);
                v.hash(state);
            }
            DataCell::Blob(v) => {
                state.write_u8(4);
                v.hash(state);
            }
            DataCell::BlobWrapper(v) => {
                state.write_u8(5);
                v.hash(state);
            }
        }
    }
}

impl fmt::Display for DataCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCell::Missing => f.write_str("?"),
            DataCell::Int(v) => write!(f, "{v}"),
            DataCell::Double(v) => write!(f, "{v}"),
            DataCell::Str(v) => f.write_str(v),
            DataCell::Blob(v) => write!(f, "{v}"),
            DataCell::BlobWrapper(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(cell: &DataCell) -> u64 {
        let mut hasher = DefaultHasher::new();
        cell.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn cell_types() {
        assert_eq!(DataCell::Missing.cell_type(), DataType::Missing);
        assert_eq!(DataCell::from(3i64).cell_type(), DataType::Int);
        assert_eq!(DataCell::from(0.5).cell_type(), DataType::Double);
        assert_eq!(DataCell::from("x").cell_type(), DataType::Str);
        let blob = BlobCell::new(DataType::Image, vec![0xff]);
        assert_eq!(DataCell::Blob(blob.clone()).cell_type(), DataType::Image);
        assert_eq!(
            DataCell::BlobWrapper(BlobWrapperCell::wrap(blob)).cell_type(),
            DataType::Image
        );
    }

    #[test]
    fn equal_cells_share_a_hash() {
        let pairs = [
            (DataCell::Missing, DataCell::Missing),
            (DataCell::from(7i64), DataCell::from(7i64)),
            (DataCell::from(1.25), DataCell::from(1.25)),
            (DataCell::from("abc"), DataCell::from("abc")),
        ];
        for (a, b) in pairs {
            assert_eq!(a, b);
            assert_eq!(hash_of(&a), hash_of(&b), "{a}");
        }
    }

    #[test]
    fn int_and_double_are_distinct_cells() {
        assert_ne!(DataCell::from(1i64), DataCell::from(1.0));
    }

    #[test]
    fn display_forms() {
        assert_eq!(DataCell::Missing.to_string(), "?");
        assert_eq!(DataCell::from(-4i64).to_string(), "-4");
        assert_eq!(DataCell::from("hi").to_string(), "hi");
        let blob = BlobCell::new(DataType::Document, vec![0; 10]);
        assert_eq!(DataCell::Blob(blob).to_string(), "blob[document:10B]");
    }
}

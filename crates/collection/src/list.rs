//! `BlobCellList` — immutable ordered cell sequence with deferred blobs.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::slice;

use serde_json::Value as JsonValue;
use thiserror::Error;

use celltable_core::view::cell_to_json;
use celltable_core::{BlobError, BlobWrapperCell, DataCell, DataRow, DataType};
use celltable_pack::{CellDataInput, CellDataOutput, PackError};

/// Error raised by indexed access.
///
/// A blob-store failure during resolution passes through untranslated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellAccessError {
    #[error("index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Error raised while deserializing a list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListFormatError {
    #[error("invalid list length {0}")]
    InvalidCount(i32),
    #[error(transparent)]
    Pack(#[from] PackError),
}

/// An immutable, ordered list of cells with deferred blob handling.
///
/// Raw blob cells are wrapped in [`BlobWrapperCell`] at construction, so the
/// list holds payload references cheaply; [`get`](BlobCellList::get) and
/// iteration resolve them transparently, [`raw_get`](BlobCellList::raw_get)
/// and [`raw_iter`](BlobCellList::raw_iter) hand out the stored form.
///
/// The element type is the most specific common ancestor of every
/// non-missing element's type, or [`DataType::Missing`] when no such
/// element exists. Equality and hashing work on the stored form: two lists
/// with wrappers that resolve to equal payloads but carry different
/// addresses are not equal.
#[derive(Debug, Clone)]
pub struct BlobCellList {
    cells: Vec<DataCell>,
    element_type: DataType,
    contains_blob_wrappers: bool,
}

impl BlobCellList {
    /// Builds a list from an ordered sequence of cells.
    ///
    /// Blob cells are wrapped; existing wrappers are kept as-is. Each
    /// non-missing element folds its type into the element-type join.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = DataCell>,
    {
        let iter = cells.into_iter();
        let mut stored = Vec::with_capacity(iter.size_hint().0);
        let mut contains_blob_wrappers = false;
        let mut common: Option<DataType> = None;

        for cell in iter {
            let missing = cell.is_missing();
            let cell_type = cell.cell_type();
            match cell {
                DataCell::BlobWrapper(_) => {
                    contains_blob_wrappers = true;
                    stored.push(cell);
                }
                DataCell::Blob(blob) => {
                    contains_blob_wrappers = true;
                    stored.push(DataCell::BlobWrapper(BlobWrapperCell::wrap(blob)));
                }
                other => stored.push(other),
            }
            if !missing {
                common = Some(match common {
                    None => cell_type,
                    Some(acc) => DataType::common_super_type(acc, cell_type),
                });
            }
        }

        Self {
            cells: stored,
            element_type: common.unwrap_or(DataType::Missing),
            contains_blob_wrappers,
        }
    }

    /// Builds a list from the cells of `row` at the given column indices.
    ///
    /// Uses the row's raw accessor, so cells extracted from the storage
    /// layer keep their deferred-loading behavior. Any invalid index fails
    /// before a list is produced.
    pub fn from_row<R>(row: &R, cols: &[usize]) -> Result<Self, CellAccessError>
    where
        R: DataRow + ?Sized,
    {
        let mut cells = Vec::with_capacity(cols.len());
        for &col in cols {
            let cell = row
                .raw_cell(col)
                .ok_or(CellAccessError::IndexOutOfBounds {
                    index: col,
                    len: row.num_cells(),
                })?;
            cells.push(cell.clone());
        }
        Ok(Self::from_cells(cells))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Join of all non-missing element types; [`DataType::Missing`] for an
    /// empty or all-missing list.
    pub fn element_type(&self) -> DataType {
        self.element_type
    }

    pub fn contains_blob_wrappers(&self) -> bool {
        self.contains_blob_wrappers
    }

    /// The logical value at `index`, with a deferred payload resolved.
    pub fn get(&self, index: usize) -> Result<DataCell, CellAccessError> {
        match self.raw_get(index)? {
            DataCell::BlobWrapper(wrapper) => Ok(DataCell::Blob(wrapper.cell()?)),
            other => Ok(other.clone()),
        }
    }

    /// The stored element at `index`; a wrapper stays wrapped. Used by
    /// callers that propagate deferred loading onward.
    pub fn raw_get(&self, index: usize) -> Result<&DataCell, CellAccessError> {
        self.cells.get(index).ok_or(CellAccessError::IndexOutOfBounds {
            index,
            len: self.cells.len(),
        })
    }

    /// Iterates logical values in order, resolving deferred payloads at the
    /// point of consumption. A list without wrappers skips the per-element
    /// check entirely.
    pub fn iter(&self) -> CellIter<'_> {
        CellIter {
            inner: self.cells.iter(),
            unwrap: self.contains_blob_wrappers,
        }
    }

    /// Iterates stored elements in order, wrappers kept.
    pub fn raw_iter(&self) -> RawCellIter<'_> {
        RawCellIter {
            inner: self.cells.iter(),
        }
    }

    /// Writes the list: `i32` count, then every stored element through
    /// `output`. Wrapped elements go out in stored form, so writing never
    /// forces materialization of address-backed payloads.
    pub fn serialize<O>(&self, output: &mut O) -> Result<(), PackError>
    where
        O: CellDataOutput + ?Sized,
    {
        output.write_i32(self.cells.len() as i32)?;
        for cell in &self.cells {
            output.write_cell(cell)?;
        }
        Ok(())
    }

    /// Reads a list written by [`serialize`](BlobCellList::serialize).
    ///
    /// Goes through the normal constructor, so type unification and
    /// re-wrapping happen exactly as for an in-memory build.
    pub fn deserialize<I>(input: &mut I) -> Result<Self, ListFormatError>
    where
        I: CellDataInput + ?Sized,
    {
        let count = input.read_i32()?;
        if count < 0 {
            return Err(ListFormatError::InvalidCount(count));
        }
        let mut cells = Vec::with_capacity(count as usize);
        for _ in 0..count {
            cells.push(input.read_cell()?);
        }
        Ok(Self::from_cells(cells))
    }

    /// JSON diagnostic view of the stored elements. Never resolves.
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.cells.iter().map(cell_to_json).collect())
    }
}

/// Equality needs equal element types and equal stored sequences; see the
/// type-level note on stored-form comparison.
impl PartialEq for BlobCellList {
    fn eq(&self, other: &Self) -> bool {
        self.element_type == other.element_type && self.cells == other.cells
    }
}

/// Hashes the stored sequence only. Consistent with `PartialEq`: equal
/// lists have equal sequences, hence equal hashes.
impl Hash for BlobCellList {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl fmt::Display for BlobCellList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cell}")?;
        }
        f.write_str("]")
    }
}

impl<'a> IntoIterator for &'a BlobCellList {
    type Item = Result<DataCell, BlobError>;
    type IntoIter = CellIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over logical values.
#[derive(Debug, Clone)]
pub struct CellIter<'a> {
    inner: slice::Iter<'a, DataCell>,
    unwrap: bool,
}

impl Iterator for CellIter<'_> {
    type Item = Result<DataCell, BlobError>;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.inner.next()?;
        if self.unwrap {
            if let DataCell::BlobWrapper(wrapper) = cell {
                return Some(wrapper.cell().map(DataCell::Blob));
            }
        }
        Some(Ok(cell.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CellIter<'_> {}

/// Iterator over stored elements.
#[derive(Debug, Clone)]
pub struct RawCellIter<'a> {
    inner: slice::Iter<'a, DataCell>,
}

impl<'a> Iterator for RawCellIter<'a> {
    type Item = &'a DataCell;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for RawCellIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use celltable_core::{BlobCell, DefaultRow, MemBlobStore};
    use std::collections::hash_map::DefaultHasher;
    use std::sync::Arc;

    fn image_blob(bytes: &[u8]) -> BlobCell {
        BlobCell::new(DataType::Image, bytes.to_vec())
    }

    #[test]
    fn raw_blob_is_wrapped_at_construction() {
        let list = BlobCellList::from_cells(vec![DataCell::Blob(image_blob(b"p"))]);
        assert!(list.contains_blob_wrappers());
        assert!(matches!(
            list.raw_get(0).unwrap(),
            DataCell::BlobWrapper(_)
        ));
        // get() hands back the unwrapped payload.
        assert_eq!(list.get(0).unwrap(), DataCell::Blob(image_blob(b"p")));
    }

    #[test]
    fn element_type_is_the_join_of_non_missing_elements() {
        let list = BlobCellList::from_cells(vec![
            DataCell::from(1i64),
            DataCell::Missing,
            DataCell::from(0.5),
        ]);
        assert_eq!(list.element_type(), DataType::Number);

        let list = BlobCellList::from_cells(vec![
            DataCell::Blob(image_blob(b"x")),
            DataCell::from("hello"),
        ]);
        assert_eq!(list.element_type(), DataType::Value);
    }

    #[test]
    fn empty_and_all_missing_lists_report_the_missing_type() {
        assert_eq!(
            BlobCellList::from_cells(Vec::new()).element_type(),
            DataType::Missing
        );
        let list = BlobCellList::from_cells(vec![DataCell::Missing, DataCell::Missing]);
        assert_eq!(list.element_type(), DataType::Missing);
        let cells: Vec<_> = list.iter().collect::<Result<_, _>>().unwrap();
        assert_eq!(cells, vec![DataCell::Missing, DataCell::Missing]);
    }

    #[test]
    fn out_of_range_access_is_a_bounds_error() {
        let list = BlobCellList::from_cells(vec![DataCell::from(1i64)]);
        assert_eq!(
            list.get(1),
            Err(CellAccessError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert_eq!(
            list.raw_get(5).unwrap_err(),
            CellAccessError::IndexOutOfBounds { index: 5, len: 1 }
        );
    }

    #[test]
    fn store_failure_propagates_through_get_and_iteration() {
        let store: Arc<dyn celltable_core::BlobStore> = Arc::new(MemBlobStore::new());
        let dangling = BlobWrapperCell::from_store(
            store,
            celltable_core::BlobAddress(99),
            DataType::Image,
        );
        let list = BlobCellList::from_cells(vec![DataCell::BlobWrapper(dangling)]);

        let err = BlobError::Unresolved(celltable_core::BlobAddress(99));
        assert_eq!(list.get(0), Err(CellAccessError::Blob(err.clone())));
        assert_eq!(list.iter().next(), Some(Err(err)));
        // Raw access still works.
        assert!(list.raw_get(0).is_ok());
    }

    #[test]
    fn iteration_is_restartable() {
        let list = BlobCellList::from_cells(vec![
            DataCell::from(1i64),
            DataCell::Blob(image_blob(b"b")),
        ]);
        for _ in 0..2 {
            let cells: Vec<_> = list.iter().collect::<Result<_, _>>().unwrap();
            assert_eq!(cells[0], DataCell::from(1i64));
            assert_eq!(cells[1], DataCell::Blob(image_blob(b"b")));
        }
        assert_eq!(list.iter().len(), 2);
    }

    #[test]
    fn equality_and_hash_are_stored_form() {
        let a = BlobCellList::from_cells(vec![
            DataCell::Blob(image_blob(b"x")),
            DataCell::from("s"),
        ]);
        let b = BlobCellList::from_cells(vec![
            DataCell::Blob(image_blob(b"x")),
            DataCell::from("s"),
        ]);
        assert_eq!(a, b);

        let hash = |list: &BlobCellList| {
            let mut hasher = DefaultHasher::new();
            list.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&a), hash(&b));

        // Same stored cells, but a store-backed wrapper with a different
        // address is a different list even if the bytes would match.
        let store: Arc<dyn celltable_core::BlobStore> = Arc::new(MemBlobStore::new());
        let c = BlobCellList::from_cells(vec![
            DataCell::BlobWrapper(BlobWrapperCell::from_store(
                store,
                celltable_core::BlobAddress(0),
                DataType::Image,
            )),
            DataCell::from("s"),
        ]);
        assert_ne!(a, c);
    }

    #[test]
    fn display_is_bracketed_and_comma_joined() {
        let list = BlobCellList::from_cells(vec![
            DataCell::from(1i64),
            DataCell::Missing,
            DataCell::from("x"),
        ]);
        assert_eq!(list.to_string(), "[1, ?, x]");
        assert_eq!(BlobCellList::from_cells(Vec::new()).to_string(), "[]");
    }

    #[test]
    fn from_row_uses_raw_cells_and_checks_bounds() {
        let row = DefaultRow::new(vec![
            DataCell::from(1i64),
            DataCell::from(2i64),
            DataCell::from("c"),
            DataCell::Missing,
        ]);
        let list = BlobCellList::from_row(&row, &[2, 0]).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap(), DataCell::from("c"));
        assert_eq!(list.get(1).unwrap(), DataCell::from(1i64));

        assert_eq!(
            BlobCellList::from_row(&row, &[2, 5]).unwrap_err(),
            CellAccessError::IndexOutOfBounds { index: 5, len: 4 }
        );
    }

    #[test]
    fn json_view_summarizes_blobs() {
        let list = BlobCellList::from_cells(vec![
            DataCell::from(3i64),
            DataCell::Blob(image_blob(b"abc")),
        ]);
        assert_eq!(
            list.to_json(),
            serde_json::json!([3, { "type": "image", "deferred": true }])
        );
    }
}

//! Blob-aware cell collections.
//!
//! [`BlobCellList`] is an immutable, ordered sequence of
//! [`DataCell`](celltable_core::DataCell) values that keeps large payloads
//! deferred: raw blob cells are wrapped at construction and only resolved
//! when an element is actually read. The list's element type is the join of
//! all non-missing element types in the
//! [`DataType`](celltable_core::DataType) lattice.

mod concat;
mod list;

pub use concat::Concatenate;
pub use list::{BlobCellList, CellAccessError, CellIter, ListFormatError, RawCellIter};

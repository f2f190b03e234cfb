//! Row abstraction consumed by the collection factory.

use crate::cell::DataCell;

/// An ordered row of cells.
///
/// Rows sourced from the table engine's storage layer override
/// [`raw_cell`](DataRow::raw_cell) to hand out the stored (possibly
/// wrapped) form, so that extracting cells into a collection does not force
/// blob materialization.
pub trait DataRow {
    fn num_cells(&self) -> usize;

    /// The cell at `index`, or `None` when out of range.
    fn cell(&self, index: usize) -> Option<&DataCell>;

    /// The stored form of the cell at `index`, wrappers kept.
    fn raw_cell(&self, index: usize) -> Option<&DataCell> {
        self.cell(index)
    }
}

/// A plain in-memory row.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultRow {
    cells: Vec<DataCell>,
}

impl DefaultRow {
    pub fn new(cells: Vec<DataCell>) -> Self {
        Self { cells }
    }
}

impl DataRow for DefaultRow {
    fn num_cells(&self) -> usize {
        self.cells.len()
    }

    fn cell(&self, index: usize) -> Option<&DataCell> {
        self.cells.get(index)
    }
}

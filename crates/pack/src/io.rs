//! Traits collections serialize through.
//!
//! The list layout is `i32` count + that many cells; how a single cell hits
//! the wire is owned by the implementation behind these traits.

use celltable_core::DataCell;

use crate::error::PackError;

/// Sink for cell-level serialization.
pub trait CellDataOutput {
    fn write_i32(&mut self, value: i32) -> Result<(), PackError>;
    fn write_cell(&mut self, cell: &DataCell) -> Result<(), PackError>;
}

/// Source for cell-level deserialization.
pub trait CellDataInput {
    fn read_i32(&mut self) -> Result<i32, PackError>;
    fn read_cell(&mut self) -> Result<DataCell, PackError>;
}

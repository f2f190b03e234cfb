//! Concatenate — streaming fold of cell text per group.

use celltable_core::DataCell;

/// Concatenates the textual form of non-missing cells, separated by a
/// delimiter. A group of only missing cells yields a missing result.
#[derive(Debug, Clone)]
pub struct Concatenate {
    delimiter: String,
    buf: String,
    first: bool,
}

impl Concatenate {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
            buf: String::new(),
            first: true,
        }
    }

    /// Folds one cell into the running result. Missing cells are skipped.
    pub fn compute(&mut self, cell: &DataCell) {
        if cell.is_missing() {
            return;
        }
        if self.first {
            self.first = false;
        } else {
            self.buf.push_str(&self.delimiter);
        }
        self.buf.push_str(&cell.to_string());
    }

    /// The concatenated result so far; `Missing` when nothing was folded.
    pub fn result(&self) -> DataCell {
        if self.first {
            DataCell::Missing
        } else {
            DataCell::Str(self.buf.clone())
        }
    }

    /// Clears the accumulator for the next group.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.first = true;
    }
}

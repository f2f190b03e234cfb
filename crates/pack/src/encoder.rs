//! Tagged binary cell encoder.

use celltable_core::{BlobCell, DataCell};

use crate::constants::*;
use crate::error::PackError;
use crate::io::CellDataOutput;

/// Encodes cells into an owned, auto-growing buffer.
///
/// All multi-byte values are big-endian. A wrapper with a store address is
/// written as the address plus declared type, never the payload; a wrapper
/// holding its payload in memory is written inline.
#[derive(Debug, Default)]
pub struct CellEncoder {
    out: Vec<u8>,
}

impl CellEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the encoded bytes, leaving the encoder empty for reuse.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.out)
    }

    pub fn write_u8(&mut self, value: u8) {
        self.out.push(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.out.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.out.extend_from_slice(&value.to_bits().to_be_bytes());
    }

    pub fn write_str(&mut self, value: &str) {
        self.write_u32(value.len() as u32);
        self.out.extend_from_slice(value.as_bytes());
    }

    fn write_blob_body(&mut self, blob: &BlobCell) {
        self.write_u8(type_code(blob.blob_type()));
        self.write_u32(blob.size() as u32);
        self.out.extend_from_slice(blob.data());
    }
}

impl CellDataOutput for CellEncoder {
    fn write_i32(&mut self, value: i32) -> Result<(), PackError> {
        self.write_u32(value as u32);
        Ok(())
    }

    fn write_cell(&mut self, cell: &DataCell) -> Result<(), PackError> {
        match cell {
            DataCell::Missing => self.write_u8(TAG_MISSING),
            DataCell::Int(v) => {
                self.write_u8(TAG_INT);
                self.write_i64(*v);
            }
            DataCell::Double(v) => {
                self.write_u8(TAG_DOUBLE);
                self.write_f64(*v);
            }
            DataCell::Str(v) => {
                self.write_u8(TAG_STR);
                self.write_str(v);
            }
            DataCell::Blob(blob) => {
                self.write_u8(TAG_BLOB);
                self.write_blob_body(blob);
            }
            DataCell::BlobWrapper(wrapper) => {
                if let Some(blob) = wrapper.materialized() {
                    // In-memory wrapper: the payload travels inline and is
                    // re-wrapped on the reading side.
                    self.write_u8(TAG_WRAPPER_INLINE);
                    self.write_blob_body(blob);
                } else if let Some(address) = wrapper.address() {
                    self.write_u8(TAG_WRAPPER_ADDR);
                    self.write_u8(type_code(wrapper.blob_type()));
                    self.out.extend_from_slice(&address.0.to_be_bytes());
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celltable_core::DataType;

    #[test]
    fn missing_is_one_byte() {
        let mut enc = CellEncoder::new();
        enc.write_cell(&DataCell::Missing).unwrap();
        assert_eq!(enc.flush(), [0x00]);
    }

    #[test]
    fn int_wire_form() {
        let mut enc = CellEncoder::new();
        enc.write_cell(&DataCell::from(1i64)).unwrap();
        assert_eq!(enc.flush(), [0x01, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn str_wire_form() {
        let mut enc = CellEncoder::new();
        enc.write_cell(&DataCell::from("hi")).unwrap();
        assert_eq!(enc.flush(), [0x03, 0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn blob_wire_form_carries_type_and_size() {
        let mut enc = CellEncoder::new();
        let blob = BlobCell::new(DataType::Image, vec![0xde, 0xad]);
        enc.write_cell(&DataCell::Blob(blob)).unwrap();
        assert_eq!(enc.flush(), [0x04, 0x05, 0, 0, 0, 2, 0xde, 0xad]);
    }

    #[test]
    fn flush_resets_the_buffer() {
        let mut enc = CellEncoder::new();
        enc.write_cell(&DataCell::Missing).unwrap();
        assert_eq!(enc.flush().len(), 1);
        assert!(enc.flush().is_empty());
    }
}

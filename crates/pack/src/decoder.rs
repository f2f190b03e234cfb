//! Tagged binary cell decoder.

use std::str;
use std::sync::Arc;

use celltable_core::{BlobAddress, BlobCell, BlobStore, BlobWrapperCell, DataCell};

use crate::constants::*;
use crate::cursor::ByteCursor;
use crate::error::PackError;
use crate::io::CellDataInput;

/// Decodes cells from a byte slice.
///
/// An address-backed wrapper on the wire can only be rebuilt when the
/// decoder was given the store the address points into; without one,
/// decoding such a cell fails with [`PackError::NoBlobStore`]. The payload
/// itself is never fetched during decoding.
#[derive(Debug)]
pub struct CellDecoder<'a> {
    cursor: ByteCursor<'a>,
    store: Option<Arc<dyn BlobStore>>,
}

impl<'a> CellDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            store: None,
        }
    }

    pub fn with_store(data: &'a [u8], store: Arc<dyn BlobStore>) -> Self {
        Self {
            cursor: ByteCursor::new(data),
            store: Some(store),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    fn read_blob_body(&mut self) -> Result<BlobCell, PackError> {
        let blob_type = type_from_code(self.cursor.u8().ok_or(PackError::UnexpectedEof)?)?;
        let len = self.cursor.u32_be().ok_or(PackError::UnexpectedEof)? as usize;
        let data = self.cursor.bytes(len).ok_or(PackError::UnexpectedEof)?;
        Ok(BlobCell::new(blob_type, data.to_vec()))
    }
}

impl CellDataInput for CellDecoder<'_> {
    fn read_i32(&mut self) -> Result<i32, PackError> {
        self.cursor.i32_be().ok_or(PackError::UnexpectedEof)
    }

    fn read_cell(&mut self) -> Result<DataCell, PackError> {
        let tag = self.cursor.u8().ok_or(PackError::UnexpectedEof)?;
        match tag {
            TAG_MISSING => Ok(DataCell::Missing),
            TAG_INT => {
                let v = self.cursor.i64_be().ok_or(PackError::UnexpectedEof)?;
                Ok(DataCell::Int(v))
            }
            TAG_DOUBLE => {
                let v = self.cursor.f64_be().ok_or(PackError::UnexpectedEof)?;
                Ok(DataCell::Double(v))
            }
            TAG_STR => {
                let len = self.cursor.u32_be().ok_or(PackError::UnexpectedEof)? as usize;
                let bytes = self.cursor.bytes(len).ok_or(PackError::UnexpectedEof)?;
                let s = str::from_utf8(bytes).map_err(|_| PackError::InvalidUtf8)?;
                Ok(DataCell::Str(s.to_owned()))
            }
            TAG_BLOB => Ok(DataCell::Blob(self.read_blob_body()?)),
            TAG_WRAPPER_INLINE => Ok(DataCell::BlobWrapper(BlobWrapperCell::wrap(
                self.read_blob_body()?,
            ))),
            TAG_WRAPPER_ADDR => {
                let blob_type =
                    type_from_code(self.cursor.u8().ok_or(PackError::UnexpectedEof)?)?;
                let address =
                    BlobAddress(self.cursor.u64_be().ok_or(PackError::UnexpectedEof)?);
                let store = self.store.clone().ok_or(PackError::NoBlobStore)?;
                Ok(DataCell::BlobWrapper(BlobWrapperCell::from_store(
                    store, address, blob_type,
                )))
            }
            other => Err(PackError::InvalidTag(other)),
        }
    }
}

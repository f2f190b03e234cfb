//! Core cell value model for celltable.
//!
//! A cell is a typed value inside a tabular data engine. Large binary
//! payloads ("blobs") are kept behind [`BlobWrapperCell`] so a row working
//! set stays cache-resident; the payload is fetched from a [`BlobStore`]
//! only when a caller actually asks for it.
//!
//! - [`DataCell`] – tagged value enum (plain, missing, blob, wrapped blob)
//! - [`DataType`] – closed type lattice with a total join
//! - [`BlobStore`] – external payload-resolution seam
//! - [`DataRow`] – row abstraction with a raw (wrapper-preserving) accessor

mod blob;
mod cell;
mod row;
mod store;
mod types;

pub mod view;

pub use blob::{BlobAddress, BlobCell, BlobError, BlobStore, BlobWrapperCell};
pub use cell::DataCell;
pub use row::{DataRow, DefaultRow};
pub use store::MemBlobStore;
pub use types::DataType;

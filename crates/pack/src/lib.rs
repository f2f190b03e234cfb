//! Binary cell serialization for celltable.
//!
//! - [`CellDataOutput`] / [`CellDataInput`] — the seam collections write
//!   through: an `i32` primitive plus opaque `write_cell` / `read_cell`.
//! - [`CellEncoder`] / [`CellDecoder`] — the concrete big-endian tagged
//!   wire format. Decoding a deferred wrapper handle needs a
//!   [`BlobStore`](celltable_core::BlobStore) to re-bind the address.

mod constants;
mod cursor;
mod decoder;
mod encoder;
mod error;
mod io;

pub use constants::{type_code, type_from_code};
pub use cursor::ByteCursor;
pub use decoder::CellDecoder;
pub use encoder::CellEncoder;
pub use error::PackError;
pub use io::{CellDataInput, CellDataOutput};

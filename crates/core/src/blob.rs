//! Blob cells and the deferred-payload wrapper.
//!
//! A [`BlobCell`] carries a large binary payload inline. Collections never
//! hold raw blob cells: they wrap them in [`BlobWrapperCell`] so the payload
//! can live in an external [`BlobStore`] and is only fetched when accessed.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;

use crate::types::DataType;

/// Error raised by the external payload store during resolution.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlobError {
    #[error("no blob at address {0}")]
    Unresolved(BlobAddress),
    #[error("blob store failure: {0}")]
    Store(String),
}

/// Location of a payload inside a [`BlobStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlobAddress(pub u64);

impl fmt::Display for BlobAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// External payload store.
///
/// `resolve` must be idempotent and side-effect-free for observers: repeated
/// calls for the same address return logically equal payloads. Latency and
/// failure characteristics are owned by the store, not by callers.
pub trait BlobStore: fmt::Debug + Send + Sync {
    fn resolve(&self, address: BlobAddress) -> Result<BlobCell, BlobError>;
}

/// A large binary payload held inline, tagged with its payload type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobCell {
    blob_type: DataType,
    data: Vec<u8>,
}

impl BlobCell {
    pub fn new(blob_type: DataType, data: Vec<u8>) -> Self {
        Self { blob_type, data }
    }

    pub fn blob_type(&self) -> DataType {
        self.blob_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Display for BlobCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob[{}:{}B]", self.blob_type, self.data.len())
    }
}

/// Deferred-payload wrapper around a blob cell.
///
/// Two backings exist: a payload that was wrapped in memory before it ever
/// reached a store, and a handle into an external store. Either way
/// [`cell`](BlobWrapperCell::cell) yields the payload without the wrapper
/// caching a decoded copy; the backing store stays the source of truth.
#[derive(Debug, Clone)]
pub struct BlobWrapperCell {
    content: WrapperContent,
}

#[derive(Debug, Clone)]
enum WrapperContent {
    Materialized(Box<BlobCell>),
    Stored {
        store: Arc<dyn BlobStore>,
        address: BlobAddress,
        blob_type: DataType,
    },
}

impl BlobWrapperCell {
    /// Wraps an in-memory blob.
    pub fn wrap(blob: BlobCell) -> Self {
        Self {
            content: WrapperContent::Materialized(Box::new(blob)),
        }
    }

    /// Wraps a handle into `store`; the payload is fetched on access.
    pub fn from_store(store: Arc<dyn BlobStore>, address: BlobAddress, blob_type: DataType) -> Self {
        Self {
            content: WrapperContent::Stored {
                store,
                address,
                blob_type,
            },
        }
    }

    /// Declared type of the wrapped payload. Never touches the store.
    pub fn blob_type(&self) -> DataType {
        match &self.content {
            WrapperContent::Materialized(blob) => blob.blob_type(),
            WrapperContent::Stored { blob_type, .. } => *blob_type,
        }
    }

    /// The in-memory payload, when this wrapper is not store-backed.
    pub fn materialized(&self) -> Option<&BlobCell> {
        match &self.content {
            WrapperContent::Materialized(blob) => Some(blob),
            WrapperContent::Stored { .. } => None,
        }
    }

    /// Store address of the payload, if it lives in a store.
    pub fn address(&self) -> Option<BlobAddress> {
        match &self.content {
            WrapperContent::Materialized(_) => None,
            WrapperContent::Stored { address, .. } => Some(*address),
        }
    }

    /// Resolves the wrapped payload.
    ///
    /// Idempotent; a store failure propagates untranslated.
    pub fn cell(&self) -> Result<BlobCell, BlobError> {
        match &self.content {
            WrapperContent::Materialized(blob) => Ok((**blob).clone()),
            WrapperContent::Stored { store, address, .. } => store.resolve(*address),
        }
    }
}

/// Wrappers compare by stored form: materialized payload against
/// materialized payload, handle against handle (address and declared type;
/// the store reference itself carries no identity). A handle never equals a
/// materialized wrapper, even if resolution would yield the same bytes.
impl PartialEq for BlobWrapperCell {
    fn eq(&self, other: &Self) -> bool {
        match (&self.content, &other.content) {
            (WrapperContent::Materialized(a), WrapperContent::Materialized(b)) => a == b,
            (
                WrapperContent::Stored {
                    address: a,
                    blob_type: at,
                    ..
                },
                WrapperContent::Stored {
                    address: b,
                    blob_type: bt,
                    ..
                },
            ) => a == b && at == bt,
            _ => false,
        }
    }
}

impl Hash for BlobWrapperCell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.content {
            WrapperContent::Materialized(blob) => {
                state.write_u8(0);
                blob.hash(state);
            }
            WrapperContent::Stored {
                address, blob_type, ..
            } => {
                state.write_u8(1);
                address.hash(state);
                blob_type.hash(state);
            }
        }
    }
}

// Display renders the stored form; a handle prints its address instead of
// resolving the payload.
impl fmt::Display for BlobWrapperCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            WrapperContent::Materialized(blob) => write!(f, "wrapped[{blob}]"),
            WrapperContent::Stored {
                address, blob_type, ..
            } => write!(f, "wrapped[{blob_type}{address}]"),
        }
    }
}

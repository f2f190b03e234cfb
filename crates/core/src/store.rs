//! In-memory blob store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::blob::{BlobAddress, BlobCell, BlobError, BlobStore};

/// A [`BlobStore`] backed by a process-local map.
///
/// Used by tests and by callers that have no real storage layer; addresses
/// are handed out sequentially on `put`.
#[derive(Debug, Default)]
pub struct MemBlobStore {
    blobs: RwLock<HashMap<BlobAddress, BlobCell>>,
    next: AtomicU64,
}

impl MemBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `blob` and returns its address.
    pub fn put(&self, blob: BlobCell) -> BlobAddress {
        let address = BlobAddress(self.next.fetch_add(1, Ordering::Relaxed));
        self.blobs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address, blob);
        address
    }

    pub fn len(&self) -> usize {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemBlobStore {
    fn resolve(&self, address: BlobAddress) -> Result<BlobCell, BlobError> {
        self.blobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&address)
            .cloned()
            .ok_or(BlobError::Unresolved(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn put_then_resolve() {
        let store = MemBlobStore::new();
        let blob = BlobCell::new(DataType::Document, b"report".to_vec());
        let addr = store.put(blob.clone());
        assert_eq!(store.resolve(addr), Ok(blob));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn addresses_are_distinct() {
        let store = MemBlobStore::new();
        let a = store.put(BlobCell::new(DataType::Image, vec![1]));
        let b = store.put(BlobCell::new(DataType::Image, vec![1]));
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_address_is_an_error() {
        let store = MemBlobStore::new();
        assert_eq!(
            store.resolve(BlobAddress(42)),
            Err(BlobError::Unresolved(BlobAddress(42)))
        );
    }
}

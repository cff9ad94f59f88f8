//! Locally persisted copy of the catalog, keyed by the newest record's id.

use crate::domain::{NoteRecord, RecordId};
use crate::infra::{LocalStorage, StorageError, keys};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// The cached catalog.
///
/// Valid for as long as the store's newest record id equals `fingerprint`.
/// Replaced wholesale on mismatch, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub fingerprint: RecordId,
    pub records: Vec<NoteRecord>,
}

/// Reads the cache entry. Absent or unparsable state reads as `None`.
pub fn read_cache<L: LocalStorage + ?Sized>(storage: &L) -> Option<CacheEntry> {
    let raw = storage.get(keys::CATALOG_CACHE)?;
    match serde_json::from_str(&raw) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(error = %e, "catalog cache is corrupt, ignoring it");
            None
        }
    }
}

/// Overwrites the cache entry.
pub fn write_cache<L: LocalStorage + ?Sized>(
    storage: &mut L,
    entry: &CacheEntry,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(entry)?;
    storage.set(keys::CATALOG_CACHE, json)
}

/// Drops the cache so the next load does a full fetch.
pub fn invalidate_cache<L: LocalStorage + ?Sized>(storage: &mut L) -> Result<(), StorageError> {
    storage.remove(keys::CATALOG_CACHE)
}

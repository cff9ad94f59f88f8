//! Catalog loading with the newest-id freshness probe.
//!
//! The full collection read is the expensive call; a one-document probe
//! decides whether the cached list can be reused. Records are append-mostly
//! and sorted by recency, so an unchanged newest id stands in for "nothing
//! changed". Edits or deletions of older records are not detected until the
//! newest id moves.

use super::cache::{CacheEntry, invalidate_cache, read_cache, write_cache};
use crate::domain::{NoteRecord, RawRecord, RecordId};
use crate::infra::LocalStorage;
use crate::store::{RemoteStore, StoreError};
use tracing::{debug, info, warn};

/// Where the in-memory catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Full fetch from the store; the cache was rewritten.
    Fresh,
    /// Probe matched the cache fingerprint; no full fetch.
    Cached,
    /// The store failed and the cache was served instead.
    Stale,
}

/// A loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCatalog {
    pub records: Vec<NoteRecord>,
    pub source: CatalogSource,
    /// Documents dropped because they failed normalization.
    pub skipped: usize,
}

/// Result of [`load_catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadedCatalog),
    /// The store refused the read and no cache exists.
    Maintenance,
    /// The store is unreachable and no cache exists.
    ConnectivityError(String),
}

/// Normalizes raw documents, dropping malformed ones.
///
/// Returns the records and the number skipped.
pub fn normalize_documents(docs: Vec<RawRecord>) -> (Vec<NoteRecord>, usize) {
    let total = docs.len();
    let records: Vec<NoteRecord> = docs
        .into_iter()
        .filter_map(|raw| match raw.normalize(None) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed record");
                None
            }
        })
        .collect();
    let skipped = total - records.len();
    (records, skipped)
}

/// Loads the catalog, reusing the local cache when the probe allows it.
pub fn load_catalog<S, L>(store: &S, storage: &mut L) -> LoadOutcome
where
    S: RemoteStore + ?Sized,
    L: LocalStorage + ?Sized,
{
    let cached = read_cache(storage);

    match refresh(store, storage, cached.as_ref()) {
        Ok(loaded) => loaded,
        Err(e) => fall_back(e, cached),
    }
}

fn refresh<S, L>(
    store: &S,
    storage: &mut L,
    cached: Option<&CacheEntry>,
) -> Result<LoadOutcome, StoreError>
where
    S: RemoteStore + ?Sized,
    L: LocalStorage + ?Sized,
{
    let newest = store.probe_newest()?;
    debug!(probe = ?newest, fingerprint = ?cached.map(|c| &c.fingerprint), "freshness probe");

    if let (Some(entry), Some(newest)) = (cached, newest.as_ref())
        && &entry.fingerprint == newest
    {
        info!(count = entry.records.len(), "catalog cache is fresh");
        return Ok(LoadOutcome::Loaded(LoadedCatalog {
            records: entry.records.clone(),
            source: CatalogSource::Cached,
            skipped: 0,
        }));
    }

    let docs = store.fetch_all_newest_first()?;
    let fingerprint: Option<RecordId> = docs
        .first()
        .and_then(|d| d.id.as_deref())
        .and_then(|s| s.parse().ok());
    let (records, skipped) = normalize_documents(docs);
    info!(count = records.len(), skipped, "fetched full catalog");

    let written = match fingerprint {
        Some(fingerprint) => write_cache(
            storage,
            &CacheEntry {
                fingerprint,
                records: records.clone(),
            },
        ),
        None => invalidate_cache(storage),
    };
    if let Err(e) = written {
        warn!(error = %e, "failed to update catalog cache");
    }

    Ok(LoadOutcome::Loaded(LoadedCatalog {
        records,
        source: CatalogSource::Fresh,
        skipped,
    }))
}

fn fall_back(error: StoreError, cached: Option<CacheEntry>) -> LoadOutcome {
    match cached {
        Some(entry) => {
            warn!(error = %error, "store unavailable, serving cached catalog");
            LoadOutcome::Loaded(LoadedCatalog {
                records: entry.records,
                source: CatalogSource::Stale,
                skipped: 0,
            })
        }
        None if error.is_permission_denied() => {
            warn!("store refused catalog read, entering maintenance");
            LoadOutcome::Maintenance
        }
        None => {
            warn!(error = %error, "catalog load failed");
            LoadOutcome::ConnectivityError(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Semester;
    use crate::infra::{MemoryStorage, keys};
    use crate::store::fake::{Failure, FakeStore};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(id: &str, date: &str) -> NoteRecord {
        NoteRecord::builder(
            id.parse().unwrap(),
            format!("Title {}", id),
            Semester::new(1).unwrap(),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
        .build()
    }

    fn seeded_cache(fingerprint: &str, records: Vec<NoteRecord>) -> MemoryStorage {
        let mut storage = MemoryStorage::new();
        write_cache(
            &mut storage,
            &CacheEntry {
                fingerprint: fingerprint.parse().unwrap(),
                records,
            },
        )
        .unwrap();
        storage
    }

    fn loaded(outcome: LoadOutcome) -> LoadedCatalog {
        match outcome {
            LoadOutcome::Loaded(c) => c,
            other => panic!("expected a loaded catalog, got {:?}", other),
        }
    }

    #[test]
    fn first_load_fetches_and_writes_cache() {
        let store = FakeStore::with_records(&[record("b", "2025-09-22"), record("a", "2025-09-20")]);
        let mut storage = MemoryStorage::new();

        let catalog = loaded(load_catalog(&store, &mut storage));

        assert_eq!(catalog.source, CatalogSource::Fresh);
        assert_eq!(catalog.records.len(), 2);
        assert_eq!(store.full_fetches.get(), 1);
        let cache = read_cache(&storage).unwrap();
        assert_eq!(cache.fingerprint.as_str(), "b");
        assert_eq!(cache.records, catalog.records);
    }

    #[test]
    fn matching_probe_skips_full_fetch() {
        let cached = vec![record("a", "2025-09-22"), record("old", "2025-01-01")];
        let mut storage = seeded_cache("a", cached.clone());
        let store = FakeStore {
            probe_override: Some(Some("a".parse().unwrap())),
            ..Default::default()
        };

        let catalog = loaded(load_catalog(&store, &mut storage));

        assert_eq!(store.full_fetches.get(), 0);
        assert_eq!(store.probes.get(), 1);
        assert_eq!(catalog.source, CatalogSource::Cached);
        assert_eq!(catalog.records, cached);
    }

    #[test]
    fn mismatched_probe_refetches_once_and_replaces_cache() {
        let mut storage = seeded_cache("a", vec![record("a", "2025-09-22")]);
        let store = FakeStore::with_records(&[record("z", "2025-09-30"), record("a", "2025-09-22")]);

        let catalog = loaded(load_catalog(&store, &mut storage));

        assert_eq!(store.full_fetches.get(), 1);
        assert_eq!(catalog.source, CatalogSource::Fresh);
        let cache = read_cache(&storage).unwrap();
        assert_eq!(cache.fingerprint.as_str(), "z");
        assert_eq!(cache.records.len(), 2);
    }

    #[test]
    fn corrupt_cache_fails_open_to_full_fetch() {
        let mut storage = MemoryStorage::new();
        storage.set(keys::CATALOG_CACHE, "not json".into()).unwrap();
        let store = FakeStore::with_records(&[record("a", "2025-09-22")]);

        let catalog = loaded(load_catalog(&store, &mut storage));

        assert_eq!(catalog.source, CatalogSource::Fresh);
        assert_eq!(store.full_fetches.get(), 1);
        assert!(read_cache(&storage).is_some());
    }

    #[test]
    fn offline_with_cache_serves_stale() {
        let cached = vec![record("a", "2025-09-22")];
        let mut storage = seeded_cache("a", cached.clone());
        let store = FakeStore {
            fail_probe: Some(Failure::Offline),
            ..Default::default()
        };

        let catalog = loaded(load_catalog(&store, &mut storage));
        assert_eq!(catalog.source, CatalogSource::Stale);
        assert_eq!(catalog.records, cached);
    }

    #[test]
    fn fetch_failure_after_probe_serves_stale() {
        let mut storage = seeded_cache("a", vec![record("a", "2025-09-22")]);
        let store = FakeStore {
            probe_override: Some(Some("z".parse().unwrap())),
            fail_fetch: Some(Failure::Offline),
            ..Default::default()
        };

        let catalog = loaded(load_catalog(&store, &mut storage));
        assert_eq!(catalog.source, CatalogSource::Stale);
        assert_eq!(read_cache(&storage).unwrap().fingerprint.as_str(), "a");
    }

    #[test]
    fn permission_denied_without_cache_is_maintenance() {
        let mut storage = MemoryStorage::new();
        let store = FakeStore {
            fail_probe: Some(Failure::PermissionDenied),
            ..Default::default()
        };
        assert_eq!(load_catalog(&store, &mut storage), LoadOutcome::Maintenance);
    }

    #[test]
    fn offline_without_cache_is_connectivity_error() {
        let mut storage = MemoryStorage::new();
        let store = FakeStore {
            fail_probe: Some(Failure::Offline),
            ..Default::default()
        };
        assert!(matches!(
            load_catalog(&store, &mut storage),
            LoadOutcome::ConnectivityError(_)
        ));
    }

    #[test]
    fn malformed_documents_are_skipped_but_fingerprint_kept() {
        let mut store = FakeStore::with_records(&[record("a", "2025-09-20")]);
        store.docs.insert(
            0,
            RawRecord {
                id: Some("broken".into()),
                ..Default::default()
            },
        );
        let mut storage = MemoryStorage::new();

        let catalog = loaded(load_catalog(&store, &mut storage));
        assert_eq!(catalog.skipped, 1);
        assert_eq!(catalog.records.len(), 1);
        assert_eq!(read_cache(&storage).unwrap().fingerprint.as_str(), "broken");

        // The next probe returns the same newest id, so the cache is reused.
        let again = loaded(load_catalog(&store, &mut storage));
        assert_eq!(again.source, CatalogSource::Cached);
        assert_eq!(store.full_fetches.get(), 1);
    }

    #[test]
    fn empty_collection_clears_cache() {
        let mut storage = seeded_cache("a", vec![record("a", "2025-09-22")]);
        let store = FakeStore::default();

        let catalog = loaded(load_catalog(&store, &mut storage));
        assert!(catalog.records.is_empty());
        assert_eq!(catalog.source, CatalogSource::Fresh);
        assert!(read_cache(&storage).is_none());
    }
}

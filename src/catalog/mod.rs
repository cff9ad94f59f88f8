//! Catalog loading and the local cache

mod cache;
mod loader;

pub use cache::{CacheEntry, invalidate_cache, read_cache, write_cache};
pub use loader::{CatalogSource, LoadOutcome, LoadedCatalog, load_catalog, normalize_documents};

//! Per-profile key/value storage (the browser's local storage analogue).

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

/// Keys the application persists.
pub mod keys {
    /// Selected semester as an integer string.
    pub const CURRENT_SEMESTER: &str = "currentSemester";
    /// Favorites as a JSON array of record ids.
    pub const FAVORITES: &str = "classNotesFavorites";
    /// Cached catalog as a JSON object.
    pub const CATALOG_CACHE: &str = "classnotes_db_cache";
}

/// Errors writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode storage: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key/value storage scoped to one profile.
///
/// Reads never fail: unreadable state reads as absent. Writes report errors.
pub trait LocalStorage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Storage persisted as one JSON object file.
///
/// Every write rewrites the whole file through a temporary file and an
/// atomic rename, so a crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens the storage file, creating parent directories as needed.
    ///
    /// A missing file starts empty. A corrupt file is logged and also starts
    /// empty; it is overwritten on the next write.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let entries = match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "local storage is corrupt, starting empty");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        debug!(path = %path.display(), keys = entries.len(), "opened local storage");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let content = serde_json::to_string_pretty(&self.entries)?;

        let mut temp = NamedTempFile::new_in(parent).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        temp.write_all(content.as_bytes())
            .map_err(|e| StorageError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        temp.persist(&self.path)
            .map_err(|e| StorageError::AtomicWrite {
                path: self.path.clone(),
                source: e.error,
            })?;
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

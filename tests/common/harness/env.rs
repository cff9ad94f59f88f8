//! Isolated test environment with temp directory.

use super::{ClassnotesCommand, TestRecord};
use classnotes::domain::AdSlot;
use classnotes::store::{ControlFlags, RemoteStore, SqliteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// Seeds the same `store.db` the binary opens, so records and flags written
/// here are what the CLI sees.
pub struct TestEnv {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.db")
    }

    pub fn local_storage_path(&self) -> PathBuf {
        self.data_dir.join("local.json")
    }

    /// Opens the environment's store.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.store_path()).expect("Failed to open store")
    }

    /// Adds a record to the store.
    pub fn add_record(&self, record: &TestRecord) {
        self.store()
            .add_record(&record.to_record())
            .expect("Failed to add record");
    }

    pub fn set_maintenance(&self, maintenance: bool) {
        self.store()
            .set_control(ControlFlags {
                maintenance,
                locked: false,
            })
            .expect("Failed to set control flags");
    }

    pub fn put_sponsor(&self, slot: &str, ad: &AdSlot) {
        self.store()
            .put_sponsor(slot, ad)
            .expect("Failed to save sponsor");
    }

    /// Reads the local key/value file, if written.
    pub fn local_storage(&self) -> serde_json::Value {
        match std::fs::read_to_string(self.local_storage_path()) {
            Ok(contents) => serde_json::from_str(&contents).expect("local storage is JSON"),
            Err(_) => serde_json::Value::Null,
        }
    }

    /// Creates a command pointed at this data directory.
    pub fn cmd(&self) -> ClassnotesCommand {
        ClassnotesCommand::new().dir(&self.data_dir)
    }

    /// Writes a file into the data directory and returns its path.
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.data_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_seeds_store() {
        let env = TestEnv::new();
        env.add_record(&TestRecord::new("Seeded").id("seed1"));

        let docs = env.store().fetch_all_newest_first().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id.as_deref(), Some("seed1"));
        assert!(env.store_path().exists());
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }
}

//! `MemoryStore` — file-backed repository for the [`Memory`] record.
//!
//! Unlike the personality record, memory is never created implicitly: a
//! missing file is [`AppError::StorageUnavailable`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{Memory, SCHEMA_VERSION};
use super::write_json_atomic;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Memory, AppError> {
        let data = fs::read_to_string(&self.path).map_err(|e| {
            AppError::StorageUnavailable(format!("cannot read {}: {e}", self.path.display()))
        })?;
        let memory: Memory = serde_json::from_str(&data).map_err(|e| {
            AppError::StorageUnavailable(format!("malformed {}: {e}", self.path.display()))
        })?;
        if memory.version > SCHEMA_VERSION {
            return Err(AppError::StorageUnavailable(format!(
                "{} has schema version {}, newest supported is {SCHEMA_VERSION}",
                self.path.display(),
                memory.version
            )));
        }
        debug!(
            facts = memory.long_term.facts.len(),
            turns = memory.short_term.len(),
            "memory loaded"
        );
        Ok(memory)
    }

    /// Full overwrite of the persisted record.
    pub fn save(&self, memory: &Memory) -> Result<(), AppError> {
        let mut out = memory.clone();
        out.version = SCHEMA_VERSION;
        write_json_atomic(&self.path, &out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, MemoryStore) {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path().join("memory.json"));
        (dir, store)
    }

    #[test]
    fn load_missing_file_is_storage_unavailable() {
        let (_dir, store) = setup();
        assert!(matches!(store.load(), Err(AppError::StorageUnavailable(_))));
        assert!(!store.path().exists(), "load must not create the file");
    }

    #[test]
    fn load_corrupt_file_is_storage_unavailable() {
        let (_dir, store) = setup();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(AppError::StorageUnavailable(_))));
    }

    #[test]
    fn newer_schema_rejected() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            r#"{"version": 9, "profile": "", "long_term": {"facts": []}, "short_term": []}"#,
        )
        .unwrap();
        assert!(matches!(store.load(), Err(AppError::StorageUnavailable(_))));
    }

    #[test]
    fn save_then_load() {
        let (_dir, store) = setup();
        let mut m = Memory::default();
        m.append_fact("likes black coffee");
        m.append_turn("hi", "Hello, Boss.");
        store.save(&m).unwrap();
        assert_eq!(store.load().unwrap(), m);
    }

    #[test]
    fn legacy_file_saved_in_versioned_shape() {
        let (_dir, store) = setup();
        fs::write(store.path(), r#"{"profile": "", "long_term": ["a"], "short_term": []}"#).unwrap();
        let m = store.load().unwrap();
        store.save(&m).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["long_term"]["facts"][0], "a");
    }

    #[test]
    fn externally_added_keys_round_trip() {
        let (_dir, store) = setup();
        fs::write(
            store.path(),
            r#"{"version":1,"profile":"p","long_term":{"facts":["a"],"notes":"keep"},"short_term":[],"owner":"me"}"#,
        )
        .unwrap();
        let mut m = store.load().unwrap();
        m.append_fact("b");
        store.save(&m).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["owner"], "me");
        assert_eq!(raw["long_term"]["notes"], "keep");
        assert_eq!(store.load().unwrap(), m);
    }

    #[test]
    fn save_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let store = MemoryStore::new(dir.path().join("nope").join("memory.json"));
        assert!(matches!(store.save(&Memory::default()), Err(AppError::StorageUnavailable(_))));
    }
}

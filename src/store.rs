//! Preference persistence.
//!
//! The site stores exactly one preference (the theme) under one key. In a
//! browser that is `localStorage`; here it is the [`PreferenceStore`] trait
//! with an in-memory implementation for tests and a JSON file for the CLI,
//! so a preference survives from one invocation to the next the way it
//! survives page loads.
//!
//! ## File format
//!
//! A flat JSON object of string values:
//!
//! ```json
//! {
//!   "theme": "dark"
//! }
//! ```
//!
//! The file is rewritten on every `set`. A missing file is an empty store; a
//! file that is not a JSON object of strings is rejected at open time.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key/value persistence.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Process-local store. Nothing outlives the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON file on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Load `path`, or start empty if it does not exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let values = match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_round_trips_one_key() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn missing_file_is_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::open(&tmp.path().join("prefs.json")).unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn file_store_persists_across_opens() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/prefs.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("theme", "dark").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn corrupt_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Json(_))
        ));
    }

    #[test]
    fn non_string_values_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("prefs.json");
        fs::write(&path, r#"{"theme": 3}"#).unwrap();
        assert!(JsonFileStore::open(&path).is_err());
    }
}

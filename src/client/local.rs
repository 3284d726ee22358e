//! Local persistence port for the kiosk client.
//!
//! The browser original kept everything in ambient `localStorage`; here the
//! same string-keyed JSON values go through an explicit port so the flow can
//! be tested against memory storage and run against a file on disk.

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;

/// Port for string-keyed JSON persistence.
///
/// Values are whole JSON documents; callers read, modify, and write back.
/// There is no delete: the kiosk only ever accretes local state.
pub trait LocalStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key`, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn set(&self, key: &str, value: &Value) -> Result<()>;
}

/// File-backed local store: one JSON object file mapping keys to values.
///
/// Every operation reads or rewrites the whole file. That is plenty for a
/// kiosk that writes a few values per submission.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read local store: {}", self.path.display()))?;
        let map = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt local store: {}", self.path.display()))?;
        Ok(map)
    }

    fn save(&self, map: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create local store directory: {}", parent.display())
            })?;
        }
        let content = serde_json::to_string(map).context("Failed to serialize local store")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write local store: {}", self.path.display()))
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        let mut map = self.load()?;
        map.insert(key.to_string(), value.clone());
        self.save(&map)
    }
}

/// In-memory local store for tests.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &Value) -> Result<()> {
        self.data.lock().insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Reads a JSON array under `key`, defaulting to empty when absent.
///
/// Used for the fallback feedback list and the analytics buffer, both of
/// which are append-only arrays.
pub(crate) fn get_list(store: &dyn LocalStore, key: &str) -> Result<Vec<Value>> {
    match store.get(key)? {
        Some(Value::Array(items)) => Ok(items),
        Some(_) | None => Ok(Vec::new()),
    }
}

/// Appends `item` to the JSON array under `key`.
pub(crate) fn push_list(store: &dyn LocalStore, key: &str, item: Value) -> Result<()> {
    let mut items = get_list(store, key)?;
    items.push(item);
    store.set(key, &Value::Array(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_memory_get_set() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", &json!({"a": 1})).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(json!({"a": 1})));
    }

    #[test]
    fn test_file_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("local.json"));

        store.set("submitted", &json!(["demo-1"])).unwrap();
        store.set("other", &json!("x")).unwrap();

        assert_eq!(store.get("submitted").unwrap(), Some(json!(["demo-1"])));
        assert_eq!(store.get("other").unwrap(), Some(json!("x")));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("local.json");

        FileStore::new(&path).set("k", &json!(1)).unwrap();
        assert_eq!(FileStore::new(&path).get("k").unwrap(), Some(json!(1)));
    }

    #[test]
    fn test_file_store_missing_file_reads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("nope.json"));
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_list_helpers() {
        let store = MemoryStore::new();
        assert!(get_list(&store, "list").unwrap().is_empty());

        push_list(&store, "list", json!("a")).unwrap();
        push_list(&store, "list", json!("b")).unwrap();

        assert_eq!(get_list(&store, "list").unwrap(), vec![json!("a"), json!("b")]);
    }

    #[test]
    fn test_list_helper_tolerates_non_array() {
        let store = MemoryStore::new();
        store.set("list", &json!("not an array")).unwrap();
        assert!(get_list(&store, "list").unwrap().is_empty());
    }
}

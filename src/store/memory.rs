//! In-memory feedback storage backend.
//!
//! Records live in a DashMap and the index in a mutex-guarded vec. All data
//! is lost when the process exits; this backend exists for tests and for
//! running the server without a data directory.

use super::backend::FeedbackBackend;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

/// In-memory feedback storage backend.
///
/// # Thread Safety
///
/// `MemoryBackend` uses `DashMap` for the record keyspace and a
/// `parking_lot::Mutex` for the append-only index, so it can be shared
/// freely across tasks.
#[derive(Default)]
pub struct MemoryBackend {
    records: DashMap<String, Vec<u8>>,
    index: Mutex<Vec<String>>,
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.records.insert(key.to_string(), value);
        Ok(())
    }

    async fn index_append(&self, id: &str) -> Result<()> {
        self.index.lock().push(id.to_string());
        Ok(())
    }

    async fn index_all(&self) -> Result<Vec<String>> {
        Ok(self.index.lock().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set() {
        let backend = MemoryBackend::new();

        backend.set("key1", b"value1".to_vec()).await.unwrap();
        let value = backend.get("key1").await.unwrap();
        assert_eq!(value, Some(b"value1".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let backend = MemoryBackend::new();
        let value = backend.get("nonexistent").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_index_preserves_append_order() {
        let backend = MemoryBackend::new();

        backend.index_append("id-3").await.unwrap();
        backend.index_append("id-1").await.unwrap();
        backend.index_append("id-2").await.unwrap();

        let ids = backend.index_all().await.unwrap();
        assert_eq!(ids, vec!["id-3", "id-1", "id-2"]);
    }

    #[tokio::test]
    async fn test_index_allows_duplicates() {
        let backend = MemoryBackend::new();

        backend.index_append("id-1").await.unwrap();
        backend.index_append("id-1").await.unwrap();

        let ids = backend.index_all().await.unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn test_insert_writes_record_and_index() {
        let backend = MemoryBackend::new();

        backend.insert("id-1", b"payload".to_vec()).await.unwrap();

        assert_eq!(backend.get("id-1").await.unwrap(), Some(b"payload".to_vec()));
        assert_eq!(backend.index_all().await.unwrap(), vec!["id-1"]);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let backend = MemoryBackend::new();

        backend.set("key", b"value1".to_vec()).await.unwrap();
        backend.set("key", b"value2".to_vec()).await.unwrap();

        let value = backend.get("key").await.unwrap();
        assert_eq!(value, Some(b"value2".to_vec()));
    }
}

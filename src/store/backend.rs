//! Backend trait for feedback storage.
//!
//! Defines the interface every storage backend implements, enabling
//! pluggable storage (redb, memory, a managed KV service, etc.).

use anyhow::Result;
use async_trait::async_trait;

/// Backend trait for feedback storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// There is deliberately no delete or update: records are immutable once
/// written and the index only ever grows.
#[async_trait]
pub trait FeedbackBackend: Send + Sync + 'static {
    /// Retrieves a stored record by key.
    ///
    /// Returns `Ok(None)` if the key doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores a record under a key, overwriting any existing value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Appends an id to the submission index.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn index_append(&self, id: &str) -> Result<()>;

    /// Returns every indexed id, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn index_all(&self) -> Result<Vec<String>>;

    /// Stores a record and indexes its key.
    ///
    /// The default implementation issues the two writes sequentially, so a
    /// crash in between leaves an orphaned record that export skips.
    /// Backends with transactions should override this to commit both at
    /// once.
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails.
    async fn insert(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.set(key, value).await?;
        self.index_append(key).await
    }
}

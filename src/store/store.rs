//! High-level `FeedbackStore` wrapper over backend implementations.

use super::backend::FeedbackBackend;
use super::memory::MemoryBackend;
use super::redb::RedbBackend;
use crate::record::FeedbackRecord;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// High-level feedback store.
///
/// Wraps a [`FeedbackBackend`] and speaks in records rather than bytes.
/// `FeedbackStore` is `Clone` and can be shared across tasks.
///
/// # Example
///
/// ```ignore
/// use kiosk::store::FeedbackStore;
///
/// let store = FeedbackStore::memory();
/// store.insert(&record).await?;
/// ```
#[derive(Clone)]
pub struct FeedbackStore {
    backend: Arc<dyn FeedbackBackend>,
}

impl FeedbackStore {
    /// Creates a store backed by a file-based redb database.
    ///
    /// This is the default for `kiosk serve`, where persistence is required.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let backend = RedbBackend::open(path)?;
        Ok(Self {
            backend: Arc::new(backend),
        })
    }

    /// Creates a store backed by in-memory storage.
    ///
    /// All data is lost when the process exits.
    pub fn memory() -> Self {
        Self {
            backend: Arc::new(MemoryBackend::new()),
        }
    }

    /// Creates a store with a custom backend, e.g. a managed KV service.
    pub fn custom<B: FeedbackBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Stores a record under its own `id` and appends that id to the
    /// submission index.
    ///
    /// # Errors
    ///
    /// Returns an error if the record carries no string `id` or if the
    /// backend write fails.
    pub async fn insert(&self, record: &FeedbackRecord) -> Result<()> {
        let id = record
            .get("id")
            .and_then(|v| v.as_str())
            .context("Record has no id")?;
        let bytes = serde_json::to_vec(record).context("Failed to serialize record")?;
        self.backend.insert(id, bytes).await
    }

    /// Retrieves a record by id. Returns `Ok(None)` on a store miss.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the stored bytes are
    /// not a JSON object.
    pub async fn record(&self, id: &str) -> Result<Option<FeedbackRecord>> {
        match self.backend.get(id).await? {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes)
                    .with_context(|| format!("Corrupt record for id '{id}'"))?;
                Ok(Some(record))
            },
            None => Ok(None),
        }
    }

    /// Returns every indexed record id, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub async fn all_ids(&self) -> Result<Vec<String>> {
        self.backend.index_all().await
    }

    /// Resolves the full index into records, oldest first.
    ///
    /// Index entries whose record is missing are skipped, so an interrupted
    /// two-step insert never breaks export.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend read fails.
    pub async fn all_records(&self) -> Result<Vec<FeedbackRecord>> {
        let ids = self.all_ids().await?;
        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            match self.record(&id).await? {
                Some(record) => records.push(record),
                None => warn!(%id, "Indexed record missing from store, skipping"),
            }
        }
        Ok(records)
    }
}

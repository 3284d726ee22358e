//! Redb-backed feedback storage.
//!
//! Persistent storage using redb with ACID guarantees. Records live in one
//! table keyed by id; the submission index is a second table keyed by a
//! monotonically increasing sequence number so enumeration preserves append
//! order. `insert` commits both tables in a single transaction, so this
//! backend cannot produce the orphaned records the two-step default allows.

use super::backend::FeedbackBackend;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use std::path::Path;
use std::sync::Arc;

/// Table of feedback records, keyed by record id.
const RECORDS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("records");

/// Append-only submission index: sequence number -> record id.
const INDEX_TABLE: TableDefinition<'static, u64, &'static str> = TableDefinition::new("index");

/// Redb-backed feedback storage backend.
///
/// # Thread Safety
///
/// `RedbBackend` is `Clone` and can be shared across threads. The underlying
/// database handles concurrent access safely; blocking redb calls run on the
/// tokio blocking pool.
#[derive(Clone)]
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Opens or creates a redb database at the given path.
    ///
    /// Creates parent directories if needed and initializes both tables so
    /// later reads never see a missing table.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory cannot be created
    /// - Database file cannot be opened or created (permissions, disk full, etc.)
    /// - Initialization transaction fails to begin or commit
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory: {}", parent.display())
            })?;
        }

        let db = Database::create(path)
            .with_context(|| format!("Failed to open feedback database: {}", path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initialization transaction")?;
        {
            let _records = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to initialize records table")?;
            let _index = write_txn
                .open_table(INDEX_TABLE)
                .context("Failed to initialize index table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initialization transaction")?;

        Ok(Self { db: Arc::new(db) })
    }

    fn get_sync(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(RECORDS_TABLE)
            .context("Failed to open records table")?;

        let result = table
            .get(key)
            .with_context(|| format!("Failed to read record '{key}'"))?;

        Ok(result.map(|guard| guard.value().to_vec()))
    }

    fn set_sync(&self, key: &str, value: &[u8]) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;
            table
                .insert(key, value)
                .with_context(|| format!("Failed to insert record '{key}'"))?;
        }

        write_txn.commit().context("Failed to commit record write")?;
        Ok(())
    }

    fn index_append_sync(&self, id: &str) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut table = write_txn
                .open_table(INDEX_TABLE)
                .context("Failed to open index table")?;
            let seq = next_seq(&table)?;
            table
                .insert(seq, id)
                .with_context(|| format!("Failed to index id '{id}'"))?;
        }

        write_txn.commit().context("Failed to commit index append")?;
        Ok(())
    }

    fn index_all_sync(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;

        let table = read_txn
            .open_table(INDEX_TABLE)
            .context("Failed to open index table")?;

        let mut ids = Vec::new();
        for item in table.iter().context("Failed to iterate index table")? {
            let (_, id) = item.context("Failed to read index entry")?;
            ids.push(id.value().to_string());
        }

        Ok(ids)
    }

    /// Record write and index append in one transaction.
    fn insert_sync(&self, key: &str, value: &[u8]) -> Result<()> {
        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;

        {
            let mut records = write_txn
                .open_table(RECORDS_TABLE)
                .context("Failed to open records table")?;
            records
                .insert(key, value)
                .with_context(|| format!("Failed to insert record '{key}'"))?;

            let mut index = write_txn
                .open_table(INDEX_TABLE)
                .context("Failed to open index table")?;
            let seq = next_seq(&index)?;
            index
                .insert(seq, key)
                .with_context(|| format!("Failed to index id '{key}'"))?;
        }

        write_txn.commit().context("Failed to commit insert")?;
        Ok(())
    }
}

fn next_seq(table: &impl ReadableTable<u64, &'static str>) -> Result<u64> {
    let last = table.last().context("Failed to read index tail")?;
    Ok(last.map_or(0, |(key, _)| key.value() + 1))
}

#[async_trait]
impl FeedbackBackend for RedbBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.get_sync(&key))
            .await
            .context("Task join error")?
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.set_sync(&key, &value))
            .await
            .context("Task join error")?
    }

    async fn index_append(&self, id: &str) -> Result<()> {
        let backend = self.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || backend.index_append_sync(&id))
            .await
            .context("Task join error")?
    }

    async fn index_all(&self) -> Result<Vec<String>> {
        let backend = self.clone();
        tokio::task::spawn_blocking(move || backend.index_all_sync())
            .await
            .context("Task join error")?
    }

    async fn insert(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let backend = self.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || backend.insert_sync(&key, &value))
            .await
            .context("Task join error")?
    }
}

//! Feedback storage with pluggable backends.
//!
//! The store keeps two things: one record per key (key = record id) and an
//! append-only index of ids used to enumerate records for export. Backends:
//!
//! - **RedbBackend**: persistent storage; record and index entry land in a
//!   single transaction.
//! - **MemoryBackend**: fast, non-persistent storage for tests and
//!   `serve --memory`.
//!
//! # Example
//!
//! ```ignore
//! use kiosk::store::FeedbackStore;
//!
//! let store = FeedbackStore::memory();
//! store.insert(&record).await?;
//! let rows = store.all_records().await?;
//! ```

mod backend;
mod memory;
mod redb;
mod store;


pub use backend::FeedbackBackend;
pub use memory::MemoryBackend;
pub use redb::RedbBackend;
pub use store::FeedbackStore;

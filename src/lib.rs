//! Booth-kiosk demo feedback service.
//!
//! A small system with three moving parts:
//!
//! - an HTTP API ([`server`]) that stores visitor feedback and exports it
//!   as CSV,
//! - a pluggable feedback store ([`store`]) with in-memory and redb
//!   backends,
//! - the kiosk-side submit flow ([`client`]) that posts to a spreadsheet
//!   endpoint and falls back to local persistence when delivery cannot be
//!   confirmed.
//!
//! Records are immutable once written: a submission gets a generated id and
//! timestamp, lands in the store, and is only ever read back for export.

pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod export;
pub mod paths;
pub mod record;
pub mod server;
pub mod store;
pub mod videos;

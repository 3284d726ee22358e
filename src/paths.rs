//! Path utilities for kiosk infrastructure.
//!
//! Centralized path resolution for all kiosk files:
//!
//! - [`get_kiosk_dir`] - `~/.kiosk/` (base directory for all kiosk data)
//! - [`get_store_path`] - `~/.kiosk/feedback.redb` (feedback database)
//! - [`get_local_store_path`] - `~/.kiosk/local.json` (client-side local store)
//! - [`get_config_path`] - `~/.kiosk/kiosk.toml` (settings)

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the kiosk base directory.
///
/// Resolution order:
/// 1. `KIOSK_HOME` environment variable (if set)
/// 2. `~/.kiosk/` (default)
pub fn get_kiosk_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("KIOSK_HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".kiosk"))
}

/// Get the feedback database path: `~/.kiosk/feedback.redb`
pub fn get_store_path() -> Result<PathBuf> {
    Ok(get_kiosk_dir()?.join("feedback.redb"))
}

/// Get the client local store path: `~/.kiosk/local.json`
pub fn get_local_store_path() -> Result<PathBuf> {
    Ok(get_kiosk_dir()?.join("local.json"))
}

/// Get the config path: `~/.kiosk/kiosk.toml`
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_kiosk_dir()?.join("kiosk.toml"))
}

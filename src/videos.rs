//! Demo video catalog.
//!
//! The kiosk reads its catalog from a `videos.json` asset: an array of
//! video entries. `speakers` arrives as either a single string or an array
//! of names, so deserialization accepts both.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry in the demo catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub speakers: Speakers,
    pub video_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Speaker credit: a single name or a list of names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speakers {
    One(String),
    Many(Vec<String>),
}

impl Speakers {
    /// Comma-joined display form.
    pub fn join(&self) -> String {
        match self {
            Speakers::One(name) => name.clone(),
            Speakers::Many(names) => names.join(", "),
        }
    }
}

/// Loads the catalog from a local JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a video array.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Video>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read video catalog: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid video catalog: {}", path.display()))
}

/// Fetches the catalog from a URL.
///
/// # Errors
///
/// Returns an error on network failure, non-2xx status, or invalid JSON.
pub async fn load_from_url(url: &str) -> Result<Vec<Video>> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch video catalog: {url}"))?
        .error_for_status()
        .with_context(|| format!("Video catalog request failed: {url}"))?;
    response
        .json()
        .await
        .with_context(|| format!("Invalid video catalog: {url}"))
}

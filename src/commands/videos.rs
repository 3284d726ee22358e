//! List the demo video catalog.

use anyhow::{Context, Result};

use crate::client::{FileStore, analytics};
use crate::config::Config;
use crate::paths::get_local_store_path;
use crate::videos::{Video, load_from_file, load_from_url};

/// Print the catalog, optionally with local analytics tallies.
pub async fn execute(config: &Config, source_override: Option<String>, stats: bool) -> Result<()> {
    let source = source_override
        .or_else(|| config.videos.source.clone())
        .context("No video catalog configured (set videos.source or pass --source)")?;

    let videos: Vec<Video> = if source.starts_with("http://") || source.starts_with("https://") {
        load_from_url(&source).await?
    } else {
        load_from_file(&source)?
    };

    let tallies = if stats {
        let store = FileStore::new(get_local_store_path()?);
        Some(analytics::summarize(&store)?)
    } else {
        None
    };

    for video in &videos {
        let duration = video.duration.as_deref().unwrap_or("-");
        print!(
            "{}  {} ({}) [{}]",
            video.id,
            video.title,
            video.speakers.join(),
            duration
        );
        if let Some(tallies) = &tallies {
            let stats = tallies.get(&video.id).cloned().unwrap_or_default();
            print!("  views: {}, feedback: {}", stats.views, stats.feedback);
        }
        println!();
    }

    Ok(())
}

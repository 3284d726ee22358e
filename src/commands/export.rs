//! Dump stored feedback as CSV.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;
use crate::constants::NO_DATA_MESSAGE;
use crate::export::{CsvSchema, to_csv};
use crate::paths::get_store_path;
use crate::store::FeedbackStore;

/// Export feedback to stdout or a file.
///
/// Reads the local feedback database directly, without going through the
/// HTTP server. `--schema` overrides the configured column mode.
pub async fn execute(
    config: &Config,
    output: Option<PathBuf>,
    schema_override: Option<CsvSchema>,
) -> Result<()> {
    let store = FeedbackStore::file(get_store_path()?)?;
    let records = store.all_records().await?;
    let schema = schema_override.unwrap_or(config.export.schema);

    let Some(csv) = to_csv(&records, schema) else {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                records = records.len(),
                "Wrote CSV export to {}",
                path.display()
            );
        },
        None => println!("{csv}"),
    }

    Ok(())
}

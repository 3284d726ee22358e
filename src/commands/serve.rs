//! Run the feedback API server.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::paths::get_store_path;
use crate::server::{self, AppState};
use crate::store::FeedbackStore;

/// Start the feedback API.
///
/// `--port` overrides the configured port; `--memory` forces the in-memory
/// store regardless of configuration.
pub async fn execute(config: &Config, port_override: Option<u16>, memory: bool) -> Result<()> {
    let validation = config.validate()?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }

    let store = if memory || config.server.memory {
        info!("Using in-memory store (data is lost on exit)");
        FeedbackStore::memory()
    } else {
        let path = get_store_path()?;
        info!("Using feedback database at {}", path.display());
        FeedbackStore::file(path)?
    };

    let state = Arc::new(AppState {
        store,
        csv_schema: config.export.schema,
    });

    let port = port_override.unwrap_or(config.server.port);
    server::serve(state, port).await
}

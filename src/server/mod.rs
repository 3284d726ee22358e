//! Feedback API server.
//!
//! A small axum app with three routes:
//!
//! - `POST /api/feedback` - store a submission (SubmitHandler)
//! - `GET /api/export` - download all feedback as CSV (ExportHandler)
//! - `GET /health` - readiness probe
//!
//! Pre-flight `OPTIONS` requests are answered by a permissive CORS layer;
//! every other wrong-method request gets a 405 with a JSON error body.
//! Handlers are stateless per invocation; the store serializes individual
//! key operations, and no cross-request locking exists.

mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use types::{ErrorBody, HealthResponse, SubmitResponse};

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::export::CsvSchema;
use crate::store::FeedbackStore;
use handlers::{export_feedback, health, method_not_allowed, preflight_ok, submit_feedback};

/// Shared per-server state handed to every handler.
pub struct AppState {
    pub store: FeedbackStore,
    pub csv_schema: CsvSchema,
}

pub type SharedState = Arc<AppState>;

/// Build the feedback API router.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/api/feedback",
            post(submit_feedback)
                .options(preflight_ok)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/export",
            get(export_feedback)
                .options(preflight_ok)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the feedback API until interrupted.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: SharedState, port: u16) -> Result<()> {
    let app = router(state);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Feedback API listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Feedback API handlers.
//!
//! Two real operations: accept a feedback submission and export everything
//! as CSV. Bodies are accepted as raw bytes so JSON parse failures surface
//! with the parser's own message, matching the error contract.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{debug, info};

use super::error::ApiError;
use super::types::{HealthResponse, SubmitResponse};
use super::SharedState;
use crate::constants::{EXPORT_FILENAME, NO_DATA_MESSAGE};
use crate::export::to_csv;
use crate::record::{build_record, generate_timestamp};

/// POST /api/feedback - store a submission.
///
/// Accepts any JSON-parseable body, merges in a generated `id` and
/// `timestamp`, and writes the record plus an index entry. There is no
/// field validation beyond parseability.
pub(crate) async fn submit_feedback(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<SubmitResponse>, ApiError> {
    let value: Value =
        serde_json::from_slice(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let record = build_record(value);
    state.store.insert(&record).await?;

    let id = record["id"].as_str().unwrap_or_default().to_string();
    info!(%id, "Stored feedback submission");

    Ok(Json(SubmitResponse { success: true, id }))
}

/// GET /api/export - download all feedback as a CSV attachment.
///
/// Resolves the submission index oldest-first; indexed ids with no record
/// are skipped. An empty result is a plain-text notice, not an error.
pub(crate) async fn export_feedback(
    State(state): State<SharedState>,
) -> Result<Response, ApiError> {
    let records = state.store.all_records().await?;
    debug!(count = records.len(), "Exporting feedback");

    let Some(csv) = to_csv(&records, state.csv_schema) else {
        return Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            NO_DATA_MESSAGE,
        )
            .into_response());
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={EXPORT_FILENAME}"),
            ),
        ],
        csv,
    )
        .into_response())
}

/// GET /health - readiness probe.
pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ready".to_string(),
        timestamp: generate_timestamp(),
    })
}

/// Fallback for unsupported methods on the API routes.
///
/// axum's default method fallback sends an empty 405; the API contract wants
/// a JSON error body instead.
pub(crate) async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// OPTIONS handler for the API routes.
///
/// CORS preflights (carrying `Access-Control-Request-Method`) are answered
/// by the CORS layer before reaching here; a bare OPTIONS falls through and
/// still gets an empty 200 rather than the method fallback's 405.
pub(crate) async fn preflight_ok() -> StatusCode {
    StatusCode::OK
}

//! Request and response types for the feedback API.

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /api/feedback`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub id: String,
}

/// JSON error body shared by every failure response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

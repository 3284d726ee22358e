//! HTTP error type for the feedback API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::types::ErrorBody;

/// Errors surfaced by the feedback API.
///
/// Malformed input and store failures both map to 500 with the underlying
/// message in the JSON body. Exposing the message to the caller is a known
/// information-disclosure tradeoff the API keeps.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Malformed(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Malformed(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::warn!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_is_405() {
        let resp = ApiError::MethodNotAllowed.into_response();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_malformed_is_500() {
        let resp = ApiError::Malformed("expected value at line 1".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_is_500() {
        let resp = ApiError::Internal(anyhow::anyhow!("store down")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, ErrorKind};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be decoded; the domain was not invoked.
    InvalidJson(JsonRejection),
    /// Domain logic error.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidJson(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    "INVALID_JSON",
                    "Invalid request body".to_string(),
                )
            }
            ApiError::Domain(err) => domain_error_to_response(err),
        };

        let body = serde_json::json!({ "error": { "code": code, "message": message } });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, &'static str, String) {
    match err.kind() {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string()),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT", err.to_string()),
        ErrorKind::Storage => {
            tracing::error!(error = %err, "internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error".to_string(),
            )
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection)
    }
}

//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Request contradicts current state
    Conflict(String),
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg)),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let (status, code) = match &e {
                    RepositoryError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    RepositoryError::ValidationError { .. } => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                    }
                    RepositoryError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
                    RepositoryError::ConnectionError { .. } => {
                        (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
                    }
                    RepositoryError::ConfigurationError { .. } => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
                    }
                };
                let context = e.context().to_string();
                let body = ApiError::new(code, e.message());
                let body = if context.is_empty() {
                    body
                } else {
                    body.with_details(context.trim().to_string())
                };
                (status, body)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();
        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.message);
        }
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;

    #[test]
    fn test_repository_errors_map_by_variant() {
        let ctx = || ErrorContext::new("test");
        let cases = [
            (RepositoryError::not_found_with_context("x", ctx()), StatusCode::NOT_FOUND),
            (RepositoryError::validation_with_context("x", ctx()), StatusCode::BAD_REQUEST),
            (RepositoryError::conflict_with_context("x", ctx()), StatusCode::CONFLICT),
            (RepositoryError::connection("x"), StatusCode::SERVICE_UNAVAILABLE),
            (
                RepositoryError::configuration_with_context("x", ctx()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let (status, _) = AppError::from(err).status_and_body();
            assert_eq!(status, expected);
        }
    }

    #[test]
    fn test_context_becomes_details() {
        let err = RepositoryError::conflict_with_context(
            "Game 3 is fully staffed",
            ErrorContext::new("assign_referee").with_entity("game"),
        );
        let (_, body) = AppError::from(err).status_and_body();
        assert_eq!(body.code, "CONFLICT");
        assert_eq!(body.message, "Game 3 is fully staffed");
        assert_eq!(
            body.details.as_deref(),
            Some("[operation=assign_referee, entity=game]")
        );
    }

    #[test]
    fn test_plain_variants() {
        let (status, body) = AppError::BadRequest("bad".into()).status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.details.is_none());
    }
}

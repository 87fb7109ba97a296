//! Unified error handling for the HTTP boundary.
//!
//! Maps the domain error taxonomy to transport responses. All failures
//! are request-scoped correctness checks: nothing here is retried, and a
//! denied actor receives no detail about whether the target exists.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use palisade_core::store::StoreError;
use palisade_core::validate::FieldErrors;

/// Application-level error type for the service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated (missing or malformed identity).
    #[error("Unauthorized")]
    Unauthorized,

    /// Caller failed an authorization predicate.
    #[error("Forbidden")]
    Forbidden,

    /// Per-field constraint violations.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Domain rule violation (e.g., an entirely empty profile).
    #[error("Invalid domain data: {0}")]
    InvalidDomainData(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side failures are tracked; client errors are not.
        if let Self::Store(
            inner @ (StoreError::Database(_) | StoreError::DataCorruption(_)),
        ) = &self
        {
            let event_id = sentry::capture_error(inner);
            tracing::error!(
                error = %inner,
                sentry_event_id = %event_id,
                "Request failed with store error"
            );
        }

        match self {
            Self::Store(StoreError::NotFound) => not_found("Entity does not exist"),
            Self::Store(StoreError::Conflict(message)) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Conflict", "message": message })),
            )
                .into_response(),
            Self::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
            Self::NotFound(message) => not_found(&message),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::Forbidden => StatusCode::FORBIDDEN.into_response(),
            Self::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            Self::InvalidDomainData(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Data Missing", "message": message })),
            )
                .into_response(),
        }
    }
}

fn not_found(message: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Data not found", "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn errors_map_to_expected_status_codes() {
        assert_eq!(
            status(AppError::NotFound("test".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status(AppError::Validation(FieldErrors::new())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::InvalidDomainData("test".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(AppError::Store(StoreError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status(AppError::Store(StoreError::DataCorruption(
                "test".to_owned()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

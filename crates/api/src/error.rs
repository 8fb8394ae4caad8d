use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracker_core::error::{CoreError, StoreError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tracker_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::FieldRequired { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "FIELD_REQUIRED",
                    core.to_string(),
                ),
                CoreError::InvalidField { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_FIELD",
                    core.to_string(),
                ),
                CoreError::InvalidIdentifier { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INVALID_IDENTIFIER",
                    core.to_string(),
                ),
                CoreError::ReferenceNotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    "REFERENCE_NOT_FOUND",
                    core.to_string(),
                ),
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Store(err) => classify_store_error(err),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Foreign key violations (a parent removed or a dependent added between
///   the integrity check and the write) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::ForeignKey(constraint) => (
            StatusCode::CONFLICT,
            "CONFLICT",
            format!("Operation violates foreign key constraint: {constraint}"),
        ),
        StoreError::Backend(source) => {
            tracing::error!(error = %source, "Store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

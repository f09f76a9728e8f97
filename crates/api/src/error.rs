use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use intake_core::error::CoreError;
use intake_store::StoreError;
use serde_json::json;

/// Message returned for any unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when the backing file does not exist.
pub const FILE_NOT_FOUND_MESSAGE: &str = "No Excel file found";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for storage
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `intake_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store operation failed. `context` is the client-facing message.
    #[error("{context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: StoreError,
    },

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Build a `map_err` adapter that tags a [`StoreError`] with the message
    /// the client should see.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { context, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(err) => (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    err.to_string(),
                ),
                CoreError::NoData => (
                    StatusCode::BAD_REQUEST,
                    "BAD_REQUEST",
                    core.to_string(),
                ),
            },

            // --- Store errors ---
            AppError::Storage { context, source } => classify_store_error(*context, source),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        error_response(status, code, message)
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - Everything else maps to 500 with the caller's generic message; the
///   underlying detail is only logged.
fn classify_store_error(
    context: &'static str,
    err: &StoreError,
) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            FILE_NOT_FOUND_MESSAGE.to_string(),
        ),
        other => {
            tracing::error!(error = %other, context, "Store error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                context.to_string(),
            )
        }
    }
}

/// Render the standard `{ "error": ..., "code": ... }` body.
pub fn error_response(status: StatusCode, code: &'static str, message: String) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });

    (status, axum::Json(body)).into_response()
}

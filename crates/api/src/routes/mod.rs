pub mod frontend;
pub mod health;
pub mod submissions;

use axum::http::StatusCode;
use axum::response::Response;

use crate::error::error_response;

/// Fallback for any unmatched path.
pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", "Endpoint not found".into())
}

/// Fallback for a known path called with the wrong method.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "METHOD_NOT_ALLOWED",
        "Method not allowed".into(),
    )
}

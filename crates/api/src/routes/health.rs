use std::sync::Arc;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

const RUNNING_MESSAGE: &str = "AI Solutions Request Server is running!";

/// Liveness payload shared by `/health` and `/api/status`.
#[derive(Serialize)]
pub struct StatusResponse {
    /// `healthy` on `/health`, `active` on `/api/status`.
    pub status: &'static str,
    pub message: &'static str,
    /// Configured backing file path.
    pub excel_file: String,
    /// Whether the backing file currently exists.
    pub file_exists: bool,
}

/// Check the backing file on the blocking pool, under the store lock.
///
/// Liveness never fails on a store problem; it is logged and reported as a
/// missing file.
async fn file_exists(state: &AppState) -> bool {
    let store = Arc::clone(&state.store);
    match tokio::task::spawn_blocking(move || store.exists()).await {
        Ok(Ok(exists)) => exists,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Could not check store file");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "Store check task failed");
            false
        }
    }
}

async fn status_response(state: &AppState, status: &'static str) -> StatusResponse {
    StatusResponse {
        status,
        message: RUNNING_MESSAGE,
        excel_file: state.config.excel_file_display(),
        file_exists: file_exists(state).await,
    }
}

/// GET /health -- liveness plus store existence.
async fn health_check(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(status_response(&state, "healthy").await)
}

/// GET /api/status -- status alias used by the front-end.
async fn api_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(status_response(&state, "active").await)
}

/// Mount the liveness routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/status", get(api_status))
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// Submission intake and read-back routes.
///
/// ```text
/// POST /submit          validate and append
/// GET  /stats           row count + freshness
/// GET  /view-data       full dump as JSON
/// GET  /download-excel  raw workbook download
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/submit", post(submissions::submit))
        .route("/stats", get(submissions::stats))
        .route("/view-data", get(submissions::view_data))
        .route("/download-excel", get(submissions::download_excel))
}

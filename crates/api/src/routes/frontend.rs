use std::path::Path;

use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::Response;
use axum::Router;
use tower_http::services::ServeFile;

use crate::state::AppState;

/// Static front-end files served from `static_dir`.
///
/// A missing file answers with the same JSON 404 as an unknown route.
pub fn router(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route_service("/style.css", ServeFile::new(static_dir.join("style.css")))
        .route_service("/script.js", ServeFile::new(static_dir.join("script.js")))
        .layer(map_response(json_not_found))
}

async fn json_not_found(response: Response) -> Response {
    if response.status() == StatusCode::NOT_FOUND {
        return super::not_found().await;
    }
    response
}

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use intake_api::config::ServerConfig;
use intake_api::router::build_app_router;
use intake_api::state::AppState;

/// Build a test `ServerConfig` whose store and static files live in `dir`.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        excel_file_path: dir.join("responses.xlsx"),
        static_dir: dir.to_path_buf(),
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
    }
}

/// A router plus the temp directory backing it.
///
/// Keep the `TempDir` alive for as long as the app is used.
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

impl TestApp {
    /// Fresh app with no backing file yet.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = test_config(dir.path());
        let state = AppState::new(config.clone());
        let router = build_app_router(state.clone(), &config);
        Self { dir, state, router }
    }

    /// Fresh app whose store has been initialized, as at server startup.
    pub fn initialized() -> Self {
        let app = Self::new();
        app.state.store.ensure_initialized().unwrap();
        app
    }

    pub fn excel_path(&self) -> PathBuf {
        self.dir.path().join("responses.xlsx")
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// A valid submission payload.
pub fn valid_submission() -> serde_json::Value {
    serde_json::json!({
        "userName": "Jane",
        "email": "jane@co.com",
        "employeeId": "E1",
        "tower": "EDI",
        "problem": "Knowledge chatbot",
        "businessBenefit": "saves time",
        "justification": "daily tickets",
    })
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

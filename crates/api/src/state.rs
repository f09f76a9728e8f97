use std::sync::Arc;

use intake_store::SubmissionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The single submission store; serializes its own file access.
    pub store: Arc<SubmissionStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let store = SubmissionStore::new(config.store_config());
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

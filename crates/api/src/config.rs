use std::path::PathBuf;

use intake_store::StoreConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Backing spreadsheet (default: `responses.xlsx`).
    pub excel_file_path: PathBuf,
    /// Directory holding the static front-end files (default: `.`).
    pub static_dir: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `HOST`                 | `0.0.0.0`        |
    /// | `PORT`                 | `5000`           |
    /// | `EXCEL_FILE_PATH`      | `responses.xlsx` |
    /// | `STATIC_DIR`           | `.`              |
    /// | `CORS_ORIGINS`         | `*`              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let excel_file_path = std::env::var("EXCEL_FILE_PATH")
            .unwrap_or_else(|_| "responses.xlsx".into())
            .into();

        let static_dir = std::env::var("STATIC_DIR")
            .unwrap_or_else(|_| ".".into())
            .into();

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            excel_file_path,
            static_dir,
            cors_origins,
            request_timeout_secs,
        }
    }

    /// Store settings derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.excel_file_path.clone())
    }

    /// Backing file path as shown in API responses.
    pub fn excel_file_display(&self) -> String {
        self.excel_file_path.display().to_string()
    }
}

//! HTTP server settings.

use serde::{Deserialize, Serialize};

/// Bind address, CORS and upload limits for the HTTP service.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port (`0` for auto-assign).
    pub port: u16,
    /// Origins allowed by CORS. Empty disables cross-origin access.
    pub cors_origins: Vec<String>,
    /// Largest accepted audio upload in bytes.
    pub max_upload_bytes: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

//! Server configuration.

use std::net::SocketAddr;

use prosody_settings::ServerSettings;
use serde::{Deserialize, Serialize};

/// Configuration for the HTTP server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `8000`, `0` for auto-assign).
    pub port: u16,
    /// Browser origins allowed by CORS.
    pub cors_origins: Vec<String>,
    /// Largest accepted audio upload in bytes.
    pub max_upload_bytes: u64,
}

impl ServerConfig {
    /// `host:port`, for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed bind address, if `host` is an IP literal.
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.bind_addr().parse().ok()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerSettings::default().into()
    }
}

impl From<ServerSettings> for ServerConfig {
    fn from(s: ServerSettings) -> Self {
        Self {
            host: s.host,
            port: s.port,
            cors_origins: s.cors_origins,
            max_upload_bytes: s.max_upload_bytes,
        }
    }
}

//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON file format
//! and implement [`Default`] with production values. Every struct is
//! `#[serde(default)]`, so a partial file only needs the keys it changes.

mod logging;
mod server;
mod transcription;

pub use logging::*;
pub use server::*;
pub use transcription::*;

use serde::{Deserialize, Serialize};

/// Root settings type for the pronunciation service.
///
/// ```json
/// {
///   "server": { "port": 8000 },
///   "transcription": { "baseUrl": "http://127.0.0.1:9000" },
///   "logging": { "level": "debug" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProsodySettings {
    /// Settings schema version.
    pub version: String,
    /// Application name.
    pub name: String,
    /// HTTP server settings.
    pub server: ServerSettings,
    /// Speech-recognition sidecar settings.
    pub transcription: TranscriptionSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for ProsodySettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            name: "prosody".to_string(),
            server: ServerSettings::default(),
            transcription: TranscriptionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ProsodySettings {
    /// Correct values that would leave the service unusable.
    ///
    /// Called automatically during loading. Invalid values are replaced with
    /// their defaults and a warning is logged rather than failing startup.
    pub fn validate(&mut self) {
        let defaults = ServerSettings::default();
        if self.server.max_upload_bytes == 0 {
            tracing::warn!(
                "maxUploadBytes is 0, restored to {}",
                defaults.max_upload_bytes
            );
            self.server.max_upload_bytes = defaults.max_upload_bytes;
        }
        if self.server.host.trim().is_empty() {
            tracing::warn!("server host is empty, restored to {}", defaults.host);
            self.server.host = defaults.host;
        }

        let t = &mut self.transcription;
        let transcription_defaults = TranscriptionSettings::default();
        if t.timeout_ms == 0 {
            tracing::warn!(
                "transcription timeoutMs is 0, restored to {}",
                transcription_defaults.timeout_ms
            );
            t.timeout_ms = transcription_defaults.timeout_ms;
        }
        while t.base_url.ends_with('/') {
            let _ = t.base_url.pop();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

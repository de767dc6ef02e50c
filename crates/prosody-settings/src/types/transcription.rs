//! Speech-recognition sidecar settings.

use serde::{Deserialize, Serialize};

/// Where the Whisper sidecar lives and which models it should use.
///
/// Plain transcription uses a small multilingual model; pronunciation
/// assessment uses a larger English model.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranscriptionSettings {
    /// Base URL of the OpenAI-compatible Whisper server.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Model for `/transcribe`.
    pub general_model: String,
    /// Model for pronunciation assessment.
    pub pronunciation_model: String,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9000".to_string(),
            timeout_ms: 120_000,
            general_model: "small".to_string(),
            pronunciation_model: "medium.en".to_string(),
        }
    }
}

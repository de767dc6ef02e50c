//! [`Transcriber`] over an OpenAI-compatible Whisper HTTP server.
//!
//! Audio is POSTed as multipart to `/v1/audio/transcriptions` (or
//! `/v1/audio/translations`) with `response_format=verbose_json`, which is the
//! only format that carries per-segment `avg_logprob`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use prosody_settings::TranscriptionSettings;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::language::normalize_language;
use crate::transcriber::Transcriber;
use crate::types::{
    ModelProfile, ResultExt, Segment, TaskKind, TranscribeRequest, TranscriptionError,
    TranscriptionResult,
};

/// Connection and model settings for [`WhisperSidecar`].
#[derive(Clone, Debug)]
pub struct SidecarConfig {
    /// Base URL without trailing slash, e.g. `http://127.0.0.1:9000`.
    pub base_url: String,
    /// Upper bound on one request, upload included.
    pub timeout: Duration,
    /// Model name for [`ModelProfile::General`].
    pub general_model: String,
    /// Model name for [`ModelProfile::Pronunciation`].
    pub pronunciation_model: String,
}

impl SidecarConfig {
    /// Model name configured for `profile`.
    pub fn model_for(&self, profile: ModelProfile) -> &str {
        match profile {
            ModelProfile::General => &self.general_model,
            ModelProfile::Pronunciation => &self.pronunciation_model,
        }
    }
}

impl From<&TranscriptionSettings> for SidecarConfig {
    fn from(s: &TranscriptionSettings) -> Self {
        Self {
            base_url: s.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(s.timeout_ms),
            general_model: s.general_model.clone(),
            pronunciation_model: s.pronunciation_model.clone(),
        }
    }
}

/// HTTP client for a Whisper sidecar.
#[derive(Clone, Debug)]
pub struct WhisperSidecar {
    client: reqwest::Client,
    config: SidecarConfig,
}

impl WhisperSidecar {
    /// Build a client with the configured timeout.
    pub fn new(config: SidecarConfig) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .request("build HTTP client")?;
        Ok(Self { client, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SidecarConfig {
        &self.config
    }

    fn endpoint(&self, task: TaskKind) -> String {
        let path = match task {
            TaskKind::Transcribe => "v1/audio/transcriptions",
            TaskKind::Translate => "v1/audio/translations",
        };
        format!("{}/{path}", self.config.base_url)
    }
}

#[async_trait]
impl Transcriber for WhisperSidecar {
    #[instrument(skip_all, fields(task = %req.task, file = %req.file_name))]
    async fn transcribe(
        &self,
        req: TranscribeRequest,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        let audio = tokio::fs::read(&req.audio_path).await?;
        let model = self.config.model_for(req.profile).to_string();
        debug!(bytes = audio.len(), %model, "sending audio to sidecar");

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(req.file_name.clone())
            .mime_str(mime_for(&req.file_name))
            .request("build multipart")?;
        let mut form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", model)
            .text("response_format", "verbose_json");
        if let Some(language) = req.language {
            form = form.text("language", language);
        }

        let url = self.endpoint(req.task);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .request(&format!("POST {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "sidecar rejected audio");
            return Err(TranscriptionError::Sidecar {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.request("read sidecar response")?;
        let result = parse_verbose_json(&bytes)?;
        debug!(
            language = ?result.language,
            segments = result.segments.len(),
            "sidecar transcription complete"
        );
        Ok(result)
    }
}

/// MIME type guessed from the file extension. The sidecar relies on it to
/// pick a decoder.
fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("m4a" | "mp4") => "audio/mp4",
        Some("ogg" | "oga") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "audio/wav",
    }
}

// ── verbose_json wire format ────────────────────────────────────────────────

/// Parse a Whisper `verbose_json` document.
///
/// Text is trimmed, the language label is folded to a code, and a `null`
/// segment list reads as empty.
pub fn parse_verbose_json(bytes: &[u8]) -> Result<TranscriptionResult, TranscriptionError> {
    let parsed: VerboseJson = serde_json::from_slice(bytes).decode("parse verbose_json")?;
    Ok(parsed.into_result())
}

#[derive(Debug, Deserialize)]
struct VerboseJson {
    #[serde(default)]
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    segments: Option<Vec<VerboseSegment>>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    avg_logprob: Option<f64>,
}

impl VerboseJson {
    fn into_result(self) -> TranscriptionResult {
        TranscriptionResult {
            text: self.text.trim().to_string(),
            language: self.language.as_deref().and_then(normalize_language),
            duration_seconds: self.duration,
            segments: self
                .segments
                .unwrap_or_default()
                .into_iter()
                .map(|s| Segment {
                    start: s.start,
                    end: s.end,
                    text: s.text.trim().to_string(),
                    avg_logprob: s.avg_logprob,
                })
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

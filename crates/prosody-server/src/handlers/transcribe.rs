//! `POST /transcribe`: plain transcription or translation.

use axum::Json;
use axum::extract::{Multipart, State};
use prosody_transcription::{ModelProfile, Segment, TaskKind, TranscribeRequest};
use serde::Serialize;
use tracing::info;

use crate::errors::ApiError;
use crate::server::AppState;
use crate::upload::AudioForm;

/// Response body for `/transcribe`.
#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    /// Name the client gave the upload.
    pub filename: Option<String>,
    /// Task that was run.
    pub task: TaskKind,
    /// Language hint the client sent.
    pub requested_language: Option<String>,
    /// Language the model reported.
    pub detected_language: Option<String>,
    /// Full transcript.
    pub text: String,
    /// Time-aligned segments.
    pub segments: Vec<Segment>,
}

/// Form fields: `file` (required), `language`, `task` (`transcribe` by
/// default, or `translate`).
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let form = AudioForm::read(multipart, state.max_upload_bytes).await?;

    let task = match form.text("task").map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t
            .parse::<TaskKind>()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?,
        None => TaskKind::default(),
    };
    let requested_language = form
        .text("language")
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    let request = TranscribeRequest::new(form.audio.path(), form.audio.service_name())
        .with_language(requested_language.clone())
        .with_task(task)
        .with_profile(ModelProfile::General);
    let result = state.transcriber.transcribe(request).await?;

    info!(
        %task,
        bytes = form.audio.size(),
        detected_language = ?result.language,
        "transcribed upload"
    );

    Ok(Json(TranscribeResponse {
        filename: form.audio.file_name().map(str::to_string),
        task,
        requested_language,
        detected_language: result.language,
        text: result.text,
        segments: result.segments,
    }))
}

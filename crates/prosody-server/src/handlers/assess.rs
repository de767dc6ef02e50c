//! `POST /assess_pronunciation`: score a read-aloud attempt.

use axum::Json;
use axum::extract::{Multipart, State};
use prosody_scoring::{AssessmentReport, ScoringContext, assess};
use prosody_transcription::{ModelProfile, TaskKind, TranscribeRequest, TranscriptionResult};
use tracing::info;

use crate::errors::ApiError;
use crate::server::AppState;
use crate::upload::AudioForm;

/// Form field holding the sentence the speaker was asked to read.
pub const TARGET_TEXT_FIELD: &str = "target_text";

/// Form fields: `file` and `target_text`, both required.
///
/// The audio goes to the pronunciation model with no language hint so the
/// detected language can gate scoring.
pub async fn assess_pronunciation(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AssessmentReport>, ApiError> {
    let form = AudioForm::read(multipart, state.max_upload_bytes).await?;
    let target_text = form.require_text(TARGET_TEXT_FIELD)?.to_string();

    let request = TranscribeRequest::new(form.audio.path(), form.audio.service_name())
        .with_task(TaskKind::Transcribe)
        .with_profile(ModelProfile::Pronunciation);
    let result = state.transcriber.transcribe(request).await?;

    let report = assess(scoring_context(target_text, result));
    info!(
        score_percent = report.score_percent,
        feedback = %report.feedback,
        "assessed pronunciation"
    );
    Ok(Json(report))
}

/// Scoring input for `target_text` from a finished transcription.
pub fn scoring_context(
    target_text: impl Into<String>,
    result: TranscriptionResult,
) -> ScoringContext {
    let confidences = result.confidences();
    let mut context = ScoringContext::new(target_text, result.text).with_confidences(confidences);
    context.detected_language = result.language;
    context
}

//! `prosody score`: assess a saved transcript without a model service.

use std::path::Path;

use anyhow::{Context, Result};
use prosody_scoring::{AssessmentReport, assess};
use prosody_server::handlers::scoring_context;
use prosody_transcription::parse_verbose_json;

/// Score `target` against a Whisper `verbose_json` document.
pub fn score_transcript(target: &str, transcript: &[u8]) -> Result<AssessmentReport> {
    let result = parse_verbose_json(transcript).context("Transcript is not valid verbose_json")?;
    Ok(assess(scoring_context(target, result)))
}

/// Read `path`, score it and render the report as pretty JSON.
pub fn score_file(target: &str, path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read transcript: {}", path.display()))?;
    let report = score_transcript(target, &bytes)?;
    serde_json::to_string_pretty(&report).context("Failed to render report")
}

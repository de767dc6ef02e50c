//! Core types for speech recognition requests and results.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

/// Log-probability substituted for a segment that reports none.
pub const MISSING_SEGMENT_LOGPROB: f64 = -5.0;

/// What the model should produce from the audio.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Text in the language that was spoken.
    #[default]
    Transcribe,
    /// English text regardless of the spoken language.
    Translate,
}

impl TaskKind {
    /// Wire name of the task.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transcribe => "transcribe",
            Self::Translate => "translate",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = TranscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "transcribe" => Ok(Self::Transcribe),
            "translate" => Ok(Self::Translate),
            other => Err(TranscriptionError::InvalidTask(other.to_string())),
        }
    }
}

/// Which configured model handles a request.
///
/// General transcription uses a multilingual model; pronunciation assessment
/// uses an English-only model that reports steadier confidences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModelProfile {
    /// Multilingual model for plain transcription.
    #[default]
    General,
    /// English model for pronunciation assessment.
    Pronunciation,
}

/// One recognition job.
#[derive(Clone, Debug)]
pub struct TranscribeRequest {
    /// Audio on local disk.
    pub audio_path: PathBuf,
    /// Name to present to the model service; its extension names the format.
    pub file_name: String,
    /// Language hint. `None` lets the model detect it.
    pub language: Option<String>,
    /// Transcribe or translate.
    pub task: TaskKind,
    /// Which model to use.
    pub profile: ModelProfile,
}

impl TranscribeRequest {
    /// Plain transcription of `audio_path` with the general model.
    pub fn new(audio_path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            audio_path: audio_path.into(),
            file_name: file_name.into(),
            language: None,
            task: TaskKind::Transcribe,
            profile: ModelProfile::General,
        }
    }

    /// Set the language hint. Blank hints are dropped.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    /// Set the task.
    #[must_use]
    pub fn with_task(mut self, task: TaskKind) -> Self {
        self.task = task;
        self
    }

    /// Set the model profile.
    #[must_use]
    pub fn with_profile(mut self, profile: ModelProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// A time-aligned piece of the transcript.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    /// Recognized text for this span.
    pub text: String,
    /// Average token log-probability, when the model reports one.
    #[serde(skip)]
    pub avg_logprob: Option<f64>,
}

/// Result of transcribing an audio file.
#[derive(Clone, Debug, Default)]
pub struct TranscriptionResult {
    /// The transcribed text.
    pub text: String,
    /// Detected language code (e.g. "en"), if the model reported one.
    pub language: Option<String>,
    /// Duration of the audio in seconds.
    pub duration_seconds: Option<f64>,
    /// Time-aligned segments.
    pub segments: Vec<Segment>,
}

impl TranscriptionResult {
    /// Per-segment log-probabilities in segment order.
    ///
    /// Segments without a value contribute [`MISSING_SEGMENT_LOGPROB`].
    pub fn confidences(&self) -> Vec<f64> {
        self.segments
            .iter()
            .map(|s| s.avg_logprob.unwrap_or(MISSING_SEGMENT_LOGPROB))
            .collect()
    }
}

/// Errors that can occur during transcription.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    /// The model service could not be reached or timed out.
    #[error("transcription request failed: {0}")]
    Request(String),

    /// The model service answered with a non-success status.
    #[error("transcription service returned {status}: {body}")]
    Sidecar {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The model service reply could not be understood.
    #[error("transcription decode error: {0}")]
    Decode(String),

    /// Unknown task name.
    #[error("invalid task '{0}', expected 'transcribe' or 'translate'")]
    InvalidTask(String),

    /// I/O error (file read).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extension trait to reduce `.map_err()` boilerplate when wrapping errors
/// into [`TranscriptionError`].
pub trait ResultExt<T> {
    /// Wrap the error as [`TranscriptionError::Request`] with `context` prefix.
    fn request(self, context: &str) -> Result<T, TranscriptionError>;
    /// Wrap the error as [`TranscriptionError::Decode`] with `context` prefix.
    fn decode(self, context: &str) -> Result<T, TranscriptionError>;
}

impl<T, E: fmt::Display> ResultExt<T> for Result<T, E> {
    fn request(self, context: &str) -> Result<T, TranscriptionError> {
        self.map_err(|e| TranscriptionError::Request(format!("{context}: {e}")))
    }
    fn decode(self, context: &str) -> Result<T, TranscriptionError> {
        self.map_err(|e| TranscriptionError::Decode(format!("{context}: {e}")))
    }
}

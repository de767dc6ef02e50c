//! # prosody-transcription
//!
//! Speech recognition behind a trait seam.
//!
//! The HTTP layer depends on [`Transcriber`] rather than a concrete model,
//! so request handling and scoring never touch inference code. The shipped
//! implementation, [`WhisperSidecar`], forwards audio to an OpenAI-compatible
//! Whisper server and maps its `verbose_json` reply into a
//! [`TranscriptionResult`].
//!
//! ```text
//! audio file ──▶ Transcriber::transcribe ──▶ TranscriptionResult
//!                                              ├─ text
//!                                              ├─ language ("en")
//!                                              └─ segments[].avg_logprob
//! ```

#![deny(unsafe_code)]

pub mod language;
pub mod sidecar;
pub mod transcriber;
pub mod types;

pub use language::normalize_language;
pub use sidecar::{SidecarConfig, WhisperSidecar, parse_verbose_json};
pub use transcriber::Transcriber;
pub use types::{
    ModelProfile, ResultExt, Segment, TaskKind, TranscribeRequest, TranscriptionError,
    TranscriptionResult,
};

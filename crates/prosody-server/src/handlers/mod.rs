//! Request handlers for the audio routes.

pub mod assess;
pub mod transcribe;

pub use assess::{assess_pronunciation, scoring_context};
pub use transcribe::{TranscribeResponse, transcribe};

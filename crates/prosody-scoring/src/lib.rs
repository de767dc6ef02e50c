//! # prosody-scoring
//!
//! Pronunciation scoring engine. Compares the text a speaker was asked to read
//! with the text a speech-recognition model heard, and blends word accuracy
//! with model confidence into a single score plus feedback.
//!
//! # Architecture
//!
//! ```text
//! target text ─┐
//!              ├→ normalize → wer_score ─────────┐
//! recognized ──┘                                 ├→ score → ScoringResult → AssessmentReport
//! segment log-probs → rescale_confidence ────────┘
//! ```
//!
//! Every function in this crate is pure and synchronous: no I/O, no shared
//! state, safe to call from any number of threads or tasks at once.
//!
//! ## Crate Position
//!
//! Standalone (no prosody crate dependencies).
//! Depended on by: prosody-server, prosody-agent.

#![deny(unsafe_code)]

pub mod confidence;
pub mod engine;
pub mod feedback;
pub mod normalize;
pub mod report;
pub mod wer;

pub use confidence::{FALLBACK_LOGPROB, clamp_unit, rescale_confidence};
pub use engine::{ScoringContext, ScoringResult, score};
pub use feedback::Feedback;
pub use normalize::normalize;
pub use report::AssessmentReport;
pub use wer::wer_score;

/// Score a context and flatten the outcome into the wire report.
pub fn assess(context: ScoringContext) -> AssessmentReport {
    let result = score(&context);
    AssessmentReport::new(context, result)
}

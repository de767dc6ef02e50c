//! The model service seam.

use async_trait::async_trait;

use crate::types::{TranscribeRequest, TranscriptionError, TranscriptionResult};

/// Turns an audio file into text, a detected language and per-segment
/// confidences.
///
/// Implementations must be shareable across request handlers; the server
/// holds one behind an `Arc<dyn Transcriber>`.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Run recognition on the audio at `req.audio_path`.
    async fn transcribe(
        &self,
        req: TranscribeRequest,
    ) -> Result<TranscriptionResult, TranscriptionError>;
}

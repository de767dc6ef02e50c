//! HTTP error type and its JSON body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prosody_transcription::TranscriptionError;
use serde::Serialize;

// ── Error code constants ────────────────────────────────────────────

/// Malformed or incomplete request.
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
/// Upload exceeds the configured limit.
pub const PAYLOAD_TOO_LARGE: &str = "PAYLOAD_TOO_LARGE";
/// The speech model service failed.
pub const TRANSCRIPTION_ERROR: &str = "TRANSCRIPTION_ERROR";
/// Unexpected internal error.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed form fields.
    #[error("{0}")]
    InvalidRequest(String),

    /// Upload larger than `maxUploadBytes`.
    #[error("upload exceeds {limit} bytes")]
    PayloadTooLarge {
        /// Configured limit.
        limit: u64,
    },

    /// Recognition failed.
    #[error("{0}")]
    Transcription(#[from] TranscriptionError),

    /// Anything else, e.g. temp file I/O.
    #[error("{0}")]
    Internal(String),
}

/// Wire form of an error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub detail: String,
    /// Machine-readable code.
    pub code: &'static str,
}

impl ApiError {
    /// Machine-readable error code for this variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => INVALID_REQUEST,
            Self::PayloadTooLarge { .. } => PAYLOAD_TOO_LARGE,
            Self::Transcription(_) => TRANSCRIPTION_ERROR,
            Self::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// HTTP status for this variant.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Transcription(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the wire-format error body.
    pub fn to_error_body(&self) -> ErrorBody {
        ErrorBody {
            detail: self.to_string(),
            code: self.code(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(format!("temporary file error: {e}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }
        (status, Json(self.to_error_body())).into_response()
    }
}

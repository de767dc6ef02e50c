//! Multipart form reading with the audio spooled to a temp file.
//!
//! The `file` part is streamed to a [`NamedTempFile`] whose suffix is the
//! upload's extension, so the model service can tell the container format
//! from the name. The file lives exactly as long as the [`AudioForm`]; it is
//! deleted on drop whichever way the handler exits.

use std::collections::HashMap;
use std::path::Path;

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::errors::ApiError;

/// Form field carrying the audio.
pub const FILE_FIELD: &str = "file";

/// Extension used when the upload has none.
pub const DEFAULT_SUFFIX: &str = ".wav";

/// Audio spooled to disk.
#[derive(Debug)]
pub struct UploadedAudio {
    file: NamedTempFile,
    file_name: Option<String>,
    size: u64,
}

impl UploadedAudio {
    /// Location of the spooled audio.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Name the client gave the upload, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Bytes written.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Name to present to the model service: the client's name, or the
    /// temp file's own name when the client sent none.
    pub fn service_name(&self) -> String {
        self.file_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                self.file
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| format!("audio{DEFAULT_SUFFIX}"))
    }
}

/// A parsed multipart form: one audio upload plus text fields.
#[derive(Debug)]
pub struct AudioForm {
    /// The `file` part.
    pub audio: UploadedAudio,
    fields: HashMap<String, String>,
}

impl AudioForm {
    /// Read the whole form, spooling `file` to disk.
    ///
    /// Fails with [`ApiError::PayloadTooLarge`] once the audio passes
    /// `limit` bytes, and with [`ApiError::InvalidRequest`] when `file` is
    /// missing or repeated.
    pub async fn read(mut multipart: Multipart, limit: u64) -> Result<Self, ApiError> {
        let mut audio = None;
        let mut fields = HashMap::new();

        while let Some(mut field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(&e, limit))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == FILE_FIELD {
                if audio.is_some() {
                    return Err(ApiError::InvalidRequest(format!(
                        "duplicate field '{FILE_FIELD}'"
                    )));
                }
                let file_name = field.file_name().map(str::to_string);
                let file = tempfile::Builder::new()
                    .prefix("prosody-")
                    .suffix(&suffix_for(file_name.as_deref()))
                    .tempfile()?;
                let mut out = tokio::fs::File::from_std(file.reopen()?);

                let mut size: u64 = 0;
                while let Some(chunk) = field
                    .chunk()
                    .await
                    .map_err(|e| multipart_error(&e, limit))?
                {
                    size += chunk.len() as u64;
                    if size > limit {
                        return Err(ApiError::PayloadTooLarge { limit });
                    }
                    out.write_all(&chunk).await?;
                }
                out.flush().await?;

                debug!(size, file_name = ?file_name, path = ?file.path(), "upload spooled");
                audio = Some(UploadedAudio {
                    file,
                    file_name,
                    size,
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&e, limit))?;
                let _ = fields.insert(name, value);
            }
        }

        let audio = audio.ok_or_else(|| {
            ApiError::InvalidRequest(format!("missing required field '{FILE_FIELD}'"))
        })?;
        Ok(Self { audio, fields })
    }

    /// Value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Value of a required text field.
    pub fn require_text(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::InvalidRequest(format!("missing required field '{name}'")))
    }
}

/// Temp file suffix for an upload name: its extension, or `.wav`.
pub fn suffix_for(file_name: Option<&str>) -> String {
    file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map_or_else(|| DEFAULT_SUFFIX.to_string(), |e| format!(".{e}"))
}

fn multipart_error(e: &MultipartError, limit: u64) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge { limit }
    } else {
        ApiError::InvalidRequest(format!("malformed multipart body: {}", e.body_text()))
    }
}

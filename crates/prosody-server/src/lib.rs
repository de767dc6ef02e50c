//! # prosody-server
//!
//! Axum HTTP surface for the pronunciation service.
//!
//! - `GET /health`: liveness and uptime
//! - `POST /transcribe`: multipart audio → transcript with segments
//! - `POST /assess_pronunciation`: multipart audio + target sentence →
//!   [`prosody_scoring::AssessmentReport`]
//!
//! Speech recognition is injected as an `Arc<dyn Transcriber>`, so the
//! router can be exercised in tests without a model service.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod server;
pub mod upload;

pub use config::ServerConfig;
pub use errors::ApiError;
pub use server::{AppState, ProsodyServer};

//! `ProsodyServer`: Axum router, shared state and serving.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, Method};
use axum::response::Json;
use axum::routing::{get, post};
use prosody_transcription::Transcriber;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::handlers;
use crate::health::{self, HealthResponse};

/// Room for multipart boundaries and text fields on top of the audio limit.
const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Speech recognition backend.
    pub transcriber: Arc<dyn Transcriber>,
    /// When the server started.
    pub start_time: Instant,
    /// Largest accepted audio upload in bytes.
    pub max_upload_bytes: u64,
}

/// The pronunciation HTTP server.
pub struct ProsodyServer {
    config: ServerConfig,
    transcriber: Arc<dyn Transcriber>,
    start_time: Instant,
}

impl ProsodyServer {
    /// Create a new server.
    pub fn new(config: ServerConfig, transcriber: Arc<dyn Transcriber>) -> Self {
        Self {
            config,
            transcriber,
            start_time: Instant::now(),
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the Axum router with all routes and layers.
    pub fn router(&self) -> Router {
        let state = AppState {
            transcriber: Arc::clone(&self.transcriber),
            start_time: self.start_time,
            max_upload_bytes: self.config.max_upload_bytes,
        };
        let body_limit = usize::try_from(
            self.config
                .max_upload_bytes
                .saturating_add(FORM_OVERHEAD_BYTES),
        )
        .unwrap_or(usize::MAX);

        Router::new()
            .route("/health", get(health_handler))
            .route("/transcribe", post(handlers::transcribe))
            .route("/assess_pronunciation", post(handlers::assess_pronunciation))
            .layer(DefaultBodyLimit::max(body_limit))
            .layer(cors_layer(&self.config.cors_origins))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            info!(%addr, "prosody server listening");
        }
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// CORS restricted to `origins`. Unparseable entries are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(%origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}

//! # prosody
//!
//! Pronunciation service binary. Wires settings, logging, the Whisper sidecar
//! client and the HTTP server together, and offers an offline scorer for
//! saved transcripts.

#![deny(unsafe_code)]

mod logging;
mod score;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use prosody_server::{ProsodyServer, ServerConfig};
use prosody_settings::{LoggingSettings, ProsodySettings};
use prosody_transcription::{SidecarConfig, WhisperSidecar};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// English pronunciation assessment.
#[derive(Parser, Debug)]
#[command(name = "prosody", version, about = "English pronunciation assessment service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service (default).
    Serve(ServeArgs),
    /// Score a saved Whisper `verbose_json` transcript and print the report.
    Score(ScoreArgs),
}

impl Default for Command {
    fn default() -> Self {
        Self::Serve(ServeArgs::default())
    }
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, 0 for auto-assign (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// Settings file (default `~/.prosody/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl ServeArgs {
    fn settings_path(&self) -> PathBuf {
        self.settings
            .clone()
            .unwrap_or_else(prosody_settings::settings_path)
    }

    /// Command-line flags take priority over file and env values.
    fn apply(&self, settings: &mut ProsodySettings) {
        if let Some(host) = &self.host {
            settings.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
    }
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Sentence the speaker was asked to read.
    #[arg(long)]
    target: String,

    /// Path to the saved `verbose_json` transcript.
    #[arg(long)]
    transcript: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or_default() {
        Command::Serve(args) => serve(args).await,
        Command::Score(args) => {
            logging::init_subscriber(&LoggingSettings::default());
            let rendered = score::score_file(&args.target, &args.transcript)?;
            println!("{rendered}");
            Ok(())
        }
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let path = args.settings_path();
    let mut settings = prosody_settings::load_settings_from_path(&path)
        .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    args.apply(&mut settings);

    logging::init_subscriber(&settings.logging);
    info!(
        settings = %path.display(),
        sidecar = %settings.transcription.base_url,
        "starting prosody"
    );

    let sidecar = WhisperSidecar::new(SidecarConfig::from(&settings.transcription))
        .context("Failed to build transcription client")?;
    let config = ServerConfig::from(settings.server.clone());
    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;

    if prosody_settings::init_settings(settings).is_err() {
        warn!("global settings were already initialized");
    }

    ProsodyServer::new(config, Arc::new(sidecar))
        .serve(listener, shutdown_signal())
        .await
        .context("Server error")?;

    info!("prosody stopped");
    Ok(())
}

/// Resolves on Ctrl-C. If the signal handler cannot be installed, never
/// resolves.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["prosody"]).unwrap();
        assert!(cli.command.is_none());
        assert!(matches!(Command::default(), Command::Serve(_)));
    }

    #[test]
    fn serve_flags_parse() {
        let cli =
            Cli::try_parse_from(["prosody", "serve", "--host", "0.0.0.0", "--port", "9001"])
                .unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(9001));
        assert!(args.settings.is_none());
    }

    #[test]
    fn score_requires_both_flags() {
        assert!(Cli::try_parse_from(["prosody", "score", "--target", "hi"]).is_err());
        let cli = Cli::try_parse_from([
            "prosody",
            "score",
            "--target",
            "hi there",
            "--transcript",
            "take.json",
        ])
        .unwrap();
        let Some(Command::Score(args)) = cli.command else {
            panic!("expected score");
        };
        assert_eq!(args.target, "hi there");
        assert_eq!(args.transcript, PathBuf::from("take.json"));
    }

    #[test]
    fn flags_override_settings() {
        let args = ServeArgs {
            host: Some("0.0.0.0".into()),
            port: Some(0),
            settings: None,
        };
        let mut settings = ProsodySettings::default();
        args.apply(&mut settings);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 0);
    }

    #[test]
    fn absent_flags_keep_settings() {
        let mut settings = ProsodySettings::default();
        ServeArgs::default().apply(&mut settings);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8000);
    }

    #[test]
    fn explicit_settings_path_wins() {
        let args = ServeArgs {
            settings: Some(PathBuf::from("/etc/prosody.json")),
            ..ServeArgs::default()
        };
        assert_eq!(args.settings_path(), PathBuf::from("/etc/prosody.json"));
    }

    #[tokio::test]
    async fn server_graceful_shutdown() {
        let settings = ProsodySettings::default();
        let sidecar = WhisperSidecar::new(SidecarConfig::from(&settings.transcription)).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = ProsodyServer::new(ServerConfig::default(), Arc::new(sidecar));
        let handle = tokio::spawn(server.serve(listener, async move {
            let _ = rx.await;
        }));
        tx.send(()).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("shutdown timed out")
            .unwrap();
        assert!(result.is_ok());
    }
}

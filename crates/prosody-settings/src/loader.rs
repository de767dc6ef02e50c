//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ProsodySettings::default()`]
//! 2. If the settings file exists, deep-merge its values over the defaults
//! 3. Apply `PROSODY_*` environment overrides (highest priority)
//! 4. [`ProsodySettings::validate`] repairs unusable values
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::{LogLevel, ProsodySettings};

/// Resolve the default settings file path (`~/.prosody/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".prosody").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<ProsodySettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. A file with invalid JSON is an error.
pub fn load_settings_from_path(path: &Path) -> Result<ProsodySettings> {
    let mut settings = load_file_layers(path)?;
    apply_env_overrides(&mut settings);
    settings.validate();
    Ok(settings)
}

/// Defaults merged with the file at `path`, without env overrides.
fn load_file_layers(path: &Path) -> Result<ProsodySettings> {
    let defaults = serde_json::to_value(ProsodySettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    Ok(serde_json::from_value(merged)?)
}

/// Recursive deep merge of two JSON values.
///
/// - Objects are merged recursively (source overrides target per-key)
/// - Arrays and primitives are replaced entirely by source
/// - Null values in source are skipped (preserving target)
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply environment variable overrides to loaded settings.
///
/// Each env var is parsed strictly; invalid values are ignored with a
/// warning and the file/default value is kept.
pub fn apply_env_overrides(settings: &mut ProsodySettings) {
    apply_overrides_from(settings, |name| std::env::var(name).ok());
}

/// Apply overrides using `lookup` as the variable source.
///
/// Split out from [`apply_env_overrides`] so tests need not mutate the
/// process environment.
pub fn apply_overrides_from<F>(settings: &mut ProsodySettings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let env = EnvReader { lookup };

    // ── Server ──────────────────────────────────────────────────────
    if let Some(v) = env.string("PROSODY_HOST") {
        settings.server.host = v;
    }
    if let Some(v) = env.u16_in("PROSODY_PORT", 0, 65535) {
        settings.server.port = v;
    }
    if let Some(v) = env.u64_in("PROSODY_MAX_UPLOAD_BYTES", 1024, 1_073_741_824) {
        settings.server.max_upload_bytes = v;
    }

    // ── Transcription sidecar ───────────────────────────────────────
    if let Some(v) = env.string("PROSODY_TRANSCRIBE_URL") {
        settings.transcription.base_url = v;
    }
    if let Some(v) = env.u64_in("PROSODY_TRANSCRIBE_TIMEOUT_MS", 1000, 3_600_000) {
        settings.transcription.timeout_ms = v;
    }
    if let Some(v) = env.string("PROSODY_GENERAL_MODEL") {
        settings.transcription.general_model = v;
    }
    if let Some(v) = env.string("PROSODY_PRONUNCIATION_MODEL") {
        settings.transcription.pronunciation_model = v;
    }

    // ── Logging ─────────────────────────────────────────────────────
    if let Some(v) = env.log_level("PROSODY_LOG_LEVEL") {
        settings.logging.level = v;
    }
    if let Some(v) = env.bool("PROSODY_LOG_JSON") {
        settings.logging.json = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a boolean.
///
/// Accepts (case-insensitive): `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`.
pub fn parse_bool(val: &str) -> Option<bool> {
    match val.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a string as a `u16` within a range.
pub fn parse_u16_range(val: &str, min: u16, max: u16) -> Option<u16> {
    let n: u16 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

struct EnvReader<F> {
    lookup: F,
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|v| !v.is_empty())
    }

    fn bool(&self, name: &str) -> Option<bool> {
        let val = (self.lookup)(name)?;
        let result = parse_bool(&val);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid boolean env var, ignoring");
        }
        result
    }

    fn u16_in(&self, name: &str, min: u16, max: u16) -> Option<u16> {
        let val = (self.lookup)(name)?;
        let result = parse_u16_range(&val, min, max);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid u16 env var, ignoring");
        }
        result
    }

    fn u64_in(&self, name: &str, min: u64, max: u64) -> Option<u64> {
        let val = (self.lookup)(name)?;
        let result = parse_u64_range(&val, min, max);
        if result.is_none() {
            tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
        }
        result
    }

    fn log_level(&self, name: &str) -> Option<LogLevel> {
        let val = (self.lookup)(name)?;
        match val.parse() {
            Ok(level) => Some(level),
            Err(e) => {
                tracing::warn!(key = name, error = %e, "invalid log level env var, ignoring");
                None
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

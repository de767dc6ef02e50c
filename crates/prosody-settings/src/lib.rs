//! # prosody-settings
//!
//! Layered configuration for the pronunciation service.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`ProsodySettings::default()`]
//! 2. **User file**: `~/.prosody/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `PROSODY_*` overrides (highest priority)
//!
//! The binary usually loads an explicit path once at startup and hands the
//! result to [`init_settings`]; library code reads it back with
//! [`get_settings`].

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{
    apply_env_overrides, deep_merge, load_settings, load_settings_from_path, settings_path,
};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<ProsodySettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call without a prior [`init_settings`], loads from the default
/// path with env overrides, falling back to compiled defaults if the file
/// is unreadable.
pub fn get_settings() -> &'static ProsodySettings {
    SETTINGS.get_or_init(|| match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            ProsodySettings::default()
        }
    })
}

/// Initialize the global settings with a specific value.
///
/// # Errors
///
/// Returns the provided settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: ProsodySettings) -> std::result::Result<(), ProsodySettings> {
    SETTINGS.set(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = ProsodySettings::default();
        let path = settings_path();
        assert!(path.ends_with(".prosody/settings.json"));
    }

    #[test]
    fn init_then_get_returns_same_value() {
        let mut settings = ProsodySettings::default();
        settings.server.port = 8765;
        // Only this test touches the global.
        assert!(init_settings(settings).is_ok());
        assert_eq!(get_settings().server.port, 8765);

        let again = init_settings(ProsodySettings::default());
        assert!(again.is_err());
        assert_eq!(get_settings().server.port, 8765);
    }
}

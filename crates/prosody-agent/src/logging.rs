//! Tracing subscriber setup.

use prosody_settings::LoggingSettings;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber on stderr.
///
/// `RUST_LOG` wins over the configured level. Calling this more than once is
/// harmless; later calls are ignored.
pub fn init_subscriber(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_filter_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    // set_global_default is a no-op if already set
    let _ = if settings.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}

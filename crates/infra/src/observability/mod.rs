//! Logging setup
//!
//! One `tracing` subscriber per process, filtered by `RUST_LOG` when set and
//! by the configured level otherwise.

use std::sync::Once;

use attrsync_domain::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise the global subscriber. Later calls are no-ops.
///
/// # Example
///
/// ```rust
/// use attrsync_domain::LoggingConfig;
/// use attrsync_infra::observability::init_logging;
///
/// init_logging(&LoggingConfig::default());
/// ```
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let env_filter = env_filter(&config.level);

        match config.format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_current_span(true))
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_target(false))
                    .init();
            }
        }
    });
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

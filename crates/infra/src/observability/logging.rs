//! Tracing subscriber setup.

use fieldpulse_domain::{FieldPulseError, LoggingConfig, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Build the event filter.
///
/// `RUST_LOG` wins when set; otherwise the configured level is used as the
/// filter directive. An unparsable configured level falls back to `info`.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global tracing subscriber.
///
/// # Errors
/// Returns `FieldPulseError::Internal` if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(config));

    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(false)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| FieldPulseError::Internal(format!("tracing init failed: {e}")))?;

    tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
    Ok(())
}

//! Logging for tally
//!
//! Structured logging via the `tracing` ecosystem. The subscriber is
//! installed once at startup and stays for the process lifetime.

use tally_config::{LogConfig, LogFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber from configuration
///
/// Without a `[log]` section, records go to stdout in the pretty format
/// with the fallback filter.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(config: Option<&LogConfig>, fallback_filter: &str) -> anyhow::Result<()> {
    let directives = config.map_or(fallback_filter, |log| log.filter.as_str());
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match config.map_or(LogFormat::Pretty, |log| log.format) {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(false);
            registry.with(fmt_layer).try_init()?;
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            registry.with(fmt_layer).try_init()?;
        }
    }

    Ok(())
}

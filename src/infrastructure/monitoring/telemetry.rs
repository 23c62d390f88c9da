//! Telemetry initialization
//!
//! Sets up the global tracing subscriber with the configured level and
//! output format.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize global tracing with the specified log level and format
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = Registry::default().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        "compact" => {
            registry
                .with(fmt::layer().compact().with_target(false))
                .init();
        }
        _ => {
            // Default pretty format
            registry
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    Ok(())
}

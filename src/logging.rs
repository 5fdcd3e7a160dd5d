//! Log output setup.
//!
//! Logs go to stderr so stdout stays clean for command output.
//! `PROPLAN_LOG` takes an `EnvFilter` directive; the default only shows warnings.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogFormat;

/// Environment variable holding the filter directive.
pub const LOG_ENV: &str = "PROPLAN_LOG";

/// Install the global subscriber. Call once, early in `main`.
pub fn init(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

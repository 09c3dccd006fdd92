//! Logging bootstrap.
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured default level when present.

#[cfg(feature = "telemetry")]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{StrataError, StrataResult};
use std::str::FromStr;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(StrataError::Configuration(format!(
                "Unknown log format '{}'",
                other
            ))),
        }
    }
}

/// Builds the default filter directive for the given level.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("{level},strata=debug,tower_http=debug")
}

/// Initialize the global subscriber.
#[cfg(feature = "telemetry")]
pub fn init_logging(level: &str, format: LogFormat) -> StrataResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(level)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init(),
    };

    result.map_err(|e| StrataError::Internal(format!("Failed to install subscriber: {}", e)))
}

/// Placeholder for when telemetry feature is disabled.
#[cfg(not(feature = "telemetry"))]
pub fn init_logging(_level: &str, _format: LogFormat) -> StrataResult<()> {
    Ok(())
}

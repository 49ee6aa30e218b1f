//! Initializes the global tracing subscriber from the `logger` configuration.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

use crate::{config, Error, Result};

// Crates whose events are shown at the configured level unless
// `override_filter` says otherwise.
const MODULE_WHITELIST: &[&str] = &["vetclinic", "tower_http", "sea_orm_migration", "sqlx::query"];

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum LogLevel {
    /// The "off" level.
    #[serde(rename = "off")]
    Off,
    /// The "trace" level.
    #[serde(rename = "trace")]
    Trace,
    /// The "debug" level.
    #[serde(rename = "debug")]
    Debug,
    /// The "info" level.
    #[serde(rename = "info")]
    #[default]
    Info,
    /// The "warn" level.
    #[serde(rename = "warn")]
    Warn,
    /// The "error" level.
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum Format {
    #[serde(rename = "compact")]
    #[default]
    Compact,
    #[serde(rename = "pretty")]
    Pretty,
    #[serde(rename = "json")]
    Json,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            Self::Off => "off",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(level)
    }
}

/// Builds the filter directives for the whitelisted crates.
#[must_use]
pub fn default_filter(level: LogLevel) -> String {
    MODULE_WHITELIST
        .iter()
        .map(|module| format!("{module}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn env_filter(config: &config::Logger) -> Result<EnvFilter> {
    if let Some(directives) = &config.override_filter {
        return EnvFilter::try_new(directives)
            .map_err(|err| Error::Logger(format!("invalid override_filter: {err}")));
    }
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(config.level)))
        .map_err(|err| Error::Logger(format!("invalid log filter: {err}")))
}

/// Installs the global subscriber.
///
/// Does nothing when `enable` is false. Calling it a second time is not an
/// error: the first subscriber stays in place.
///
/// # Errors
/// Returns an error when the configured filter directives cannot be parsed.
pub fn init(config: &config::Logger) -> Result<()> {
    if !config.enable {
        return Ok(());
    }

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        Format::Compact => fmt::layer().compact().with_ansi(true).boxed(),
        Format::Pretty => fmt::layer().pretty().with_ansi(true).boxed(),
        Format::Json => fmt::layer().json().with_ansi(false).boxed(),
    };
    let filter = env_filter(config)?;

    if let Err(err) = tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
    {
        tracing::debug!(error = %err, "logger_already_initialized");
    }
    Ok(())
}

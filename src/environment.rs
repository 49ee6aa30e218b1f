//! Deployment environments and the configuration file each one loads.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{config::Config, Result};

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const ENV_VAR: &str = "VETCLINIC_ENV";

/// Resolves the environment name from `VETCLINIC_ENV`, falling back to
/// [`DEFAULT_ENVIRONMENT`].
#[must_use]
pub fn resolve_from_env() -> String {
    std::env::var(ENV_VAR).unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Environment {
    #[serde(rename = "production")]
    Production,
    #[serde(rename = "development")]
    Development,
    #[serde(rename = "test")]
    Test,
    Any(String),
}

impl Environment {
    /// Loads `config/<environment>.yaml`.
    ///
    /// # Errors
    /// Returns an error when the file is missing or malformed.
    pub fn load(&self) -> Result<Config> {
        Config::new(self)
    }
}

impl From<&str> for Environment {
    fn from(input: &str) -> Self {
        match input {
            "production" => Self::Production,
            "development" => Self::Development,
            "test" => Self::Test,
            other => Self::Any(other.to_string()),
        }
    }
}

impl From<String> for Environment {
    fn from(env: String) -> Self {
        Self::from(env.as_str())
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from(input))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => f.write_str("production"),
            Self::Development => f.write_str("development"),
            Self::Test => f.write_str("test"),
            Self::Any(s) => f.write_str(s),
        }
    }
}

//! Runtime settings for the batch binary, read from the environment.

use std::env;
use std::str::FromStr;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `LEDGER_LOG_FORMAT`: `text` (default) or `json`
    pub log_format: LogFormat,

    /// `LEDGER_FAIL_FAST`: stop at the first bad row or rejected operation
    pub fail_fast: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let log_format = match lookup("LEDGER_LOG_FORMAT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEDGER_LOG_FORMAT", value))?,
            None => LogFormat::default(),
        };

        let fail_fast = match lookup("LEDGER_FAIL_FAST") {
            Some(value) => parse_bool(&value)
                .ok_or(ConfigError::InvalidValue("LEDGER_FAIL_FAST", value))?,
            None => false,
        };

        Ok(Self {
            log_format,
            fail_fast,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: '{1}'")]
    InvalidValue(&'static str, String),
}

//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve timer durations, note database path and log level.
//! - Reject malformed values up front instead of falling back silently.
//!
//! # Invariants
//! - Blank or unset variables use defaults.
//! - Durations are validated through `TimerDurations::new`.

use crate::logging::default_log_level;
use crate::model::timer::{TimerConfigError, TimerDurations, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_WORK_SECS: &str = "ZENITH_WORK_SECS";
pub const ENV_BREAK_SECS: &str = "ZENITH_BREAK_SECS";
pub const ENV_DB_PATH: &str = "ZENITH_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "ZENITH_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "zenith_notes.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but is not a non-negative integer.
    InvalidNumber { key: &'static str, value: String },
    Timer(TimerConfigError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { key, value } => {
                write!(f, "{key} must be a whole number of seconds, got `{value}`")
            }
            Self::Timer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Timer(err) => Some(err),
            Self::InvalidNumber { .. } => None,
        }
    }
}

impl From<TimerConfigError> for ConfigError {
    fn from(value: TimerConfigError) -> Self {
        Self::Timer(value)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZenithConfig {
    pub durations: TimerDurations,
    /// SQLite file holding the persisted note collection.
    pub db_path: PathBuf,
    pub log_level: String,
}

impl Default for ZenithConfig {
    fn default() -> Self {
        Self {
            durations: TimerDurations::default(),
            db_path: default_db_path(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl ZenithConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let work_secs = parse_secs(ENV_WORK_SECS, non_blank(ENV_WORK_SECS), DEFAULT_WORK_SECS)?;
        let break_secs =
            parse_secs(ENV_BREAK_SECS, non_blank(ENV_BREAK_SECS), DEFAULT_BREAK_SECS)?;
        let durations = TimerDurations::new(work_secs, break_secs)?;

        Ok(Self {
            durations,
            db_path: non_blank(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            log_level: non_blank(ENV_LOG_LEVEL)
                .unwrap_or_else(|| default_log_level().to_string()),
        })
    }
}

fn parse_secs(key: &'static str, raw: Option<String>, default: u32) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

//! Runtime configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path, logging and store quota settings once per run.
//! - Let front ends override individual values after resolution.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - Invalid values are rejected, never silently replaced by defaults.

use crate::logging::{default_log_level, normalize_level};
use crate::store::DEFAULT_STORE_QUOTA;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "NOTEKEEP_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "NOTEKEEP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEKEEP_LOG_DIR";
pub const ENV_STORE_QUOTA: &str = "NOTEKEEP_STORE_QUOTA";

const DEFAULT_DB_FILE_NAME: &str = "notekeep.sqlite3";

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
    InvalidQuota(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidQuota(value) => write!(
                f,
                "invalid {ENV_STORE_QUOTA} value `{value}`; expected a non-negative integer"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file backing the key-value store.
    pub db_path: PathBuf,
    /// Normalized log level (`trace|debug|info|warn|error`).
    pub log_level: &'static str,
    /// Absolute log directory; file logging is off when `None`.
    pub log_dir: Option<PathBuf>,
    /// Store quota in characters; `None` means unlimited.
    pub store_quota: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level(),
            log_dir: None,
            store_quota: Some(DEFAULT_STORE_QUOTA),
        }
    }
}

impl AppConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    ///
    /// `NOTEKEEP_STORE_QUOTA=0` disables the quota.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }
        if let Some(dir) = read(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = read(ENV_STORE_QUOTA) {
            config.store_quota = parse_quota(&raw)?;
        }
        Ok(config)
    }

    /// Overrides the log level with a user-supplied value.
    pub fn set_log_level(&mut self, level: &str) -> Result<(), ConfigError> {
        self.log_level = normalize_level(level).map_err(ConfigError::InvalidLogLevel)?;
        Ok(())
    }
}

fn parse_quota(raw: &str) -> Result<Option<usize>, ConfigError> {
    match raw.parse::<usize>() {
        Ok(0) => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(ConfigError::InvalidQuota(raw.to_string())),
    }
}

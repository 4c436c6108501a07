//! # Configuration Settings
//!
//! Defines the configuration structure for a secretfs cache.

use crate::errors::{Error, Result};
use crate::secrets::timeouts::{
    Timeouts, DEFAULT_FRESH_THRESHOLD, DEFAULT_SECRET_FETCH_TIMEOUT,
    DEFAULT_SECRET_LIST_FETCH_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Complete cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct CacheConfig {
    /// Freshness window and backend deadlines
    #[validate(nested)]
    pub timeouts: TimeoutsConfig,

    /// Log attribution
    #[validate(nested)]
    pub logging: LogConfig,
}

impl CacheConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)
    }

    /// Create CacheConfig from environment variables
    ///
    /// # Environment Variables
    ///
    /// - `SECRETFS_FRESH_THRESHOLD_MS`: Freshness window (default: 1000)
    /// - `SECRETFS_SECRET_FETCH_TIMEOUT_MS`: Single fetch deadline (default: 500)
    /// - `SECRETFS_SECRET_LIST_FETCH_TIMEOUT_MS`: List fetch deadline (default: 5000)
    /// - `SECRETFS_DEBUG`: Debug logging (default: false)
    /// - `SECRETFS_MOUNTPOINT`: Mount point used in log lines (default: empty)
    /// - `SECRETFS_LOG_JSON`: JSON log output (default: false)
    pub fn from_env() -> Result<Self> {
        let defaults = TimeoutsConfig::default();

        let timeouts = TimeoutsConfig {
            fresh_threshold_ms: env_millis(
                "SECRETFS_FRESH_THRESHOLD_MS",
                defaults.fresh_threshold_ms,
            )?,
            secret_fetch_timeout_ms: env_millis(
                "SECRETFS_SECRET_FETCH_TIMEOUT_MS",
                defaults.secret_fetch_timeout_ms,
            )?,
            secret_list_fetch_timeout_ms: env_millis(
                "SECRETFS_SECRET_LIST_FETCH_TIMEOUT_MS",
                defaults.secret_list_fetch_timeout_ms,
            )?,
        };

        let debug = env_flag("SECRETFS_DEBUG");
        let json_logging = env_flag("SECRETFS_LOG_JSON");

        let mountpoint = std::env::var("SECRETFS_MOUNTPOINT")
            .ok()
            .map(|value| value.trim().to_string())
            .unwrap_or_default();

        let config = Self { timeouts, logging: LogConfig { debug, mountpoint, json_logging } };
        config.validate()?;
        Ok(config)
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .ok()
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

fn env_millis(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| Error::config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

/// Freshness window and backend deadlines in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct TimeoutsConfig {
    /// How long a cached entry is trusted without asking the backend (0 = always ask)
    pub fresh_threshold_ms: u64,

    /// Deadline for a single secret fetch
    #[validate(range(
        min = 1,
        max = 60000,
        message = "Secret fetch timeout must be between 1 and 60000 milliseconds"
    ))]
    pub secret_fetch_timeout_ms: u64,

    /// Deadline for a secret list fetch
    #[validate(range(
        min = 1,
        max = 60000,
        message = "Secret list fetch timeout must be between 1 and 60000 milliseconds"
    ))]
    pub secret_list_fetch_timeout_ms: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            fresh_threshold_ms: DEFAULT_FRESH_THRESHOLD.as_millis() as u64,
            secret_fetch_timeout_ms: DEFAULT_SECRET_FETCH_TIMEOUT.as_millis() as u64,
            secret_list_fetch_timeout_ms: DEFAULT_SECRET_LIST_FETCH_TIMEOUT.as_millis() as u64,
        }
    }
}

impl TimeoutsConfig {
    /// Convert into the runtime timing policy
    pub fn timeouts(&self) -> Timeouts {
        Timeouts::new(
            Duration::from_millis(self.fresh_threshold_ms),
            Duration::from_millis(self.secret_fetch_timeout_ms),
            Duration::from_millis(self.secret_list_fetch_timeout_ms),
        )
    }
}

impl From<&TimeoutsConfig> for Timeouts {
    fn from(config: &TimeoutsConfig) -> Self {
        config.timeouts()
    }
}

/// Logging configuration
///
/// Purely for attribution; it never changes caching behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Enable debug-level logging
    pub debug: bool,

    /// Mount point label attached to every cache log line
    #[validate(length(max = 4096, message = "Mount point is too long"))]
    pub mountpoint: String,

    /// Emit log lines as JSON objects instead of plain text
    #[serde(default)]
    pub json_logging: bool,
}

impl LogConfig {
    pub fn new(debug: bool, mountpoint: impl Into<String>) -> Self {
        Self { debug, mountpoint: mountpoint.into(), json_logging: false }
    }

    /// Switch log output to JSON.
    pub fn with_json_logging(mut self, json_logging: bool) -> Self {
        self.json_logging = json_logging;
        self
    }
}

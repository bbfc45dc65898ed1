use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3?mode=rwc";
pub const DEFAULT_TICK_MILLIS: u64 = 1_000;
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Runtime configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_url: String,
    pub tick_period: Duration,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DB_URL.to_owned(),
            tick_period: Duration::from_millis(DEFAULT_TICK_MILLIS),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl AppConfig {
    /// Load `.env` if present, then read `QUIZ_DB_URL`, `QUIZ_TICK_MILLIS`
    /// and `RUST_LOG`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = match lookup("QUIZ_DB_URL") {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::EmptyDatabaseUrl),
            Some(url) => url.trim().to_owned(),
            None => DEFAULT_DB_URL.to_owned(),
        };

        let tick_period = match lookup("QUIZ_TICK_MILLIS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                _ => return Err(ConfigError::InvalidTickMillis(raw)),
            },
            None => Duration::from_millis(DEFAULT_TICK_MILLIS),
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database_url,
            tick_period,
            log_filter,
        })
    }
}

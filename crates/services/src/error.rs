//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{ConfigurationError, ResultError, ResultId, TimerSettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by quiz session services.
///
/// Store failures during a session are not errors; they degrade into a
/// [`StoreNotice`](crate::notice::StoreNotice) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("topic not found: {0}")]
    TopicNotFound(String),
    #[error("no student name is stored")]
    MissingIdentity,
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Result(#[from] ResultError),
}

/// Errors emitted while producing CSV or text exports.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    #[error("result not found: {0}")]
    UnknownResult(ResultId),
    #[error("topic not found: {0}")]
    TopicNotFound(String),
    #[error("result belongs to topic {result_topic:?}, not {topic:?}")]
    TopicMismatch { result_topic: String, topic: String },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultsService` write operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error("student name cannot be empty")]
    EmptyStudentName,
    #[error(transparent)]
    TimerSettings(#[from] TimerSettingsError),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while reading `AppConfig` from the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("QUIZ_DB_URL cannot be empty")]
    EmptyDatabaseUrl,
    #[error("QUIZ_TICK_MILLIS must be a positive integer, got {0:?}")]
    InvalidTickMillis(String),
}

/// Errors emitted while installing the tracing subscriber.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error(transparent)]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error(transparent)]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] quiz_core::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

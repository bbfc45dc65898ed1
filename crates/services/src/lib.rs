#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod format;
pub mod notice;
pub mod results;
pub mod sessions;
pub mod settings_service;
pub mod telemetry;

pub use quiz_core::Clock;
pub use sessions as session;

pub use app_services::AppServices;
pub use config::AppConfig;
pub use error::{
    AppServicesError, ConfigError, ExportError, ResultsServiceError, SessionError,
    SettingsServiceError, TelemetryError,
};
pub use notice::{StoreNotice, WithNotice};
pub use results::{ResultFilter, ResultSummary, ResultsService};
pub use sessions::{QuizAttempt, QuizCompletion, QuizSession, QuizSessionService, SessionTimer};
pub use settings_service::SettingsService;
pub use telemetry::init_tracing;

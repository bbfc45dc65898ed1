use std::sync::Arc;

use quiz_core::QuestionBank;
use storage::repository::Storage;

use crate::Clock;
use crate::config::AppConfig;
use crate::error::AppServicesError;
use crate::results::ResultsService;
use crate::sessions::QuizSessionService;
use crate::settings_service::SettingsService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    sessions: Arc<QuizSessionService>,
    results: Arc<ResultsService>,
    settings: Arc<SettingsService>,
}

impl AppServices {
    /// Build services over `storage` with the built-in question bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the built-in bank is invalid.
    pub fn new(storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let bank = Arc::new(QuestionBank::builtin()?);
        Ok(Self::with_bank(storage, clock, bank))
    }

    #[must_use]
    pub fn with_bank(storage: &Storage, clock: Clock, bank: Arc<QuestionBank>) -> Self {
        let sessions = Arc::new(QuizSessionService::new(
            clock,
            Arc::clone(&bank),
            Arc::clone(&storage.results),
            Arc::clone(&storage.settings),
        ));
        let results = Arc::new(ResultsService::new(
            clock,
            Arc::clone(&storage.results),
            Arc::clone(&storage.settings),
        ));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));
        Self {
            bank,
            sessions,
            results,
            settings,
        }
    }

    /// Build services backed by in-memory storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the built-in bank is invalid.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::new(&Storage::in_memory(), clock)
    }

    /// Build services backed by `SQLite` storage as configured.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn from_config(config: &AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(&config.database_url).await?;
        let mut services = Self::new(&storage, clock)?;
        services.sessions = Arc::new(
            QuizSessionService::clone(&services.sessions).with_tick_period(config.tick_period),
        );
        tracing::info!(database_url = %config.database_url, "app services ready");
        Ok(services)
    }

    /// Read `AppConfig` from the environment (and `.env`), then build services.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Config` for invalid settings, or a storage
    /// error if initialization fails.
    pub async fn from_env(clock: Clock) -> Result<Self, AppServicesError> {
        let config = AppConfig::from_env()?;
        Self::from_config(&config, clock).await
    }

    /// Like [`AppServices::from_env`] but reading variables from `lookup`.
    ///
    /// # Errors
    ///
    /// Same as [`AppServices::from_env`].
    pub async fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let config = AppConfig::from_lookup(lookup)?;
        Self::from_config(&config, clock).await
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use quiz_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_services_share_one_store() {
        let services = AppServices::in_memory(fixed_clock()).unwrap();
        services.settings().save_student_name("Ada").await.unwrap();

        let mut attempt = services
            .sessions()
            .start_quiz("Data Structures & Algorithms")
            .await
            .unwrap()
            .value;
        services.sessions().finish(&mut attempt).await.unwrap();

        let loaded = services.results().load_all().await;
        assert_eq!(loaded.value.len(), 1);
        assert_eq!(services.bank().topics().len(), 5);
    }

    #[tokio::test]
    async fn from_config_opens_sqlite() {
        let config = AppConfig {
            database_url: "sqlite:file:app_services_from_config?mode=memory&cache=shared".into(),
            ..AppConfig::default()
        };
        let services = AppServices::from_config(&config, fixed_clock()).await.unwrap();
        assert!(services.results().load_all().await.is_clean());
    }

    #[tokio::test]
    async fn invalid_environment_is_reported_as_config_error() {
        let err = AppServices::from_lookup(
            |key| (key == "QUIZ_TICK_MILLIS").then(|| "0".to_owned()),
            fixed_clock(),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(
            err,
            AppServicesError::Config(ConfigError::InvalidTickMillis(ref raw)) if raw == "0"
        ));
    }
}

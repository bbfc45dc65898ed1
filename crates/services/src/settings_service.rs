use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use quiz_core::model::{Difficulty, TimerSettings, TimerSettingsDraft};
use storage::repository::{SettingKey, SettingsRepository};

use crate::error::SettingsServiceError;
use crate::notice::{StoreNotice, WithNotice};

/// Typed access to the key-value settings store.
///
/// Loads never fail: unreadable or malformed values fall back to defaults and
/// come back as notices. Saves report errors to the caller.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    async fn read(&self, key: &SettingKey, notices: &mut Vec<StoreNotice>) -> Option<String> {
        match self.repo.get_setting(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key = %key.as_key(), error = %err, "settings read failed");
                notices.push(StoreNotice::read_failed("settings", &err));
                None
            }
        }
    }

    async fn read_parsed<T: FromStr>(
        &self,
        key: &SettingKey,
        notices: &mut Vec<StoreNotice>,
    ) -> Option<T> {
        let raw = self.read(key, notices).await?;
        match raw.trim().parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(key = %key.as_key(), raw = %raw, "ignoring malformed setting");
                notices.push(StoreNotice::malformed(key.as_key(), raw));
                None
            }
        }
    }

    //
    // ─── TIMER SETTINGS ────────────────────────────────────────────────────────
    //

    /// Load timer settings, field by field, falling back to the defaults.
    pub async fn load_timer_settings(&self) -> WithNotice<TimerSettings> {
        let mut notices = Vec::new();
        let defaults = TimerSettingsDraft::default();

        let draft = TimerSettingsDraft {
            easy_secs: self
                .read_parsed(&SettingKey::TimerEasy, &mut notices)
                .await
                .unwrap_or(defaults.easy_secs),
            medium_secs: self
                .read_parsed(&SettingKey::TimerMedium, &mut notices)
                .await
                .unwrap_or(defaults.medium_secs),
            hard_secs: self
                .read_parsed(&SettingKey::TimerHard, &mut notices)
                .await
                .unwrap_or(defaults.hard_secs),
            custom_secs: self
                .read_parsed(&SettingKey::CustomTimeLimit, &mut notices)
                .await,
            use_custom: self
                .read(&SettingKey::UseCustomTime, &mut notices)
                .await
                .is_some_and(|raw| raw == "true"),
        };

        let settings = match TimerSettings::from_persisted(draft) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(error = %err, "stored timer settings rejected, using defaults");
                notices.push(StoreNotice::malformed("timer settings", err.to_string()));
                TimerSettings::default()
            }
        };
        WithNotice::with_notices(settings, notices)
    }

    /// Validate and persist timer settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if a value is out of range or the store
    /// cannot be written.
    pub async fn save_timer_settings(
        &self,
        draft: TimerSettingsDraft,
    ) -> Result<TimerSettings, SettingsServiceError> {
        let settings = draft.validate()?;
        self.repo
            .set_setting(&SettingKey::TimerEasy, &settings.easy_secs().to_string())
            .await?;
        self.repo
            .set_setting(&SettingKey::TimerMedium, &settings.medium_secs().to_string())
            .await?;
        self.repo
            .set_setting(&SettingKey::TimerHard, &settings.hard_secs().to_string())
            .await?;
        if let Some(custom) = settings.custom_secs() {
            self.repo
                .set_setting(&SettingKey::CustomTimeLimit, &custom.to_string())
                .await?;
        }
        self.repo
            .set_setting(&SettingKey::UseCustomTime, bool_str(settings.use_custom()))
            .await?;
        tracing::info!(
            easy = settings.easy_secs(),
            medium = settings.medium_secs(),
            hard = settings.hard_secs(),
            custom = ?settings.custom_secs(),
            use_custom = settings.use_custom(),
            "timer settings saved"
        );
        Ok(settings)
    }

    /// Remove every timer key so the defaults apply again.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError::Storage` if a key cannot be removed.
    pub async fn reset_timer_settings(&self) -> Result<(), SettingsServiceError> {
        for key in &SettingKey::TIMER_KEYS {
            self.repo.remove_setting(key).await?;
        }
        Ok(())
    }

    //
    // ─── STUDENT PREFERENCES ───────────────────────────────────────────────────
    //

    /// Stored student name, trimmed; blank counts as absent.
    pub async fn student_name(&self) -> WithNotice<Option<String>> {
        let mut notices = Vec::new();
        let name = self
            .read(&SettingKey::StudentName, &mut notices)
            .await
            .map(|raw| raw.trim().to_owned())
            .filter(|name| !name.is_empty());
        WithNotice::with_notices(name, notices)
    }

    /// # Errors
    ///
    /// Returns `SettingsServiceError::EmptyStudentName` for a blank name, or a
    /// storage error if it cannot be written.
    pub async fn save_student_name(&self, name: &str) -> Result<String, SettingsServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SettingsServiceError::EmptyStudentName);
        }
        self.repo.set_setting(&SettingKey::StudentName, name).await?;
        Ok(name.to_owned())
    }

    /// Stored difficulty, defaulting to medium when absent or unrecognised.
    pub async fn selected_difficulty(&self) -> WithNotice<Difficulty> {
        let mut notices = Vec::new();
        let difficulty = self
            .read_parsed(&SettingKey::SelectedDifficulty, &mut notices)
            .await
            .unwrap_or_default();
        WithNotice::with_notices(difficulty, notices)
    }

    /// # Errors
    ///
    /// Returns `SettingsServiceError::Storage` if the value cannot be written.
    pub async fn save_selected_difficulty(
        &self,
        difficulty: Difficulty,
    ) -> Result<(), SettingsServiceError> {
        self.repo
            .set_setting(&SettingKey::SelectedDifficulty, difficulty.as_str())
            .await?;
        Ok(())
    }

    /// Persist the custom-timer choice made when starting a quiz.
    ///
    /// The stored value is only replaced when the override is enabled.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if the custom value is out of range or
    /// the store cannot be written.
    pub async fn save_custom_timer(
        &self,
        use_custom: bool,
        custom_secs: Option<u32>,
    ) -> Result<(), SettingsServiceError> {
        let enabled = use_custom && custom_secs.is_some();
        if let (true, Some(custom)) = (enabled, custom_secs) {
            TimerSettingsDraft {
                custom_secs: Some(custom),
                ..TimerSettingsDraft::default()
            }
            .validate()?;
            self.repo
                .set_setting(&SettingKey::CustomTimeLimit, &custom.to_string())
                .await?;
        }
        self.repo
            .set_setting(&SettingKey::UseCustomTime, bool_str(enabled))
            .await?;
        Ok(())
    }

    //
    // ─── BOOKMARKS ─────────────────────────────────────────────────────────────
    //

    /// Bookmarked question indices saved for `topic`.
    pub async fn bookmarks(&self, topic: &str) -> WithNotice<BTreeSet<usize>> {
        let mut notices = Vec::new();
        let key = SettingKey::Bookmarks(topic.to_owned());
        let bookmarks = match self.read(&key, &mut notices).await {
            Some(raw) => match serde_json::from_str::<Vec<usize>>(&raw) {
                Ok(indices) => indices.into_iter().collect(),
                Err(err) => {
                    tracing::warn!(topic, error = %err, "ignoring malformed bookmarks");
                    notices.push(StoreNotice::malformed(key.as_key(), raw));
                    BTreeSet::new()
                }
            },
            None => BTreeSet::new(),
        };
        WithNotice::with_notices(bookmarks, notices)
    }

    /// # Errors
    ///
    /// Returns `SettingsServiceError` if the set cannot be encoded or written.
    pub async fn save_bookmarks(
        &self,
        topic: &str,
        bookmarks: &BTreeSet<usize>,
    ) -> Result<(), SettingsServiceError> {
        let encoded = serde_json::to_string(bookmarks)?;
        self.repo
            .set_setting(&SettingKey::Bookmarks(topic.to_owned()), &encoded)
            .await?;
        Ok(())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::TimerSettingsError;
    use storage::repository::InMemoryRepository;

    fn service() -> (InMemoryRepository, SettingsService) {
        let repo = InMemoryRepository::new();
        let service = SettingsService::new(Arc::new(repo.clone()));
        (repo, service)
    }

    #[tokio::test]
    async fn empty_store_yields_defaults_without_notices() {
        let (_repo, service) = service();
        let loaded = service.load_timer_settings().await;
        assert!(loaded.is_clean());
        assert_eq!(loaded.value, TimerSettings::default());
        assert_eq!(service.selected_difficulty().await.value, Difficulty::Medium);
        assert_eq!(service.student_name().await.value, None);
    }

    #[tokio::test]
    async fn saved_timer_settings_load_back() {
        let (_repo, service) = service();
        let saved = service
            .save_timer_settings(TimerSettingsDraft {
                easy_secs: 90,
                medium_secs: 50,
                hard_secs: 20,
                custom_secs: Some(15),
                use_custom: true,
            })
            .await
            .unwrap();

        let loaded = service.load_timer_settings().await;
        assert!(loaded.is_clean());
        assert_eq!(loaded.value, saved);
        assert_eq!(loaded.value.seconds_per_question(Difficulty::Easy), 15);
    }

    #[tokio::test]
    async fn out_of_range_save_is_rejected() {
        let (repo, service) = service();
        let err = service
            .save_timer_settings(TimerSettingsDraft {
                easy_secs: 5,
                ..TimerSettingsDraft::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsServiceError::TimerSettings(TimerSettingsError::OutOfRange { .. })
        ));
        assert_eq!(repo.get_setting(&SettingKey::TimerEasy).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_values_fall_back_per_field() {
        let (repo, service) = service();
        repo.set_setting(&SettingKey::TimerEasy, "ninety").await.unwrap();
        repo.set_setting(&SettingKey::TimerHard, "25").await.unwrap();
        repo.set_setting(&SettingKey::SelectedDifficulty, "extreme")
            .await
            .unwrap();

        let loaded = service.load_timer_settings().await;
        assert_eq!(loaded.value.easy_secs(), 60);
        assert_eq!(loaded.value.hard_secs(), 25);
        assert_eq!(
            loaded.notices,
            vec![StoreNotice::malformed("timerEasy", "ninety")]
        );

        let difficulty = service.selected_difficulty().await;
        assert_eq!(difficulty.value, Difficulty::Medium);
        assert_eq!(difficulty.notices.len(), 1);
    }

    #[tokio::test]
    async fn read_failure_degrades_to_defaults() {
        let (repo, service) = service();
        repo.set_fail_reads(true);
        let loaded = service.load_timer_settings().await;
        assert_eq!(loaded.value, TimerSettings::default());
        assert!(matches!(
            loaded.notices.first(),
            Some(StoreNotice::ReadFailed { what: "settings", .. })
        ));
    }

    #[tokio::test]
    async fn student_name_is_trimmed_and_required() {
        let (_repo, service) = service();
        assert!(matches!(
            service.save_student_name("   ").await,
            Err(SettingsServiceError::EmptyStudentName)
        ));
        assert_eq!(service.save_student_name("  Ada ").await.unwrap(), "Ada");
        assert_eq!(service.student_name().await.value.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn bookmarks_roundtrip_per_topic() {
        let (repo, service) = service();
        service
            .save_bookmarks("Web Development", &BTreeSet::from([4, 1]))
            .await
            .unwrap();
        assert_eq!(
            repo.get_setting(&SettingKey::Bookmarks("Web Development".into()))
                .await
                .unwrap()
                .as_deref(),
            Some("[1,4]")
        );
        assert_eq!(
            service.bookmarks("Web Development").await.value,
            BTreeSet::from([1, 4])
        );
        assert!(service.bookmarks("Machine Learning").await.value.is_empty());
    }

    #[tokio::test]
    async fn custom_timer_choice_is_persisted() {
        let (repo, service) = service();
        service.save_custom_timer(true, Some(12)).await.unwrap();
        assert_eq!(
            service.load_timer_settings().await.value.custom_secs(),
            Some(12)
        );

        service.save_custom_timer(false, Some(40)).await.unwrap();
        assert_eq!(
            repo.get_setting(&SettingKey::UseCustomTime).await.unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(
            repo.get_setting(&SettingKey::CustomTimeLimit).await.unwrap().as_deref(),
            Some("12")
        );
    }

    #[tokio::test]
    async fn reset_removes_only_timer_keys() {
        let (repo, service) = service();
        service
            .save_timer_settings(TimerSettingsDraft::default())
            .await
            .unwrap();
        service.save_student_name("Ada").await.unwrap();

        service.reset_timer_settings().await.unwrap();
        for key in &SettingKey::TIMER_KEYS {
            assert_eq!(repo.get_setting(key).await.unwrap(), None);
        }
        assert_eq!(service.student_name().await.value.as_deref(), Some("Ada"));
    }
}

use async_trait::async_trait;
use quiz_core::model::{QuizResult, ResultId};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Named scalar stored in the settings store.
///
/// Key strings match what the browser build kept in local storage, so data
/// imported from it lines up one to one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SettingKey {
    TimerEasy,
    TimerMedium,
    TimerHard,
    UseCustomTime,
    CustomTimeLimit,
    SelectedDifficulty,
    StudentName,
    /// Bookmarked question indices for one topic, stored as a JSON array.
    Bookmarks(String),
}

impl SettingKey {
    /// Keys cleared by a full reset. Identity and bookmarks survive it.
    pub const TIMER_KEYS: [SettingKey; 5] = [
        SettingKey::TimerEasy,
        SettingKey::TimerMedium,
        SettingKey::TimerHard,
        SettingKey::CustomTimeLimit,
        SettingKey::UseCustomTime,
    ];

    #[must_use]
    pub fn as_key(&self) -> Cow<'_, str> {
        match self {
            SettingKey::TimerEasy => Cow::Borrowed("timerEasy"),
            SettingKey::TimerMedium => Cow::Borrowed("timerMedium"),
            SettingKey::TimerHard => Cow::Borrowed("timerHard"),
            SettingKey::UseCustomTime => Cow::Borrowed("useCustomTime"),
            SettingKey::CustomTimeLimit => Cow::Borrowed("customTimeLimit"),
            SettingKey::SelectedDifficulty => Cow::Borrowed("selectedDifficulty"),
            SettingKey::StudentName => Cow::Borrowed("studentName"),
            SettingKey::Bookmarks(topic) => Cow::Owned(format!("bookmarked_{topic}")),
        }
    }
}

/// Append-only store of finished attempts.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// All results in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read or holds malformed data.
    async fn list_results(&self) -> Result<Vec<QuizResult>, StorageError>;

    /// Append one result. Callers guarantee at-most-once emission.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &QuizResult) -> Result<(), StorageError>;

    /// Remove every result whose id is in `ids` and return what remains.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be updated.
    async fn delete_results(&self, ids: &[ResultId]) -> Result<Vec<QuizResult>, StorageError>;

    /// Remove all results.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be updated.
    async fn clear_results(&self) -> Result<(), StorageError>;
}

/// Raw string key-value settings, parsed by the services layer.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn get_setting(&self, key: &SettingKey) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn set_setting(&self, key: &SettingKey, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be updated.
    async fn remove_setting(&self, key: &SettingKey) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Reads and writes can be made to fail on demand, which lets callers exercise
/// their degraded paths without a broken database.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    results: Arc<Mutex<Vec<QuizResult>>>,
    settings: Arc<Mutex<HashMap<String, String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with `StorageError::Connection`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with `StorageError::Connection`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("read failure injected".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("write failure injected".into()));
        }
        Ok(())
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn list_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        self.check_read()?;
        let guard = self.results.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn append_result(&self, result: &QuizResult) -> Result<(), StorageError> {
        self.check_write()?;
        let mut guard = self.results.lock().map_err(poisoned)?;
        guard.push(result.clone());
        Ok(())
    }

    async fn delete_results(&self, ids: &[ResultId]) -> Result<Vec<QuizResult>, StorageError> {
        self.check_write()?;
        let doomed: HashSet<&ResultId> = ids.iter().collect();
        let mut guard = self.results.lock().map_err(poisoned)?;
        guard.retain(|result| !doomed.contains(result.id()));
        Ok(guard.clone())
    }

    async fn clear_results(&self) -> Result<(), StorageError> {
        self.check_write()?;
        let mut guard = self.results.lock().map_err(poisoned)?;
        guard.clear();
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_setting(&self, key: &SettingKey) -> Result<Option<String>, StorageError> {
        self.check_read()?;
        let guard = self.settings.lock().map_err(poisoned)?;
        Ok(guard.get(key.as_key().as_ref()).cloned())
    }

    async fn set_setting(&self, key: &SettingKey, value: &str) -> Result<(), StorageError> {
        self.check_write()?;
        let mut guard = self.settings.lock().map_err(poisoned)?;
        guard.insert(key.as_key().into_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_setting(&self, key: &SettingKey) -> Result<(), StorageError> {
        self.check_write()?;
        let mut guard = self.settings.lock().map_err(poisoned)?;
        guard.remove(key.as_key().as_ref());
        Ok(())
    }
}

/// Aggregates the result and settings stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub results: Arc<dyn ResultRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let results: Arc<dyn ResultRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self { results, settings }
    }
}

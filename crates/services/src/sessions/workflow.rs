use std::sync::Arc;
use std::time::Duration;

use quiz_core::QuestionBank;
use quiz_core::model::{QuizConfiguration, QuizResult};
use storage::repository::{ResultRepository, SettingsRepository};

use super::progress::SessionProgress;
use super::service::QuizSession;
use super::timer::{DEFAULT_TICK_PERIOD, SessionTimer};
use crate::Clock;
use crate::error::SessionError;
use crate::notice::{StoreNotice, WithNotice};
use crate::results::{PriorAttempts, history_for};
use crate::settings_service::SettingsService;

/// A running attempt: the session plus its countdown timer.
///
/// Completion and bookmark persistence go through [`QuizSessionService`];
/// the remaining transitions are exposed here directly.
#[derive(Debug)]
pub struct QuizAttempt {
    session: QuizSession,
    timer: SessionTimer,
    prior: PriorAttempts,
}

impl QuizAttempt {
    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        self.session.progress()
    }

    /// Attempts on this topic recorded before this one started.
    #[must_use]
    pub fn prior_attempts(&self) -> PriorAttempts {
        self.prior
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn select_answer(&mut self, option: &str) -> bool {
        self.session.select_answer(option)
    }

    pub fn check_answer(&mut self) -> Option<bool> {
        self.session.check_answer()
    }

    pub fn toggle_hint(&mut self) -> bool {
        self.session.toggle_hint()
    }

    pub fn retreat(&mut self) -> bool {
        self.session.retreat()
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.session.jump_to(index)
    }

    /// Wait for the next timer tick. Returns `false` once the timer is stopped.
    pub async fn next_tick(&mut self) -> bool {
        self.timer.next_tick().await
    }
}

/// The single result of a finished attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizCompletion {
    pub result: QuizResult,
    /// Set when the result could not be appended to the store.
    pub notice: Option<StoreNotice>,
}

/// Starts attempts from stored settings and persists what they produce.
#[derive(Clone)]
pub struct QuizSessionService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    results: Arc<dyn ResultRepository>,
    settings: SettingsService,
    tick_period: Duration,
}

impl QuizSessionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        results: Arc<dyn ResultRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            clock,
            bank,
            results,
            settings: SettingsService::new(settings),
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    #[must_use]
    pub fn with_tick_period(mut self, tick_period: Duration) -> Self {
        self.tick_period = tick_period;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Start an attempt on `topic` using the stored student name, difficulty
    /// and timer settings. The timer starts immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingIdentity` when no student name is stored
    /// and `SessionError::TopicNotFound` for an unknown topic.
    pub async fn start_quiz(&self, topic: &str) -> Result<WithNotice<QuizAttempt>, SessionError> {
        let mut notices = Vec::new();
        let difficulty = self
            .settings
            .selected_difficulty()
            .await
            .drain_into(&mut notices);
        let timers = self
            .settings
            .load_timer_settings()
            .await
            .drain_into(&mut notices);
        let configuration = QuizConfiguration::from_settings(difficulty, &timers);
        self.start_with(topic, configuration, notices).await
    }

    /// Start an attempt with an explicit configuration, e.g. a flat time limit.
    ///
    /// # Errors
    ///
    /// Same as [`start_quiz`](Self::start_quiz).
    pub async fn start_quiz_with(
        &self,
        topic: &str,
        configuration: QuizConfiguration,
    ) -> Result<WithNotice<QuizAttempt>, SessionError> {
        self.start_with(topic, configuration, Vec::new()).await
    }

    async fn start_with(
        &self,
        topic: &str,
        configuration: QuizConfiguration,
        mut notices: Vec<StoreNotice>,
    ) -> Result<WithNotice<QuizAttempt>, SessionError> {
        let student = self
            .settings
            .student_name()
            .await
            .drain_into(&mut notices)
            .ok_or(SessionError::MissingIdentity)?;
        if self.bank.find(topic).is_none() {
            return Err(SessionError::TopicNotFound(topic.to_owned()));
        }

        let bookmarks = self.settings.bookmarks(topic).await.drain_into(&mut notices);
        let prior = match self.results.list_results().await {
            Ok(all) => PriorAttempts::from_history(&history_for(&student, topic, &all)),
            Err(err) => {
                tracing::warn!(error = %err, "results read failed, assuming no prior attempts");
                notices.push(StoreNotice::read_failed("results", &err));
                PriorAttempts::default()
            }
        };

        let session = QuizSession::start(
            &self.bank,
            topic,
            &student,
            configuration,
            bookmarks,
            self.clock.now(),
        )?;
        let mut timer = SessionTimer::new(self.tick_period);
        timer.start();

        tracing::info!(
            student = session.student_name(),
            topic = session.topic(),
            difficulty = %session.difficulty(),
            time_limit_secs = session.time_limit_secs(),
            prior_attempts = prior.count,
            "quiz started"
        );

        Ok(WithNotice::with_notices(
            QuizAttempt {
                session,
                timer,
                prior,
            },
            notices,
        ))
    }

    /// Move to the next question; from the last one this completes the attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the result fails validation.
    pub async fn advance(
        &self,
        attempt: &mut QuizAttempt,
    ) -> Result<Option<QuizCompletion>, SessionError> {
        let emitted = attempt.session.advance(self.clock.now())?;
        tracing::debug!(index = attempt.session.current_index(), "advanced");
        self.persist(attempt, emitted).await
    }

    /// Apply one timer tick; at zero the attempt completes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the result fails validation.
    pub async fn tick(
        &self,
        attempt: &mut QuizAttempt,
    ) -> Result<Option<QuizCompletion>, SessionError> {
        let emitted = attempt.session.tick(self.clock.now())?;
        self.persist(attempt, emitted).await
    }

    /// Finish the attempt now. Later calls return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the result fails validation.
    pub async fn finish(
        &self,
        attempt: &mut QuizAttempt,
    ) -> Result<Option<QuizCompletion>, SessionError> {
        let emitted = attempt.session.complete(self.clock.now())?;
        self.persist(attempt, emitted).await
    }

    /// Drive the countdown until time runs out or the timer is stopped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the result fails validation.
    pub async fn run_timer(
        &self,
        attempt: &mut QuizAttempt,
    ) -> Result<Option<QuizCompletion>, SessionError> {
        while attempt.next_tick().await {
            if let Some(completion) = self.tick(attempt).await? {
                return Ok(Some(completion));
            }
        }
        Ok(None)
    }

    /// Toggle the bookmark on the current question and save the topic's set.
    ///
    /// A failed save keeps the in-session change and returns a notice.
    pub async fn toggle_bookmark(&self, attempt: &mut QuizAttempt) -> WithNotice<bool> {
        let bookmarked = attempt.session.toggle_bookmark();
        let topic = attempt.session.topic();
        match self
            .settings
            .save_bookmarks(topic, attempt.session.bookmarked())
            .await
        {
            Ok(()) => WithNotice::clean(bookmarked),
            Err(err) => {
                tracing::warn!(topic, error = %err, "bookmark save failed");
                WithNotice::with_notices(
                    bookmarked,
                    vec![StoreNotice::WriteFailed {
                        what: "bookmarks",
                        detail: err.to_string(),
                    }],
                )
            }
        }
    }

    /// Abandon the attempt. The timer stops and nothing is written.
    pub fn quit(&self, mut attempt: QuizAttempt) {
        attempt.timer.stop();
        tracing::info!(
            student = attempt.session.student_name(),
            topic = attempt.session.topic(),
            completed = attempt.session.is_complete(),
            "quiz quit"
        );
    }

    async fn persist(
        &self,
        attempt: &mut QuizAttempt,
        emitted: Option<QuizResult>,
    ) -> Result<Option<QuizCompletion>, SessionError> {
        let Some(result) = emitted else {
            return Ok(None);
        };
        attempt.timer.stop();

        let notice = match self.results.append_result(&result).await {
            Ok(()) => None,
            Err(err) => {
                tracing::warn!(id = %result.id(), error = %err, "result could not be saved");
                Some(StoreNotice::write_failed("quiz result", &err))
            }
        };
        tracing::info!(
            id = %result.id(),
            score = result.score(),
            total = result.total_questions(),
            time_taken_secs = ?result.time_taken_secs(),
            "quiz completed"
        );
        Ok(Some(QuizCompletion { result, notice }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Difficulty;
    use quiz_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, SettingKey};

    async fn service_with_student() -> (InMemoryRepository, QuizSessionService) {
        let repo = InMemoryRepository::new();
        repo.set_setting(&SettingKey::StudentName, "Ada").await.unwrap();
        let service = QuizSessionService::new(
            Clock::fixed(fixed_now()),
            Arc::new(QuestionBank::builtin().unwrap()),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        );
        (repo, service)
    }

    #[tokio::test]
    async fn missing_identity_is_fatal() {
        let repo = InMemoryRepository::new();
        let service = QuizSessionService::new(
            Clock::fixed(fixed_now()),
            Arc::new(QuestionBank::builtin().unwrap()),
            Arc::new(repo.clone()),
            Arc::new(repo),
        );
        let err = service.start_quiz("Web Development").await.unwrap_err();
        assert!(matches!(err, SessionError::MissingIdentity));
    }

    #[tokio::test]
    async fn unknown_topic_is_fatal() {
        let (_repo, service) = service_with_student().await;
        let err = service.start_quiz("Astrology").await.unwrap_err();
        assert!(matches!(err, SessionError::TopicNotFound(t) if t == "Astrology"));
    }

    #[tokio::test]
    async fn start_uses_stored_difficulty_and_bookmarks() {
        let (repo, service) = service_with_student().await;
        repo.set_setting(&SettingKey::SelectedDifficulty, "hard").await.unwrap();
        repo.set_setting(&SettingKey::Bookmarks("Web Development".into()), "[2,5]")
            .await
            .unwrap();

        let started = service.start_quiz("Web Development").await.unwrap();
        assert!(started.is_clean());
        let attempt = started.value;
        assert_eq!(attempt.session().difficulty(), Difficulty::Hard);
        assert_eq!(attempt.session().time_limit_secs(), 7 * 30);
        assert!(attempt.session().is_bookmarked(5));
        assert!(attempt.timer_running());
        service.quit(attempt);
    }

    #[tokio::test]
    async fn completion_is_persisted_once() {
        let (repo, service) = service_with_student().await;
        let mut attempt = service.start_quiz("Computer Graphics").await.unwrap().value;

        let completion = service.finish(&mut attempt).await.unwrap().unwrap();
        assert!(completion.notice.is_none());
        assert!(!attempt.timer_running());
        assert!(service.finish(&mut attempt).await.unwrap().is_none());
        assert!(service.tick(&mut attempt).await.unwrap().is_none());
        assert_eq!(repo.list_results().await.unwrap(), vec![completion.result]);
    }

    #[tokio::test]
    async fn write_failure_becomes_a_notice() {
        let (repo, service) = service_with_student().await;
        let mut attempt = service.start_quiz("Machine Learning").await.unwrap().value;
        repo.set_fail_writes(true);

        let completion = service.finish(&mut attempt).await.unwrap().unwrap();
        assert!(matches!(
            completion.notice,
            Some(StoreNotice::WriteFailed { what: "quiz result", .. })
        ));
        assert!(attempt.session().is_complete());

        let toggled = service.toggle_bookmark(&mut attempt).await;
        assert!(!toggled.value);
    }

    #[tokio::test]
    async fn bookmark_toggles_are_saved_per_topic() {
        let (repo, service) = service_with_student().await;
        let mut attempt = service.start_quiz("Web Development").await.unwrap().value;

        assert!(service.toggle_bookmark(&mut attempt).await.value);
        let key = SettingKey::Bookmarks("Web Development".into());
        assert_eq!(repo.get_setting(&key).await.unwrap().as_deref(), Some("[0]"));

        assert!(!service.toggle_bookmark(&mut attempt).await.value);
        assert_eq!(repo.get_setting(&key).await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn quit_writes_nothing() {
        let (repo, service) = service_with_student().await;
        let mut attempt = service.start_quiz("Web Development").await.unwrap().value;
        attempt.select_answer("HTML");
        service.quit(attempt);
        assert!(repo.list_results().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prior_attempts_are_reported_at_start() {
        let (_repo, service) = service_with_student().await;
        let mut first = service.start_quiz("Web Development").await.unwrap().value;
        assert_eq!(first.prior_attempts(), PriorAttempts::default());
        service.finish(&mut first).await.unwrap();

        let second = service.start_quiz("Web Development").await.unwrap().value;
        assert_eq!(
            second.prior_attempts(),
            PriorAttempts {
                count: 1,
                best_score: Some(0),
            }
        );
    }
}

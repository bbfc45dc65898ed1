use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use quiz_core::QuestionBank;
use quiz_core::model::{Difficulty, Question, QuizConfiguration, QuizResult, QuizResultDraft, Topic};
use quiz_core::time::elapsed_whole_secs;

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Sub-mode of the question currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuestionMode {
    /// Unanswered, or answered but not yet checked.
    #[default]
    Open,
    /// The answer was checked; selection is locked until navigation.
    Checked { correct: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Completed,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt, from the first question to its single result.
///
/// The session is a synchronous state machine. Time enters only through the
/// `now` arguments and [`tick`](Self::tick), so the services layer decides
/// where the clock comes from.
pub struct QuizSession {
    student_name: String,
    topic: String,
    configuration: QuizConfiguration,
    questions: Vec<Question>,
    current: usize,
    selected: Vec<Option<String>>,
    mode: QuestionMode,
    hint_visible: bool,
    bookmarked: BTreeSet<usize>,
    time_limit_secs: u32,
    remaining_secs: u32,
    started_at: DateTime<Utc>,
    result: Option<QuizResult>,
}

impl QuizSession {
    /// Look up `topic_name` in the bank and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::TopicNotFound` if no topic has that exact name,
    /// or `SessionError::MissingIdentity` if the student name is blank.
    pub fn start(
        bank: &QuestionBank,
        topic_name: &str,
        student_name: &str,
        configuration: QuizConfiguration,
        bookmarked: BTreeSet<usize>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let topic = bank
            .find(topic_name)
            .ok_or_else(|| SessionError::TopicNotFound(topic_name.to_owned()))?;
        Self::new(topic, student_name, configuration, bookmarked, started_at)
    }

    /// Snapshot `topic` into a fresh session. Questions without a hint get the
    /// generated placeholder; bookmarks outside the topic are dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MissingIdentity` if the student name is blank.
    pub fn new(
        topic: &Topic,
        student_name: &str,
        configuration: QuizConfiguration,
        bookmarked: BTreeSet<usize>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let student_name = student_name.trim();
        if student_name.is_empty() {
            return Err(SessionError::MissingIdentity);
        }

        let questions: Vec<Question> = topic
            .questions()
            .iter()
            .map(|q| q.with_hint_for(topic.name()))
            .collect();
        let len = questions.len();
        let bookmarked = bookmarked.into_iter().filter(|i| *i < len).collect();
        let time_limit_secs = configuration.total_time_limit(len);

        Ok(Self {
            student_name: student_name.to_owned(),
            topic: topic.name().to_owned(),
            configuration,
            questions,
            current: 0,
            selected: vec![None; len],
            mode: QuestionMode::Open,
            hint_visible: false,
            bookmarked,
            time_limit_secs,
            remaining_secs: time_limit_secs,
            started_at,
            result: None,
        })
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.configuration.difficulty()
    }

    #[must_use]
    pub fn configuration(&self) -> &QuizConfiguration {
        &self.configuration
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// 0-based index of the question on screen.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// One slot per question; `None` means nothing selected yet.
    #[must_use]
    pub fn selected_answers(&self) -> &[Option<String>] {
        &self.selected
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<&str> {
        self.selected[self.current].as_deref()
    }

    #[must_use]
    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    #[must_use]
    pub fn is_checked(&self) -> bool {
        matches!(self.mode, QuestionMode::Checked { .. })
    }

    #[must_use]
    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Hint text for the current question while it is revealed.
    #[must_use]
    pub fn visible_hint(&self) -> Option<&str> {
        if self.hint_visible {
            self.current_question().hint()
        } else {
            None
        }
    }

    #[must_use]
    pub fn bookmarked(&self) -> &BTreeSet<usize> {
        &self.bookmarked
    }

    #[must_use]
    pub fn is_bookmarked(&self, index: usize) -> bool {
        self.bookmarked.contains(&index)
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.result.is_some() {
            SessionPhase::Completed
        } else {
            SessionPhase::InProgress
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }

    /// The result emitted on completion, if any.
    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected.iter().filter(|s| s.is_some()).count()
    }

    /// Number of questions whose selection equals the correct answer.
    #[must_use]
    pub fn score(&self) -> u32 {
        let hits = self
            .questions
            .iter()
            .zip(&self.selected)
            .filter(|(question, selected)| {
                selected
                    .as_deref()
                    .is_some_and(|answer| question.is_correct(answer))
            })
            .count();
        u32::try_from(hits).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            question_number: self.current + 1,
            total: self.questions.len(),
            answered: self.answered_count(),
            bookmarked: self.bookmarked.len(),
            remaining_secs: self.remaining_secs,
            time_limit_secs: self.time_limit_secs,
            is_complete: self.is_complete(),
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Record `option` for the current question.
    ///
    /// Ignored once the question is checked, after completion, or when
    /// `option` is not one of the question's options. Returns whether the
    /// selection was applied.
    pub fn select_answer(&mut self, option: &str) -> bool {
        if self.is_complete() || self.is_checked() {
            return false;
        }
        if !self.current_question().has_option(option) {
            return false;
        }
        self.selected[self.current] = Some(option.to_owned());
        true
    }

    /// Lock the current selection and report whether it is correct.
    ///
    /// Returns `None` without changing state when nothing is selected, the
    /// question is already checked, or the session is complete.
    pub fn check_answer(&mut self) -> Option<bool> {
        if self.is_complete() || self.is_checked() {
            return None;
        }
        let answer = self.selected[self.current].as_deref()?;
        let correct = self.questions[self.current].is_correct(answer);
        self.mode = QuestionMode::Checked { correct };
        Some(correct)
    }

    /// Flip hint visibility for the current question.
    pub fn toggle_hint(&mut self) -> bool {
        if !self.is_complete() {
            self.hint_visible = !self.hint_visible;
        }
        self.hint_visible
    }

    /// Move to the next question, completing the session from the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the completed result fails validation.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Option<QuizResult>, SessionError> {
        if self.is_complete() {
            return Ok(None);
        }
        self.reset_question_state();
        if self.current + 1 >= self.questions.len() {
            return self.complete(now);
        }
        self.current += 1;
        Ok(None)
    }

    /// Step back one question. Revisited questions always reopen unchecked.
    pub fn retreat(&mut self) -> bool {
        if self.is_complete() || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.reset_question_state();
        true
    }

    /// Add or remove the current question from the bookmarks and return
    /// whether it is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self) -> bool {
        if self.is_complete() {
            return self.is_bookmarked(self.current);
        }
        if self.bookmarked.remove(&self.current) {
            false
        } else {
            self.bookmarked.insert(self.current);
            true
        }
    }

    /// Jump to a bookmarked question. Any other index is refused.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.is_complete() || !self.bookmarked.contains(&index) {
            return false;
        }
        self.current = index;
        // Only the checked flag resets; a revealed hint stays visible.
        self.mode = QuestionMode::Open;
        true
    }

    /// Count one second down, completing the session when time runs out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the completed result fails validation.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<Option<QuizResult>, SessionError> {
        if self.is_complete() {
            return Ok(None);
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.complete(now);
        }
        Ok(None)
    }

    /// Score the attempt and emit its result.
    ///
    /// Only the first call yields `Some`; the session stays completed and later
    /// calls return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Result` if the result fails validation.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<Option<QuizResult>, SessionError> {
        if self.result.is_some() {
            return Ok(None);
        }
        let result = self.build_result(now)?;
        self.mode = QuestionMode::Open;
        self.hint_visible = false;
        self.result = Some(result.clone());
        Ok(Some(result))
    }

    fn reset_question_state(&mut self) {
        self.mode = QuestionMode::Open;
        self.hint_visible = false;
    }

    fn build_result(&self, now: DateTime<Utc>) -> Result<QuizResult, SessionError> {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let answers = self
            .selected
            .iter()
            .map(|s| s.clone().unwrap_or_default())
            .collect();

        let result = QuizResultDraft {
            id: None,
            student_name: self.student_name.clone(),
            topic: self.topic.clone(),
            score: self.score(),
            total_questions: total,
            date: now,
            answers,
            difficulty: self.configuration.difficulty(),
            bookmarked_questions: self.bookmarked.clone(),
            time_taken_secs: Some(elapsed_whole_secs(self.started_at, now)),
        }
        .validate()?;
        Ok(result)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("student_name", &self.student_name)
            .field("topic", &self.topic)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("mode", &self.mode)
            .field("remaining_secs", &self.remaining_secs)
            .field("started_at", &self.started_at)
            .field("completed", &self.result.is_some())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::time::fixed_now;

    fn build_topic() -> Topic {
        let q = |prompt: &str, correct: &str, hint: Option<&str>| {
            Question::new(
                prompt,
                vec!["a".into(), "b".into(), "c".into()],
                correct,
                hint.map(str::to_owned),
            )
            .unwrap()
        };
        Topic::new(
            "Sample Topic",
            vec![q("Q1", "a", Some("first")), q("Q2", "b", None), q("Q3", "c", None)],
        )
        .unwrap()
    }

    fn build_session() -> QuizSession {
        let config = QuizConfiguration::new(Difficulty::Easy, 10).unwrap();
        QuizSession::new(&build_topic(), " Ada ", config, BTreeSet::new(), fixed_now()).unwrap()
    }

    #[test]
    fn new_session_snapshots_topic_with_hints() {
        let session = build_session();
        assert_eq!(session.student_name(), "Ada");
        assert_eq!(session.question_count(), 3);
        assert_eq!(session.selected_answers().len(), 3);
        assert_eq!(session.time_limit_secs(), 30);
        assert_eq!(session.remaining_secs(), 30);
        assert_eq!(session.questions()[0].hint(), Some("first"));
        assert_eq!(
            session.questions()[1].hint(),
            Some("Think about the core concepts of Sample Topic related to this question.")
        );
        assert_eq!(session.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn blank_student_is_missing_identity() {
        let config = QuizConfiguration::new(Difficulty::Easy, 10).unwrap();
        let err = QuizSession::new(&build_topic(), "  ", config, BTreeSet::new(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::MissingIdentity));
    }

    #[test]
    fn unknown_topic_is_reported() {
        let bank = QuestionBank::from_topics(vec![build_topic()]).unwrap();
        let config = QuizConfiguration::new(Difficulty::Easy, 10).unwrap();
        let err = QuizSession::start(&bank, "Nope", "Ada", config, BTreeSet::new(), fixed_now())
            .unwrap_err();
        assert!(matches!(err, SessionError::TopicNotFound(name) if name == "Nope"));
    }

    #[test]
    fn selection_locks_after_check() {
        let mut session = build_session();
        assert_eq!(session.check_answer(), None);
        assert!(!session.select_answer("zzz"));

        assert!(session.select_answer("b"));
        assert!(session.select_answer("a"));
        assert_eq!(session.check_answer(), Some(true));
        assert_eq!(session.mode(), QuestionMode::Checked { correct: true });

        assert!(!session.select_answer("b"));
        assert_eq!(session.check_answer(), None);
        assert_eq!(session.current_selection(), Some("a"));
    }

    #[test]
    fn navigation_resets_checked_and_hint() {
        let mut session = build_session();
        session.select_answer("a");
        session.check_answer();
        assert!(session.toggle_hint());
        assert_eq!(session.visible_hint(), Some("first"));

        session.advance(fixed_now()).unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.mode(), QuestionMode::Open);
        assert!(!session.hint_visible());

        assert!(session.retreat());
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_checked());
        assert!(session.select_answer("c"));
    }

    #[test]
    fn retreat_at_first_question_is_noop() {
        let mut session = build_session();
        assert!(!session.retreat());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn bookmark_toggle_is_an_involution() {
        let mut session = build_session();
        session.advance(fixed_now()).unwrap();
        let before = session.bookmarked().clone();
        assert!(session.toggle_bookmark());
        assert!(session.is_bookmarked(1));
        assert!(!session.toggle_bookmark());
        assert_eq!(session.bookmarked(), &before);
    }

    #[test]
    fn jump_only_to_bookmarked_questions() {
        let mut session = build_session();
        assert!(!session.jump_to(2));
        session.advance(fixed_now()).unwrap();
        session.advance(fixed_now()).unwrap();
        session.toggle_bookmark();
        session.retreat();
        session.retreat();
        session.select_answer("a");
        session.check_answer();
        assert!(session.toggle_hint());

        assert!(session.jump_to(2));
        assert_eq!(session.current_index(), 2);
        assert!(!session.is_checked());
        assert!(session.hint_visible());
        assert!(!session.jump_to(7));
    }

    #[test]
    fn out_of_range_bookmarks_are_dropped() {
        let config = QuizConfiguration::new(Difficulty::Easy, 10).unwrap();
        let session = QuizSession::new(
            &build_topic(),
            "Ada",
            config,
            BTreeSet::from([1, 9]),
            fixed_now(),
        )
        .unwrap();
        assert_eq!(session.bookmarked(), &BTreeSet::from([1]));
    }

    #[test]
    fn advance_from_last_question_completes_once() {
        let mut session = build_session();
        session.select_answer("a");
        session.advance(fixed_now()).unwrap();
        session.select_answer("a");
        session.advance(fixed_now()).unwrap();
        session.select_answer("c");

        let done_at = fixed_now() + Duration::seconds(42);
        let result = session.advance(done_at).unwrap().expect("result");
        assert_eq!(result.score(), 2);
        assert_eq!(result.total_questions(), 3);
        assert_eq!(result.answers(), &["a".to_owned(), "a".to_owned(), "c".to_owned()]);
        assert_eq!(result.time_taken_secs(), Some(42));
        assert_eq!(result.difficulty(), Difficulty::Easy);
        assert!(session.is_complete());

        assert!(session.complete(done_at).unwrap().is_none());
        assert!(session.advance(done_at).unwrap().is_none());
        assert_eq!(session.result(), Some(&result));
    }

    #[test]
    fn unanswered_questions_never_score() {
        let mut session = build_session();
        let result = session.complete(fixed_now()).unwrap().unwrap();
        assert_eq!(result.score(), 0);
        assert!(result.answers().iter().all(String::is_empty));
        assert_eq!(result.time_taken_secs(), Some(0));
    }

    #[test]
    fn timer_expiry_completes_with_same_shape() {
        let mut session = build_session();
        session.select_answer("a");
        session.toggle_bookmark();

        let mut emitted = Vec::new();
        for second in 1..=40 {
            let now = fixed_now() + Duration::seconds(second);
            if let Some(result) = session.tick(now).unwrap() {
                emitted.push(result);
            }
        }

        assert_eq!(emitted.len(), 1);
        let result = &emitted[0];
        assert_eq!(result.score(), 1);
        assert_eq!(result.answers().len(), 3);
        assert_eq!(result.bookmarked_questions(), &BTreeSet::from([0]));
        assert_eq!(result.time_taken_secs(), Some(30));
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn transitions_are_ignored_after_completion() {
        let mut session = build_session();
        session.complete(fixed_now()).unwrap();

        assert!(!session.select_answer("a"));
        assert_eq!(session.check_answer(), None);
        assert!(!session.retreat());
        assert!(!session.toggle_bookmark());
        assert!(session.tick(fixed_now()).unwrap().is_none());
        assert_eq!(session.remaining_secs(), 30);
    }

    #[test]
    fn progress_reports_one_based_position() {
        let mut session = build_session();
        session.select_answer("b");
        session.advance(fixed_now()).unwrap();
        let progress = session.progress();
        assert_eq!(progress.question_number, 2);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.answered, 1);
        assert!(!progress.is_complete);
    }
}

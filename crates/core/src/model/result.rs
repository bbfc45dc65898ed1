use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::{Difficulty, ResultId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResultError {
    #[error("student name cannot be empty")]
    EmptyStudentName,

    #[error("topic cannot be empty")]
    EmptyTopic,

    #[error("score {score} exceeds total questions {total}")]
    ScoreOutOfRange { score: u32, total: u32 },

    #[error("total questions must be > 0")]
    NoQuestions,

    #[error("answer count ({answers}) does not match total questions ({total})")]
    AnswerCountMismatch { answers: usize, total: u32 },
}

/// Immutable record of one finished attempt (completed or timed out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    id: ResultId,
    student_name: String,
    topic: String,
    score: u32,
    total_questions: u32,
    date: DateTime<Utc>,
    answers: Vec<String>,
    difficulty: Difficulty,
    bookmarked_questions: BTreeSet<usize>,
    time_taken_secs: Option<u32>,
}

/// Field bundle used to build or rehydrate a `QuizResult`.
#[derive(Debug, Clone)]
pub struct QuizResultDraft {
    pub id: Option<ResultId>,
    pub student_name: String,
    pub topic: String,
    pub score: u32,
    pub total_questions: u32,
    pub date: DateTime<Utc>,
    pub answers: Vec<String>,
    pub difficulty: Difficulty,
    pub bookmarked_questions: BTreeSet<usize>,
    pub time_taken_secs: Option<u32>,
}

impl QuizResultDraft {
    /// Validate a result produced by a finished session.
    ///
    /// A missing id is derived from student, topic and date.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when names are blank, the score exceeds the total,
    /// or the answer list does not have one slot per question.
    pub fn validate(self) -> Result<QuizResult, ResultError> {
        if self.answers.len() != self.total_questions as usize {
            return Err(ResultError::AnswerCountMismatch {
                answers: self.answers.len(),
                total: self.total_questions,
            });
        }
        self.validate_persisted()
    }

    /// Lenient validation for stored records: older entries may carry no
    /// answers, so the per-question answer count is not enforced.
    ///
    /// # Errors
    ///
    /// Returns `ResultError` when names are blank or the score is out of range.
    pub fn validate_persisted(self) -> Result<QuizResult, ResultError> {
        if self.student_name.trim().is_empty() {
            return Err(ResultError::EmptyStudentName);
        }
        if self.topic.trim().is_empty() {
            return Err(ResultError::EmptyTopic);
        }
        if self.total_questions == 0 {
            return Err(ResultError::NoQuestions);
        }
        if self.score > self.total_questions {
            return Err(ResultError::ScoreOutOfRange {
                score: self.score,
                total: self.total_questions,
            });
        }

        let id = self
            .id
            .unwrap_or_else(|| ResultId::derive(&self.student_name, &self.topic, self.date));

        Ok(QuizResult {
            id,
            student_name: self.student_name,
            topic: self.topic,
            score: self.score,
            total_questions: self.total_questions,
            date: self.date,
            answers: self.answers,
            difficulty: self.difficulty,
            bookmarked_questions: self.bookmarked_questions,
            time_taken_secs: self.time_taken_secs,
        })
    }
}

impl QuizResult {
    #[must_use]
    pub fn id(&self) -> &ResultId {
        &self.id
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
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// One entry per question; an empty string means unanswered.
    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn bookmarked_questions(&self) -> &BTreeSet<usize> {
        &self.bookmarked_questions
    }

    #[must_use]
    pub fn time_taken_secs(&self) -> Option<u32> {
        self.time_taken_secs
    }

    /// Unrounded score percentage.
    #[must_use]
    pub fn percent(&self) -> f64 {
        f64::from(self.score) / f64::from(self.total_questions) * 100.0
    }

    /// Score percentage rounded half-up.
    #[must_use]
    pub fn rounded_percent(&self) -> u32 {
        round_percent(self.percent())
    }
}

/// Rounds a non-negative percentage half-up to a whole number.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn round_percent(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + 0.5).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn draft(score: u32, total: u32) -> QuizResultDraft {
        QuizResultDraft {
            id: None,
            student_name: "Ada".into(),
            topic: "Web Development".into(),
            score,
            total_questions: total,
            date: fixed_now(),
            answers: vec![String::new(); total as usize],
            difficulty: Difficulty::Medium,
            bookmarked_questions: BTreeSet::new(),
            time_taken_secs: Some(12),
        }
    }

    #[test]
    fn derives_id_when_missing() {
        let result = draft(3, 7).validate().unwrap();
        assert_eq!(
            result.id().as_str(),
            "Ada-Web-Development-2023-11-14T22:13:20.000Z"
        );
    }

    #[test]
    fn rejects_score_above_total() {
        let err = draft(8, 7).validate().unwrap_err();
        assert_eq!(err, ResultError::ScoreOutOfRange { score: 8, total: 7 });
    }

    #[test]
    fn persisted_records_may_lack_answers() {
        let mut d = draft(2, 4);
        d.answers.clear();
        assert!(matches!(
            d.clone().validate(),
            Err(ResultError::AnswerCountMismatch { answers: 0, total: 4 })
        ));
        assert!(d.validate_persisted().is_ok());
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(draft(5, 7).validate().unwrap().rounded_percent(), 71);
        assert_eq!(draft(1, 8).validate().unwrap().rounded_percent(), 13);
        assert_eq!(round_percent(62.5), 63);
        assert_eq!(round_percent(0.0), 0);
    }
}

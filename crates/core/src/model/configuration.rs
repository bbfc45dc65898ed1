use thiserror::Error;

use crate::model::{Difficulty, TimerSettings};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("seconds per question must be > 0")]
    ZeroSecondsPerQuestion,

    #[error("time limit override must be > 0")]
    ZeroTimeLimit,
}

/// Everything a session needs besides the questions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizConfiguration {
    difficulty: Difficulty,
    seconds_per_question: u32,
    time_limit_override: Option<u32>,
}

impl QuizConfiguration {
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroSecondsPerQuestion` for a zero budget.
    pub fn new(
        difficulty: Difficulty,
        seconds_per_question: u32,
    ) -> Result<Self, ConfigurationError> {
        if seconds_per_question == 0 {
            return Err(ConfigurationError::ZeroSecondsPerQuestion);
        }
        Ok(Self {
            difficulty,
            seconds_per_question,
            time_limit_override: None,
        })
    }

    /// Resolve the per-question budget from stored timer settings.
    #[must_use]
    pub fn from_settings(difficulty: Difficulty, settings: &TimerSettings) -> Self {
        let secs = settings.seconds_per_question(difficulty);
        Self {
            difficulty,
            seconds_per_question: if secs == 0 {
                difficulty.default_seconds_per_question()
            } else {
                secs
            },
            time_limit_override: None,
        }
    }

    /// Replace the per-question multiplication with a flat session budget.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ZeroTimeLimit` for a zero budget.
    pub fn with_time_limit_override(mut self, total_secs: u32) -> Result<Self, ConfigurationError> {
        if total_secs == 0 {
            return Err(ConfigurationError::ZeroTimeLimit);
        }
        self.time_limit_override = Some(total_secs);
        Ok(self)
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }

    #[must_use]
    pub fn time_limit_override(&self) -> Option<u32> {
        self.time_limit_override
    }

    /// Total countdown for a quiz of `question_count` questions.
    #[must_use]
    pub fn total_time_limit(&self, question_count: usize) -> u32 {
        if let Some(flat) = self.time_limit_override {
            return flat;
        }
        let count = u32::try_from(question_count).unwrap_or(u32::MAX);
        count.saturating_mul(self.seconds_per_question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easy_defaults_give_sixty_seconds_per_question() {
        let config = QuizConfiguration::from_settings(Difficulty::Easy, &TimerSettings::default());
        assert_eq!(config.seconds_per_question(), 60);
        assert_eq!(config.total_time_limit(7), 420);
    }

    #[test]
    fn flat_override_replaces_multiplication() {
        let config = QuizConfiguration::new(Difficulty::Hard, 30)
            .unwrap()
            .with_time_limit_override(100)
            .unwrap();
        assert_eq!(config.total_time_limit(7), 100);
    }

    #[test]
    fn zero_budgets_are_rejected() {
        assert!(QuizConfiguration::new(Difficulty::Easy, 0).is_err());
        assert!(
            QuizConfiguration::new(Difficulty::Easy, 10)
                .unwrap()
                .with_time_limit_override(0)
                .is_err()
        );
    }
}

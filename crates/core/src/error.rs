use thiserror::Error;

use crate::model::{
    ConfigurationError, ParseDifficultyError, QuestionError, ResultError, TimerSettingsError,
    TopicError,
};

/// Umbrella for the domain validation errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Result(#[from] ResultError),
    #[error(transparent)]
    TimerSettings(#[from] TimerSettingsError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
}

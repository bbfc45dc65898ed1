mod configuration;
mod difficulty;
mod ids;
mod question;
mod result;
mod settings;

pub use configuration::{ConfigurationError, QuizConfiguration};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use ids::{ParseIdError, ResultId, dash_whitespace, iso_timestamp};
pub use question::{Question, QuestionError, Topic, TopicError, default_hint};
pub use result::{QuizResult, QuizResultDraft, ResultError, round_percent};
pub use settings::{
    CUSTOM_SECONDS_RANGE, EASY_SECONDS_RANGE, HARD_SECONDS_RANGE, MEDIUM_SECONDS_RANGE,
    TimerSettings, TimerSettingsDraft, TimerSettingsError,
};

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::model::Difficulty;

pub const EASY_SECONDS_RANGE: RangeInclusive<u32> = 10..=120;
pub const MEDIUM_SECONDS_RANGE: RangeInclusive<u32> = 20..=120;
pub const HARD_SECONDS_RANGE: RangeInclusive<u32> = 15..=90;
pub const CUSTOM_SECONDS_RANGE: RangeInclusive<u32> = 10..=60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimerSettingsError {
    #[error("{difficulty} timer must be between {min} and {max} seconds, got {value}")]
    OutOfRange {
        difficulty: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("custom timer must be between {min} and {max} seconds, got {value}")]
    CustomOutOfRange { value: u32, min: u32, max: u32 },

    #[error("{field} timer must be > 0")]
    NotPositive { field: &'static str },
}

/// Per-question time budgets, plus the optional custom override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    easy_secs: u32,
    medium_secs: u32,
    hard_secs: u32,
    custom_secs: Option<u32>,
    use_custom: bool,
}

/// Unvalidated timer values as entered by an administrator or read from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettingsDraft {
    pub easy_secs: u32,
    pub medium_secs: u32,
    pub hard_secs: u32,
    pub custom_secs: Option<u32>,
    pub use_custom: bool,
}

impl Default for TimerSettingsDraft {
    fn default() -> Self {
        let defaults = TimerSettings::default();
        Self {
            easy_secs: defaults.easy_secs,
            medium_secs: defaults.medium_secs,
            hard_secs: defaults.hard_secs,
            custom_secs: defaults.custom_secs,
            use_custom: defaults.use_custom,
        }
    }
}

fn check_range(
    difficulty: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
) -> Result<(), TimerSettingsError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(TimerSettingsError::OutOfRange {
            difficulty,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

impl TimerSettingsDraft {
    /// Validate admin input against the allowed slider ranges.
    ///
    /// # Errors
    ///
    /// Returns `TimerSettingsError` if any value is outside its range.
    pub fn validate(self) -> Result<TimerSettings, TimerSettingsError> {
        check_range("easy", self.easy_secs, &EASY_SECONDS_RANGE)?;
        check_range("medium", self.medium_secs, &MEDIUM_SECONDS_RANGE)?;
        check_range("hard", self.hard_secs, &HARD_SECONDS_RANGE)?;
        if let Some(custom) = self.custom_secs {
            if !CUSTOM_SECONDS_RANGE.contains(&custom) {
                return Err(TimerSettingsError::CustomOutOfRange {
                    value: custom,
                    min: *CUSTOM_SECONDS_RANGE.start(),
                    max: *CUSTOM_SECONDS_RANGE.end(),
                });
            }
        }
        Ok(self.into_settings())
    }

    fn into_settings(self) -> TimerSettings {
        TimerSettings {
            easy_secs: self.easy_secs,
            medium_secs: self.medium_secs,
            hard_secs: self.hard_secs,
            custom_secs: self.custom_secs,
            use_custom: self.use_custom,
        }
    }
}

impl TimerSettings {
    /// Rehydrate settings from storage. Only positivity is enforced here, the
    /// admin ranges apply when saving.
    ///
    /// # Errors
    ///
    /// Returns `TimerSettingsError::NotPositive` for zero values.
    pub fn from_persisted(draft: TimerSettingsDraft) -> Result<Self, TimerSettingsError> {
        for (field, value) in [
            ("easy", Some(draft.easy_secs)),
            ("medium", Some(draft.medium_secs)),
            ("hard", Some(draft.hard_secs)),
            ("custom", draft.custom_secs),
        ] {
            if value == Some(0) {
                return Err(TimerSettingsError::NotPositive { field });
            }
        }
        Ok(draft.into_settings())
    }

    #[must_use]
    pub fn easy_secs(&self) -> u32 {
        self.easy_secs
    }

    #[must_use]
    pub fn medium_secs(&self) -> u32 {
        self.medium_secs
    }

    #[must_use]
    pub fn hard_secs(&self) -> u32 {
        self.hard_secs
    }

    #[must_use]
    pub fn custom_secs(&self) -> Option<u32> {
        self.custom_secs
    }

    #[must_use]
    pub fn use_custom(&self) -> bool {
        self.use_custom
    }

    #[must_use]
    pub fn secs_for(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy_secs,
            Difficulty::Medium => self.medium_secs,
            Difficulty::Hard => self.hard_secs,
        }
    }

    /// Seconds per question: the custom value when enabled and present, else
    /// the difficulty's configured value.
    #[must_use]
    pub fn seconds_per_question(&self, difficulty: Difficulty) -> u32 {
        match (self.use_custom, self.custom_secs) {
            (true, Some(custom)) => custom,
            _ => self.secs_for(difficulty),
        }
    }

    #[must_use]
    pub fn to_draft(&self) -> TimerSettingsDraft {
        TimerSettingsDraft {
            easy_secs: self.easy_secs,
            medium_secs: self.medium_secs,
            hard_secs: self.hard_secs,
            custom_secs: self.custom_secs,
            use_custom: self.use_custom,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            easy_secs: Difficulty::Easy.default_seconds_per_question(),
            medium_secs: Difficulty::Medium.default_seconds_per_question(),
            hard_secs: Difficulty::Hard.default_seconds_per_question(),
            custom_secs: None,
            use_custom: false,
        }
    }
}

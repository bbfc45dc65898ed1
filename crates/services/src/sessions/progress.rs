use crate::format::format_clock;

/// Remaining time below which the host should warn the student.
pub const LOW_TIME_THRESHOLD_SECS: u32 = 30;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based number of the question on screen.
    pub question_number: usize,
    pub total: usize,
    pub answered: usize,
    pub bookmarked: usize,
    pub remaining_secs: u32,
    pub time_limit_secs: u32,
    pub is_complete: bool,
}

impl SessionProgress {
    #[must_use]
    pub fn is_low_time(&self) -> bool {
        !self.is_complete && self.remaining_secs < LOW_TIME_THRESHOLD_SECS
    }

    #[must_use]
    pub fn remaining_clock(&self) -> String {
        format_clock(self.remaining_secs)
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.question_number == self.total
    }
}

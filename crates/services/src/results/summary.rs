//! Derived views shown after an attempt and on the admin dashboard.

use quiz_core::model::{QuizResult, round_percent};

use super::stats::{GroupStat, StatsTable, history_for, improvement_percent};
use crate::format::format_clock;

/// Encouragement line for a rounded score percentage.
#[must_use]
pub fn score_message(percent: u32) -> &'static str {
    match percent {
        80.. => "Excellent! You've mastered this topic.",
        60..=79 => "Great job! You have a good understanding.",
        40..=59 => "Good effort! Keep practicing to improve.",
        _ => "Keep studying and try again. You'll get better!",
    }
}

/// Text offered to the platform share sheet.
#[must_use]
pub fn share_text(result: &QuizResult) -> String {
    format!(
        "I scored {}/{} ({}%) on the {} quiz!",
        result.score(),
        result.total_questions(),
        result.rounded_percent(),
        result.topic()
    )
}

/// Score card for a student's latest attempt on a topic.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub result: QuizResult,
    pub percentage: u32,
    pub message: &'static str,
    /// Attempts on this topic by this student, including the latest.
    pub attempts: usize,
    /// Percentage-point change against the previous attempt.
    pub improvement_percent: Option<f64>,
    pub time_taken: String,
}

impl ResultSummary {
    /// Build the card for the most recent attempt of `student` on `topic`.
    #[must_use]
    pub fn latest(student: &str, topic: &str, results: &[QuizResult]) -> Option<Self> {
        let history = history_for(student, topic, results);
        let latest = history.last()?;
        let percentage = latest.rounded_percent();
        Some(Self {
            result: (*latest).clone(),
            percentage,
            message: score_message(percentage),
            attempts: history.len(),
            improvement_percent: improvement_percent(&history),
            time_taken: format_clock(latest.time_taken_secs().unwrap_or(0)),
        })
    }

    #[must_use]
    pub fn share_text(&self) -> String {
        share_text(&self.result)
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOverview {
    pub total_results: usize,
    pub average_score_percent: u32,
    pub most_popular_topic: Option<String>,
    pub most_active_student: Option<String>,
    pub per_topic: StatsTable,
    pub per_student: StatsTable,
}

impl AdminOverview {
    #[must_use]
    pub fn from_results(results: &[QuizResult]) -> Self {
        let per_topic = super::stats::per_topic_stats(results);
        let per_student = super::stats::per_student_stats(results);
        let average_score_percent = if results.is_empty() {
            0
        } else {
            let total: f64 = results.iter().map(QuizResult::percent).sum();
            let count = u32::try_from(results.len()).unwrap_or(u32::MAX);
            round_percent(total / f64::from(count))
        };
        Self {
            total_results: results.len(),
            average_score_percent,
            most_popular_topic: most_attempted(&per_topic).map(|s| s.key.clone()),
            most_active_student: most_attempted(&per_student).map(|s| s.key.clone()),
            per_topic,
            per_student,
        }
    }
}

/// Entry with the most attempts; ties go to the first-encountered key.
#[must_use]
pub fn most_attempted(stats: &StatsTable) -> Option<&GroupStat> {
    stats.iter().fold(None, |best: Option<&GroupStat>, entry| match best {
        Some(current) if current.attempt_count >= entry.attempt_count => Some(current),
        _ => Some(entry),
    })
}

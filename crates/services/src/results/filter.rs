//! Admin-side result filtering.

use quiz_core::model::{QuizResult, ResultId};

/// Filter value that disables the topic or difficulty criterion.
pub const ALL: &str = "all";

/// Admin filter criteria. All criteria must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFilter {
    /// Case-insensitive substring of the student name or topic.
    pub search_term: String,
    /// Exact topic name, or [`ALL`].
    pub topic: String,
    /// Exact difficulty (`easy`, `medium`, `hard`), or [`ALL`].
    pub difficulty: String,
}

impl Default for ResultFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            topic: ALL.to_owned(),
            difficulty: ALL.to_owned(),
        }
    }
}

impl ResultFilter {
    #[must_use]
    pub fn new(
        search_term: impl Into<String>,
        topic: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            search_term: search_term.into(),
            topic: topic.into(),
            difficulty: difficulty.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, result: &QuizResult) -> bool {
        self.matches_search(result)
            && criterion_matches(&self.topic, result.topic())
            && criterion_matches(&self.difficulty, result.difficulty().as_str())
    }

    fn matches_search(&self, result: &QuizResult) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        result.student_name().to_lowercase().contains(&needle)
            || result.topic().to_lowercase().contains(&needle)
    }
}

fn criterion_matches(wanted: &str, actual: &str) -> bool {
    wanted.is_empty() || wanted == ALL || wanted == actual
}

/// Results matching `filter`, in input order.
#[must_use]
pub fn filter_results<'a>(all: &'a [QuizResult], filter: &ResultFilter) -> Vec<&'a QuizResult> {
    all.iter().filter(|r| filter.matches(r)).collect()
}

/// Ids of every result that passes `filter`, for "select all".
#[must_use]
pub fn select_all_filtered(all: &[QuizResult], filter: &ResultFilter) -> Vec<ResultId> {
    filter_results(all, filter)
        .into_iter()
        .map(|r| r.id().clone())
        .collect()
}

//! Per-topic and per-student statistics over stored results.

use quiz_core::model::{QuizResult, round_percent};

/// Attempt count and rounded average percentage for one topic or student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupStat {
    pub key: String,
    pub attempt_count: u32,
    pub average_score_percent: u32,
}

/// Statistics keyed by topic or student, in first-encountered order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsTable {
    entries: Vec<GroupStat>,
}

impl StatsTable {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&GroupStat> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GroupStat> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a StatsTable {
    type Item = &'a GroupStat;
    type IntoIter = std::slice::Iter<'a, GroupStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn aggregate_by<'a>(
    results: impl IntoIterator<Item = &'a QuizResult>,
    key_of: impl Fn(&QuizResult) -> &str,
) -> StatsTable {
    let mut sums: Vec<(String, u32, f64)> = Vec::new();
    for result in results {
        let key = key_of(result);
        match sums.iter_mut().find(|(k, _, _)| k == key) {
            Some((_, count, total)) => {
                *count += 1;
                *total += result.percent();
            }
            None => sums.push((key.to_owned(), 1, result.percent())),
        }
    }

    let entries = sums
        .into_iter()
        .map(|(key, count, total)| GroupStat {
            key,
            attempt_count: count,
            average_score_percent: round_percent(total / f64::from(count)),
        })
        .collect();
    StatsTable { entries }
}

/// Attempts and average percentage per topic. Topics without results are absent.
#[must_use]
pub fn per_topic_stats<'a>(results: impl IntoIterator<Item = &'a QuizResult>) -> StatsTable {
    aggregate_by(results, QuizResult::topic)
}

/// Attempts and average percentage per student name.
#[must_use]
pub fn per_student_stats<'a>(results: impl IntoIterator<Item = &'a QuizResult>) -> StatsTable {
    aggregate_by(results, QuizResult::student_name)
}

/// Entry with the highest average; ties go to the first-encountered key.
#[must_use]
pub fn best_topic(stats: &StatsTable) -> Option<&GroupStat> {
    stats.iter().fold(None, |best: Option<&GroupStat>, entry| match best {
        Some(current) if current.average_score_percent >= entry.average_score_percent => {
            Some(current)
        }
        _ => Some(entry),
    })
}

/// The `n` most recent results for `student`, newest first.
///
/// Results sharing a timestamp keep their stored order.
#[must_use]
pub fn recent_results_for<'a>(
    student: &str,
    results: &'a [QuizResult],
    n: usize,
) -> Vec<&'a QuizResult> {
    let mut mine: Vec<&QuizResult> = results
        .iter()
        .filter(|r| r.student_name() == student)
        .collect();
    mine.sort_by(|a, b| b.date().cmp(&a.date()));
    mine.truncate(n);
    mine
}

/// Attempts of `student` on `topic`, oldest first.
#[must_use]
pub fn history_for<'a>(
    student: &str,
    topic: &str,
    results: &'a [QuizResult],
) -> Vec<&'a QuizResult> {
    let mut history: Vec<&QuizResult> = results
        .iter()
        .filter(|r| r.student_name() == student && r.topic() == topic)
        .collect();
    history.sort_by_key(|r| r.date());
    history
}

/// Percentage-point change from the second-to-last to the last attempt.
///
/// `sorted` must be ascending by date. Returns `None` for fewer than two
/// attempts.
#[must_use]
pub fn improvement_percent(sorted: &[&QuizResult]) -> Option<f64> {
    match sorted {
        [.., previous, latest] => Some(latest.percent() - previous.percent()),
        _ => None,
    }
}

/// Count and best score of previous attempts on one topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriorAttempts {
    pub count: usize,
    pub best_score: Option<u32>,
}

impl PriorAttempts {
    #[must_use]
    pub fn from_history(history: &[&QuizResult]) -> Self {
        Self {
            count: history.len(),
            best_score: history.iter().map(|r| r.score()).max(),
        }
    }
}

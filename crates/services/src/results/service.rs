use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::QuestionBank;
use quiz_core::model::{Difficulty, QuizResult, ResultId};
use storage::repository::{ResultRepository, SettingKey, SettingsRepository};

use super::export::{CSV_FILE_NAME, text_summary, text_summary_file_name, to_csv};
use super::filter::{ResultFilter, filter_results, select_all_filtered};
use super::stats::{StatsTable, best_topic, per_topic_stats, recent_results_for};
use super::summary::{AdminOverview, ResultSummary};
use crate::Clock;
use crate::error::{ExportError, ResultsServiceError};
use crate::format::format_time_taken;
use crate::notice::{StoreNotice, WithNotice};

/// Number of recent attempts shown on a student's progress page.
pub const RECENT_RESULTS: usize = 3;

/// Row of the admin results table.
///
/// Carries raw values plus the formatted time, which renders `N/A` when
/// missing or zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultListItem {
    pub id: ResultId,
    pub student_name: String,
    pub topic: String,
    pub score: u32,
    pub total_questions: u32,
    pub percentage: u32,
    pub date: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub time_taken: String,
}

impl ResultListItem {
    #[must_use]
    pub fn from_result(result: &QuizResult) -> Self {
        Self {
            id: result.id().clone(),
            student_name: result.student_name().to_owned(),
            topic: result.topic().to_owned(),
            score: result.score(),
            total_questions: result.total_questions(),
            percentage: result.rounded_percent(),
            date: result.date(),
            difficulty: result.difficulty(),
            time_taken: format_time_taken(result.time_taken_secs()),
        }
    }
}

/// A student's own progress page.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProgress {
    pub recent: Vec<QuizResult>,
    pub per_topic: StatsTable,
    pub best_topic: Option<String>,
}

/// Where an export landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub exported: usize,
}

/// Read, filter, summarise, export and delete stored results.
#[derive(Clone)]
pub struct ResultsService {
    clock: Clock,
    results: Arc<dyn ResultRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl ResultsService {
    #[must_use]
    pub fn new(
        clock: Clock,
        results: Arc<dyn ResultRepository>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            clock,
            results,
            settings,
        }
    }

    /// All stored results, or an empty list plus a notice if the store fails.
    pub async fn load_all(&self) -> WithNotice<Vec<QuizResult>> {
        match self.results.list_results().await {
            Ok(results) => WithNotice::clean(results),
            Err(err) => {
                tracing::warn!(error = %err, "results read failed, treating store as empty");
                WithNotice::with_notices(
                    Vec::new(),
                    vec![StoreNotice::read_failed("results", &err)],
                )
            }
        }
    }

    /// Admin table rows passing `filter`, in stored order.
    pub async fn list_filtered(&self, filter: &ResultFilter) -> WithNotice<Vec<ResultListItem>> {
        self.load_all().await.map(|all| {
            filter_results(&all, filter)
                .into_iter()
                .map(ResultListItem::from_result)
                .collect()
        })
    }

    /// Ids of every result currently passing `filter`.
    pub async fn select_all_filtered(&self, filter: &ResultFilter) -> WithNotice<Vec<ResultId>> {
        self.load_all()
            .await
            .map(|all| select_all_filtered(&all, filter))
    }

    pub async fn overview(&self) -> WithNotice<AdminOverview> {
        self.load_all()
            .await
            .map(|all| AdminOverview::from_results(&all))
    }

    pub async fn student_progress(&self, student: &str) -> WithNotice<StudentProgress> {
        self.load_all().await.map(|all| {
            let mine: Vec<QuizResult> = all
                .iter()
                .filter(|r| r.student_name() == student)
                .cloned()
                .collect();
            let per_topic = per_topic_stats(&mine);
            let best_topic = best_topic(&per_topic).map(|s| s.key.clone());
            StudentProgress {
                recent: recent_results_for(student, &all, RECENT_RESULTS)
                    .into_iter()
                    .cloned()
                    .collect(),
                per_topic,
                best_topic,
            }
        })
    }

    /// Score card for the latest attempt of `student` on `topic`.
    pub async fn latest_summary(
        &self,
        student: &str,
        topic: &str,
    ) -> WithNotice<Option<ResultSummary>> {
        self.load_all()
            .await
            .map(|all| ResultSummary::latest(student, topic, &all))
    }

    /// Delete the given results and return what remains.
    ///
    /// # Errors
    ///
    /// Returns `ResultsServiceError::Storage` if the store cannot be updated;
    /// stored data is left as it was.
    pub async fn delete_selected(
        &self,
        ids: &[ResultId],
    ) -> Result<Vec<QuizResult>, ResultsServiceError> {
        let remaining = self.results.delete_results(ids).await?;
        tracing::info!(requested = ids.len(), remaining = remaining.len(), "results deleted");
        Ok(remaining)
    }

    /// Delete every result and the timer settings. Identity and bookmarks stay.
    ///
    /// # Errors
    ///
    /// Returns `ResultsServiceError::Storage` if either store cannot be updated.
    pub async fn reset_all(&self) -> Result<(), ResultsServiceError> {
        self.results.clear_results().await?;
        for key in &SettingKey::TIMER_KEYS {
            self.settings.remove_setting(key).await?;
        }
        tracing::info!("all results and timer settings reset");
        Ok(())
    }

    /// CSV of the selected results, or of every result when none is selected.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Storage` if results cannot be read.
    pub async fn export_csv(&self, selected: &[ResultId]) -> Result<(String, usize), ExportError> {
        let all = self.results.list_results().await?;
        let chosen: Vec<&QuizResult> = if selected.is_empty() {
            all.iter().collect()
        } else {
            all.iter().filter(|r| selected.contains(r.id())).collect()
        };
        Ok((to_csv(chosen.iter().copied()), chosen.len()))
    }

    /// Write the CSV export as `quiz-results.csv` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if results cannot be read or the file cannot be written.
    pub async fn export_csv_to_dir(
        &self,
        dir: &Path,
        selected: &[ResultId],
    ) -> Result<ExportReport, ExportError> {
        let (csv, exported) = self.export_csv(selected).await?;
        let path = dir.join(CSV_FILE_NAME);
        write_file(&path, csv).await?;
        tracing::info!(path = %path.display(), exported, "results exported");
        Ok(ExportReport { path, exported })
    }

    /// Plain-text report for one stored result.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the result or its topic cannot be found.
    pub async fn text_summary(
        &self,
        id: &ResultId,
        bank: &QuestionBank,
    ) -> Result<(String, String), ExportError> {
        let all = self.results.list_results().await?;
        let result = all
            .iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| ExportError::UnknownResult(id.clone()))?;
        let topic = bank
            .find(result.topic())
            .ok_or_else(|| ExportError::TopicNotFound(result.topic().to_owned()))?;
        let body = text_summary(result, topic, self.clock.now())?;
        Ok((text_summary_file_name(topic.name()), body))
    }

    /// Write the text report for one result into `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the report cannot be built or written.
    pub async fn text_summary_to_dir(
        &self,
        dir: &Path,
        id: &ResultId,
        bank: &QuestionBank,
    ) -> Result<ExportReport, ExportError> {
        let (file_name, body) = self.text_summary(id, bank).await?;
        let path = dir.join(file_name);
        write_file(&path, body).await?;
        Ok(ExportReport { path, exported: 1 })
    }
}

async fn write_file(path: &Path, contents: String) -> Result<(), ExportError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

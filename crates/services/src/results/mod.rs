//! Aggregation over stored results: statistics, filtering, exports and the
//! admin-facing service.

mod export;
mod filter;
mod service;
mod stats;
mod summary;

pub use export::{CSV_FILE_NAME, CSV_HEADER, csv_row, text_summary, text_summary_file_name, to_csv};
pub use filter::{ALL, ResultFilter, filter_results, select_all_filtered};
pub use service::{ExportReport, RECENT_RESULTS, ResultListItem, ResultsService, StudentProgress};
pub use stats::{
    GroupStat, PriorAttempts, StatsTable, best_topic, history_for, improvement_percent,
    per_student_stats, per_topic_stats, recent_results_for,
};
pub use summary::{AdminOverview, ResultSummary, most_attempted, score_message, share_text};

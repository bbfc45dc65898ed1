//! CSV and plain-text exports.
//!
//! CSV fields are joined with bare commas. Values containing a comma, such as
//! a student name, are not quoted and will shift columns.

use chrono::{DateTime, Utc};
use quiz_core::model::{QuizResult, Topic};

use crate::error::ExportError;
use crate::format::{format_clock, format_short_date, topic_slug};

pub const CSV_FILE_NAME: &str = "quiz-results.csv";

pub const CSV_HEADER: &str =
    "Student Name,Topic,Score,Total Questions,Percentage,Date,Difficulty,Time Taken (s)";

const NOT_ANSWERED: &str = "Not answered";

/// One CSV row, without a trailing newline.
#[must_use]
pub fn csv_row(result: &QuizResult) -> String {
    let time_taken = match result.time_taken_secs() {
        Some(secs) if secs > 0 => secs.to_string(),
        _ => "N/A".to_owned(),
    };
    [
        result.student_name().to_owned(),
        result.topic().to_owned(),
        result.score().to_string(),
        result.total_questions().to_string(),
        format!("{}%", result.rounded_percent()),
        format_short_date(result.date()),
        result.difficulty().as_str().to_owned(),
        time_taken,
    ]
    .join(",")
}

/// Header plus one row per result, newline separated.
#[must_use]
pub fn to_csv<'a>(results: impl IntoIterator<Item = &'a QuizResult>) -> String {
    std::iter::once(CSV_HEADER.to_owned())
        .chain(results.into_iter().map(csv_row))
        .collect::<Vec<_>>()
        .join("\n")
}

/// File name for a single-result text summary, e.g. `web-development-results.txt`.
#[must_use]
pub fn text_summary_file_name(topic: &str) -> String {
    format!("{}-results.txt", topic_slug(topic))
}

/// Plain-text report of one attempt, question by question.
///
/// `printed_on` is the date shown in the header.
///
/// # Errors
///
/// Returns `ExportError::TopicMismatch` if `topic` is not the result's topic.
pub fn text_summary(
    result: &QuizResult,
    topic: &Topic,
    printed_on: DateTime<Utc>,
) -> Result<String, ExportError> {
    if result.topic() != topic.name() {
        return Err(ExportError::TopicMismatch {
            result_topic: result.topic().to_owned(),
            topic: topic.name().to_owned(),
        });
    }

    let blocks = topic
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let given = result
                .answers()
                .get(i)
                .map(String::as_str)
                .filter(|a| !a.is_empty());
            let verdict = if given.is_some_and(|a| question.is_correct(a)) {
                "✓ Correct"
            } else {
                "✗ Incorrect"
            };
            format!(
                "\n{}. {}\nYour answer: {}\nCorrect answer: {}\n{}\n",
                i + 1,
                question.prompt(),
                given.unwrap_or(NOT_ANSWERED),
                question.correct_answer(),
                verdict,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let report = format!(
        "Quiz Results for {name}\n\
         Topic: {topic}\n\
         Date: {date}\n\
         Score: {score}/{total} ({pct}%)\n\
         Difficulty: {difficulty}\n\
         Time Taken: {time}\n\
         \n\
         Question Summary:\n\
         {blocks}",
        name = result.student_name(),
        topic = topic.name(),
        date = format_short_date(printed_on),
        score = result.score(),
        total = result.total_questions(),
        pct = result.rounded_percent(),
        difficulty = result.difficulty(),
        time = format_clock(result.time_taken_secs().unwrap_or(0)),
    );
    Ok(report.trim().to_owned())
}

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quiz_core::model::{Difficulty, QuizResult, QuizResultDraft, ResultId};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn answers_to_json(answers: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(answers).map_err(ser)
}

pub(crate) fn bookmarks_to_json(bookmarks: &BTreeSet<usize>) -> Result<String, StorageError> {
    serde_json::to_string(bookmarks).map_err(ser)
}

pub(crate) fn map_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizResult, StorageError> {
    let student_name: String = row.try_get("student_name").map_err(ser)?;
    let topic: String = row.try_get("topic").map_err(ser)?;
    let date: DateTime<Utc> = row.try_get("date").map_err(ser)?;
    let id = match row.try_get::<Option<String>, _>("id").map_err(ser)? {
        Some(id) if !id.trim().is_empty() => ResultId::new(id),
        // Legacy rows: derive from the stored date text as written.
        _ => {
            let raw_date: String = row.try_get("date").map_err(ser)?;
            ResultId::from_parts(&student_name, &topic, &raw_date)
        }
    };
    let difficulty: Difficulty = row
        .try_get::<String, _>("difficulty")
        .map_err(ser)?
        .parse()
        .map_err(ser)?;
    let answers: Vec<String> =
        serde_json::from_str(&row.try_get::<String, _>("answers").map_err(ser)?).map_err(ser)?;
    let bookmarked_questions: BTreeSet<usize> = serde_json::from_str(
        &row.try_get::<String, _>("bookmarked_questions")
            .map_err(ser)?,
    )
    .map_err(ser)?;
    let time_taken_secs = row
        .try_get::<Option<i64>, _>("time_taken_secs")
        .map_err(ser)?
        .map(|v| u32_from_i64("time_taken_secs", v))
        .transpose()?;

    QuizResultDraft {
        id: Some(id),
        student_name,
        topic,
        score: u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?,
        total_questions: u32_from_i64(
            "total_questions",
            row.try_get::<i64, _>("total_questions").map_err(ser)?,
        )?,
        date,
        answers,
        difficulty,
        bookmarked_questions,
        time_taken_secs,
    }
    .validate_persisted()
    .map_err(ser)
}

use async_trait::async_trait;
use quiz_core::model::{QuizResult, ResultId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{answers_to_json, bookmarks_to_json, map_result_row};
use crate::repository::{ResultRepository, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

const SELECT_ALL: &str = r"
    SELECT
        seq, id, student_name, topic, score, total_questions, date,
        answers, difficulty, bookmarked_questions, time_taken_secs
    FROM quiz_results
    ORDER BY seq ASC
";

#[async_trait]
impl ResultRepository for SqliteRepository {
    async fn list_results(&self) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_result_row(&row)?);
        }
        Ok(out)
    }

    async fn append_result(&self, result: &QuizResult) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO quiz_results (
                    id, student_name, topic, score, total_questions, date,
                    answers, difficulty, bookmarked_questions, time_taken_secs
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ",
        )
        .bind(result.id().as_str())
        .bind(result.student_name())
        .bind(result.topic())
        .bind(i64::from(result.score()))
        .bind(i64::from(result.total_questions()))
        .bind(result.date())
        .bind(answers_to_json(result.answers())?)
        .bind(result.difficulty().as_str())
        .bind(bookmarks_to_json(result.bookmarked_questions())?)
        .bind(result.time_taken_secs().map(i64::from))
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }

    async fn delete_results(&self, ids: &[ResultId]) -> Result<Vec<QuizResult>, StorageError> {
        if !ids.is_empty() {
            // Match on the mapped id so legacy rows with a derived id are found too.
            let rows = sqlx::query(SELECT_ALL)
                .fetch_all(&self.pool)
                .await
                .map_err(conn)?;
            let mut seqs = Vec::new();
            for row in &rows {
                let result = map_result_row(row)?;
                if ids.contains(result.id()) {
                    seqs.push(row.try_get::<i64, _>("seq").map_err(conn)?);
                }
            }

            if !seqs.is_empty() {
                let mut sql = String::from("DELETE FROM quiz_results WHERE seq IN (");
                for i in 0..seqs.len() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push('?');
                    sql.push_str(&(i + 1).to_string());
                }
                sql.push(')');

                let mut query = sqlx::query(&sql);
                for seq in seqs {
                    query = query.bind(seq);
                }
                let done = query.execute(&self.pool).await.map_err(conn)?;
                tracing::debug!(deleted = done.rows_affected(), "deleted quiz results");
            }
        }

        self.list_results().await
    }

    async fn clear_results(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM quiz_results")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}

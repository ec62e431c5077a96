//! Feedback repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert feedback rows and list them per question.
//!
//! # Invariants
//! - `create_feedback` calls `Feedback::validate()` before SQL mutations.
//! - Lists are sorted by `created_at DESC`; rows sharing a timestamp keep
//!   reverse insertion order (`rowid DESC`).
//! - This layer does not check that the referenced question exists.

use super::{parse_stored_uuid, RepoResult};
use crate::model::feedback::{Feedback, FeedbackId};
use crate::model::question::QuestionId;
use rusqlite::{params, Connection, Row};

/// Repository interface for feedback persistence.
pub trait FeedbackRepository {
    /// Persists one feedback entry and returns its stable ID.
    fn create_feedback(&self, feedback: &Feedback) -> RepoResult<FeedbackId>;
    /// Lists every entry for `question_id`, newest first.
    fn list_feedback_for_question(&self, question_id: QuestionId) -> RepoResult<Vec<Feedback>>;
}

/// SQLite-backed feedback repository.
pub struct SqliteFeedbackRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFeedbackRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FeedbackRepository for SqliteFeedbackRepository<'_> {
    fn create_feedback(&self, feedback: &Feedback) -> RepoResult<FeedbackId> {
        feedback.validate()?;

        self.conn.execute(
            "INSERT INTO feedbacks (id, feedback, question_id, created_at)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                feedback.id.to_string(),
                feedback.text.as_str(),
                feedback.question_id.to_string(),
                feedback.created_at,
            ],
        )?;

        Ok(feedback.id)
    }

    fn list_feedback_for_question(&self, question_id: QuestionId) -> RepoResult<Vec<Feedback>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, feedback, question_id, created_at
             FROM feedbacks
             WHERE question_id = ?1
             ORDER BY created_at DESC, rowid DESC;",
        )?;

        let mut rows = stmt.query([question_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(parse_feedback_row(row)?);
        }

        Ok(items)
    }
}

fn parse_feedback_row(row: &Row<'_>) -> RepoResult<Feedback> {
    let id_text: String = row.get("id")?;
    let question_text: String = row.get("question_id")?;

    Ok(Feedback {
        id: parse_stored_uuid(&id_text, "feedbacks.id")?,
        text: row.get("feedback")?,
        question_id: parse_stored_uuid(&question_text, "feedbacks.question_id")?,
        created_at: row.get("created_at")?,
    })
}

//! Question repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert and look up rows in `questions`.
//!
//! # Invariants
//! - `create_question` calls `Question::validate()` before SQL mutations.
//! - Lookups return `None` for unknown IDs; absence is not an error here.

use super::{parse_stored_uuid, RepoResult};
use crate::model::question::{Question, QuestionId, QuestionRecord};
use rusqlite::{params, Connection};

/// Repository interface for question persistence.
pub trait QuestionRepository {
    /// Persists one question and returns its stable ID.
    fn create_question(&self, question: &Question) -> RepoResult<QuestionId>;
    /// Gets one question projection by ID.
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<QuestionRecord>>;
    /// Returns whether a question with `id` is currently stored.
    fn question_exists(&self, id: QuestionId) -> RepoResult<bool>;
}

/// SQLite-backed question repository.
pub struct SqliteQuestionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuestionRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QuestionRepository for SqliteQuestionRepository<'_> {
    fn create_question(&self, question: &Question) -> RepoResult<QuestionId> {
        question.validate()?;

        self.conn.execute(
            "INSERT INTO questions (id, question, created_at) VALUES (?1, ?2, ?3);",
            params![
                question.id.to_string(),
                question.text.as_str(),
                question.created_at,
            ],
        )?;

        Ok(question.id)
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<QuestionRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, question FROM questions WHERE id = ?1;")?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            let id_text: String = row.get("id")?;
            return Ok(Some(QuestionRecord {
                id: parse_stored_uuid(&id_text, "questions.id")?,
                text: row.get("question")?,
            }));
        }

        Ok(None)
    }

    fn question_exists(&self, id: QuestionId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM questions WHERE id = ?1);",
            [id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

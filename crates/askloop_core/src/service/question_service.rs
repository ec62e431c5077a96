//! Question use-case service.
//!
//! # Responsibility
//! - Create questions from raw submitted text.
//! - Resolve questions by raw identifier.
//!
//! # Invariants
//! - Stored text is the trimmed input.
//! - The read path never exposes the creation timestamp.

use super::{parse_id, ServiceError, ServiceResult};
use crate::model::question::{Question, QuestionRecord};
use crate::model::text::{normalize_text, TextField};
use crate::repo::question_repo::QuestionRepository;
use log::info;

/// Use-case service wrapper for question operations.
pub struct QuestionService<R: QuestionRepository> {
    repo: R,
}

impl<R: QuestionRepository> QuestionService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and persists a new question.
    ///
    /// # Errors
    /// - `ServiceError::Validation` when the trimmed text is empty or longer
    ///   than 500 characters.
    /// - `ServiceError::Repo` on storage failure.
    pub fn create_question(&self, raw_text: &str) -> ServiceResult<QuestionRecord> {
        let text = normalize_text(TextField::Question, raw_text)?;
        let question = Question::new(text);
        self.repo.create_question(&question)?;

        info!(
            "event=question_create module=service status=ok question_id={} chars={}",
            question.id,
            question.text.chars().count()
        );
        Ok(question.to_record())
    }

    /// Gets one question by raw identifier.
    ///
    /// # Errors
    /// - `ServiceError::InvalidId` when `raw_id` is not a well-formed ID.
    /// - `ServiceError::QuestionNotFound` when no question matches.
    pub fn get_question(&self, raw_id: &str) -> ServiceResult<QuestionRecord> {
        let id = parse_id(raw_id)?;
        self.repo
            .get_question(id)?
            .ok_or(ServiceError::QuestionNotFound(id))
    }
}

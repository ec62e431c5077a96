//! Feedback use-case service.
//!
//! # Responsibility
//! - Attach new feedback to an existing question.
//! - List feedback for a question, newest first.
//!
//! # Invariants
//! - Feedback is only inserted after the question was found.
//! - Listing performs no question existence check; unknown questions yield
//!   an empty list.

use super::{parse_id, ServiceError, ServiceResult};
use crate::model::feedback::Feedback;
use crate::model::text::{normalize_text, TextField};
use crate::repo::feedback_repo::FeedbackRepository;
use crate::repo::question_repo::QuestionRepository;
use log::{debug, info};

/// Use-case service over question and feedback repositories.
pub struct FeedbackService<Q: QuestionRepository, F: FeedbackRepository> {
    questions: Q,
    feedbacks: F,
}

impl<Q: QuestionRepository, F: FeedbackRepository> FeedbackService<Q, F> {
    pub fn new(questions: Q, feedbacks: F) -> Self {
        Self {
            questions,
            feedbacks,
        }
    }

    /// Validates and persists feedback for `raw_question_id`.
    ///
    /// Text is checked before the identifier.
    ///
    /// # Errors
    /// - `ServiceError::Validation` for blank or over-long text.
    /// - `ServiceError::InvalidId` for a malformed question ID.
    /// - `ServiceError::QuestionNotFound` when the question is absent.
    pub fn create_feedback(
        &self,
        raw_text: &str,
        raw_question_id: &str,
    ) -> ServiceResult<Feedback> {
        let text = normalize_text(TextField::Feedback, raw_text)?;
        let question_id = parse_id(raw_question_id)?;

        if !self.questions.question_exists(question_id)? {
            return Err(ServiceError::QuestionNotFound(question_id));
        }

        let feedback = Feedback::new(question_id, text);
        self.feedbacks.create_feedback(&feedback)?;

        info!(
            "event=feedback_create module=service status=ok feedback_id={} question_id={} chars={}",
            feedback.id,
            question_id,
            feedback.text.chars().count()
        );
        Ok(feedback)
    }

    /// Lists all feedback for `raw_question_id`, most recent first.
    ///
    /// # Errors
    /// - `ServiceError::InvalidId` for a malformed question ID.
    pub fn list_feedback(&self, raw_question_id: &str) -> ServiceResult<Vec<Feedback>> {
        let question_id = parse_id(raw_question_id)?;
        let items = self.feedbacks.list_feedback_for_question(question_id)?;

        debug!(
            "event=feedback_list module=service status=ok question_id={} count={}",
            question_id,
            items.len()
        );
        Ok(items)
    }
}

//! Feedback domain model.
//!
//! # Responsibility
//! - Define the anonymous response record attached to one question.
//!
//! # Invariants
//! - `question_id` referenced an existing question when the record was made.
//! - `text` is trimmed, non-empty and at most 1000 characters.

use super::now_epoch_ms;
use super::question::QuestionId;
use super::text::{normalize_text, TextField, ValidationError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a feedback entry.
pub type FeedbackId = Uuid;

/// Canonical persisted feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    /// Trimmed response text.
    pub text: String,
    /// Owning question, by value.
    pub question_id: QuestionId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Feedback {
    /// Creates feedback with a generated ID and the current timestamp.
    pub fn new(question_id: QuestionId, text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), question_id, text, now_epoch_ms())
    }

    /// Rebuilds feedback from known identity and timestamp.
    pub fn with_id(
        id: FeedbackId,
        question_id: QuestionId,
        text: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            question_id,
            created_at,
        }
    }

    /// Checks text rules for this record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_text(TextField::Feedback, &self.text).map(|_| ())
    }

    /// Creation time as RFC 3339 UTC with millisecond precision.
    ///
    /// Returns `None` when `created_at` is outside chrono's supported range.
    pub fn created_at_rfc3339(&self) -> Option<String> {
        DateTime::<Utc>::from_timestamp_millis(self.created_at)
            .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

//! Question domain model.
//!
//! # Responsibility
//! - Define the prompt record that feedback attaches to.
//!
//! # Invariants
//! - `id` is generated once and never reused.
//! - `text` is trimmed, non-empty and at most 500 characters.
//! - `created_at` is set server-side at construction time.

use super::now_epoch_ms;
use super::text::{normalize_text, TextField, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a question.
pub type QuestionId = Uuid;

/// Canonical persisted question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    /// Trimmed prompt text.
    pub text: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Question {
    /// Creates a question with a generated ID and the current timestamp.
    ///
    /// Callers are expected to pass already normalized text; `validate()`
    /// is enforced again by the repository before persistence.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text, now_epoch_ms())
    }

    /// Rebuilds a question from known identity and timestamp.
    pub fn with_id(id: QuestionId, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id,
            text: text.into(),
            created_at,
        }
    }

    /// Checks text rules for this record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        normalize_text(TextField::Question, &self.text).map(|_| ())
    }

    /// Read projection without the creation timestamp.
    pub fn to_record(&self) -> QuestionRecord {
        QuestionRecord {
            id: self.id,
            text: self.text.clone(),
        }
    }
}

/// Read model returned by question lookups.
///
/// Carries no creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub text: String,
}

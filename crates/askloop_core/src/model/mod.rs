//! Domain model for questions and their anonymous feedback.
//!
//! # Responsibility
//! - Define the records persisted by core storage.
//! - Own text normalization and length rules shared by every write path.
//!
//! # Invariants
//! - Every record is identified by a stable UUID generated on creation.
//! - Records are immutable once persisted.

pub mod feedback;
pub mod question;
pub mod text;

use chrono::Utc;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}

//! Core domain logic for askloop.
//! This crate is the single source of truth for question and feedback rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::feedback::{Feedback, FeedbackId};
pub use model::question::{Question, QuestionId, QuestionRecord};
pub use model::text::{TextField, ValidationError, FEEDBACK_MAX_CHARS, QUESTION_MAX_CHARS};
pub use repo::feedback_repo::{FeedbackRepository, SqliteFeedbackRepository};
pub use repo::question_repo::{QuestionRepository, SqliteQuestionRepository};
pub use repo::{RepoError, RepoResult};
pub use service::feedback_service::FeedbackService;
pub use service::question_service::QuestionService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

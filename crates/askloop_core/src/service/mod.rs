//! Core use-case services.
//!
//! # Responsibility
//! - Validate raw request input (text and identifiers).
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.
//!
//! # Invariants
//! - Identifiers are parsed here; repositories only see typed IDs.
//! - Errors carry enough kind information for status mapping upstream.

use crate::db::DbError;
use crate::model::question::QuestionId;
use crate::model::text::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod feedback_service;
pub mod question_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case error shared by question and feedback services.
#[derive(Debug)]
pub enum ServiceError {
    /// Submitted text is blank or too long.
    Validation(ValidationError),
    /// Identifier is not a well-formed UUID. Holds the raw input.
    InvalidId(String),
    /// Referenced question does not exist.
    QuestionNotFound(QuestionId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidId(raw) => write!(f, "invalid identifier: `{raw}`"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Parses a client-supplied identifier.
pub fn parse_id(raw: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::InvalidId(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_id, ServiceError};

    #[test]
    fn parse_id_accepts_hyphenated_uuid() {
        let id = parse_id("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(id.to_string(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn parse_id_rejects_garbage_and_padding() {
        for raw in [
            "",
            "not-an-id",
            "507f1f77bcf86cd799439011",
            " 67e55044-10b1-426f-9247-bb680e5fe0c8",
        ] {
            let err = parse_id(raw).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidId(ref value) if value == raw));
        }
    }
}

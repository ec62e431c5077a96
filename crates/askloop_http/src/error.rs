//! Request-boundary error mapping.
//!
//! # Responsibility
//! - Convert service failures into HTTP status codes and `{ "error": ... }`
//!   bodies.
//! - Keep storage details out of responses; they are logged instead.
//!
//! # Invariants
//! - Every failure leaving a handler is one of these variants; nothing
//!   escapes as an unhandled fault.

use askloop_core::{ServiceError, ValidationError};
use log::{debug, error};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

pub const MSG_INVALID_QUESTION_ID: &str = "Invalid question ID";
pub const MSG_VALID_QUESTION_ID_REQUIRED: &str = "Valid question ID is required";
pub const MSG_QUESTION_NOT_FOUND: &str = "Question not found";
pub const MSG_INVALID_JSON: &str = "Invalid JSON body";
pub const MSG_INTERNAL: &str = "Internal server error";

/// Where a question identifier came from, which picks the 400 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// `/questions/{id}`, `/feedbacks/{id}` and page paths.
    Path,
    /// `question_id` field of a request body.
    Body,
}

/// Error returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationError),
    InvalidId(IdSource),
    QuestionNotFound,
    InvalidJson,
    /// Storage or runtime failure. The detail is logged, never returned.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    /// Maps a service error using the route's identifier source.
    pub fn from_service(err: ServiceError, id_source: IdSource) -> Self {
        match err {
            ServiceError::Validation(err) => Self::Validation(err),
            ServiceError::InvalidId(_) => Self::InvalidId(id_source),
            ServiceError::QuestionNotFound(_) => Self::QuestionNotFound,
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId(_) | Self::InvalidJson => StatusCode::BAD_REQUEST,
            Self::QuestionNotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::InvalidId(IdSource::Path) => MSG_INVALID_QUESTION_ID.to_string(),
            Self::InvalidId(IdSource::Body) => MSG_VALID_QUESTION_ID_REQUIRED.to_string(),
            Self::QuestionNotFound => MSG_QUESTION_NOT_FOUND.to_string(),
            Self::InvalidJson => MSG_INVALID_JSON.to_string(),
            Self::Internal(_) => MSG_INTERNAL.to_string(),
        }
    }

    /// Emits the boundary log line for this failure.
    pub fn log(&self, route: &str) {
        match self {
            Self::Internal(detail) => error!(
                "event=request_failed module=http route={route} status={} error={detail}",
                self.status().as_u16()
            ),
            _ => debug!(
                "event=request_rejected module=http route={route} status={} reason={}",
                self.status().as_u16(),
                self.message()
            ),
        }
    }

    /// JSON error response.
    pub fn into_json_response(self) -> Response {
        json_error(self.status(), &self.message())
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal(detail) => write!(f, "internal error: {detail}"),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for ApiError {}

/// Builds a `{ "error": message }` response with `status`.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::{ApiError, IdSource};
    use askloop_core::{ServiceError, TextField, ValidationError};
    use warp::http::StatusCode;

    #[test]
    fn invalid_id_message_depends_on_source() {
        let path = ApiError::from_service(ServiceError::InvalidId("x".into()), IdSource::Path);
        assert_eq!(path.message(), "Invalid question ID");

        let body = ApiError::from_service(ServiceError::InvalidId("x".into()), IdSource::Body);
        assert_eq!(body.message(), "Valid question ID is required");
        assert_eq!(body.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_maps_to_bad_request_with_field_message() {
        let err = ApiError::from_service(
            ServiceError::Validation(ValidationError::Empty {
                field: TextField::Feedback,
            }),
            IdSource::Body,
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Feedback is required");
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = ApiError::Internal("disk I/O error".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }
}

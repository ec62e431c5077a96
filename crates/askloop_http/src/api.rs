//! JSON endpoints for questions and feedback.
//!
//! # Responsibility
//! - Decode request bodies, call core services, encode responses.
//! - Match the wire shapes clients already rely on (`_id`, `question_id`,
//!   `createdAt`).
//!
//! # Invariants
//! - Handlers never reject; every outcome is a response.
//! - Missing or non-string body fields are treated as empty input.

use crate::error::{ApiError, IdSource};
use crate::state::AppState;
use askloop_core::{
    Feedback, FeedbackService, QuestionService, SqliteFeedbackRepository,
    SqliteQuestionRepository,
};
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::Reply;

#[derive(Debug, Serialize)]
struct CreatedQuestion {
    id: String,
    question: String,
}

#[derive(Debug, Serialize)]
struct QuestionBody {
    #[serde(rename = "_id")]
    id: String,
    question: String,
}

#[derive(Debug, Serialize)]
struct CreatedFeedback {
    id: String,
    feedback: String,
    question_id: String,
}

#[derive(Debug, Serialize)]
struct FeedbackItem {
    #[serde(rename = "_id")]
    id: String,
    feedback: String,
    question_id: String,
    #[serde(rename = "createdAt")]
    created_at: String,
}

impl TryFrom<Feedback> for FeedbackItem {
    type Error = ApiError;

    fn try_from(value: Feedback) -> Result<Self, Self::Error> {
        let created_at = value.created_at_rfc3339().ok_or_else(|| {
            ApiError::Internal(format!(
                "feedback {} has out-of-range created_at {}",
                value.id, value.created_at
            ))
        })?;
        Ok(Self {
            id: value.id.to_string(),
            feedback: value.text,
            question_id: value.question_id.to_string(),
            created_at,
        })
    }
}

/// `POST /questions`
pub async fn create_question(state: AppState, body: Bytes) -> Result<Response, Infallible> {
    Ok(finish("create_question", create_question_inner(state, body).await))
}

/// `GET /questions/{id}`
pub async fn get_question(id: String, state: AppState) -> Result<Response, Infallible> {
    Ok(finish("get_question", get_question_inner(id, state).await))
}

/// `POST /feedbacks`
pub async fn create_feedback(state: AppState, body: Bytes) -> Result<Response, Infallible> {
    Ok(finish("create_feedback", create_feedback_inner(state, body).await))
}

/// `GET /feedbacks/{id}`
pub async fn list_feedback(id: String, state: AppState) -> Result<Response, Infallible> {
    Ok(finish("list_feedback", list_feedback_inner(id, state).await))
}

/// `GET /health`
pub async fn health() -> Result<Response, Infallible> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "ok",
        "version": askloop_core::core_version(),
    }))
    .into_response())
}

async fn create_question_inner(state: AppState, body: Bytes) -> Result<Response, ApiError> {
    let payload = parse_json(&body)?;
    let text = string_field(&payload, "question");

    let created = state
        .run_service(move |conn| {
            QuestionService::new(SqliteQuestionRepository::new(conn)).create_question(&text)
        })
        .await?
        .map_err(|err| ApiError::from_service(err, IdSource::Body))?;

    Ok(warp::reply::json(&CreatedQuestion {
        id: created.id.to_string(),
        question: created.text,
    })
    .into_response())
}

async fn get_question_inner(id: String, state: AppState) -> Result<Response, ApiError> {
    let question = state
        .run_service(move |conn| {
            QuestionService::new(SqliteQuestionRepository::new(conn)).get_question(&id)
        })
        .await?
        .map_err(|err| ApiError::from_service(err, IdSource::Path))?;

    Ok(warp::reply::json(&QuestionBody {
        id: question.id.to_string(),
        question: question.text,
    })
    .into_response())
}

async fn create_feedback_inner(state: AppState, body: Bytes) -> Result<Response, ApiError> {
    let payload = parse_json(&body)?;
    let text = string_field(&payload, "feedback");
    let question_id = string_field(&payload, "question_id");

    let created = state
        .run_service(move |conn| feedback_service(conn).create_feedback(&text, &question_id))
        .await?
        .map_err(|err| ApiError::from_service(err, IdSource::Body))?;

    Ok(warp::reply::json(&CreatedFeedback {
        id: created.id.to_string(),
        feedback: created.text,
        question_id: created.question_id.to_string(),
    })
    .into_response())
}

async fn list_feedback_inner(id: String, state: AppState) -> Result<Response, ApiError> {
    let items = state
        .run_service(move |conn| feedback_service(conn).list_feedback(&id))
        .await?
        .map_err(|err| ApiError::from_service(err, IdSource::Path))?;

    let body = items
        .into_iter()
        .map(FeedbackItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(warp::reply::json(&body).into_response())
}

pub(crate) fn feedback_service(
    conn: &rusqlite::Connection,
) -> FeedbackService<SqliteQuestionRepository<'_>, SqliteFeedbackRepository<'_>> {
    FeedbackService::new(
        SqliteQuestionRepository::new(conn),
        SqliteFeedbackRepository::new(conn),
    )
}

fn finish(route: &str, result: Result<Response, ApiError>) -> Response {
    result.unwrap_or_else(|err| {
        err.log(route);
        err.into_json_response()
    })
}

fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidJson)
}

fn string_field(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_json, string_field};
    use serde_json::json;

    #[test]
    fn string_field_treats_missing_and_non_string_as_empty() {
        let payload = json!({ "question": 42, "feedback": "ok" });
        assert_eq!(string_field(&payload, "question"), "");
        assert_eq!(string_field(&payload, "missing"), "");
        assert_eq!(string_field(&payload, "feedback"), "ok");
        assert_eq!(string_field(&json!(["question"]), "question"), "");
    }

    #[test]
    fn parse_json_rejects_non_json() {
        assert!(parse_json(b"question=hi").is_err());
        assert!(parse_json(b"{\"question\":\"hi\"}").is_ok());
    }
}

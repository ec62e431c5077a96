//! Route table and rejection recovery.
//!
//! # Responsibility
//! - Compose JSON endpoints and pages into one warp filter.
//! - Turn warp rejections (unknown path, oversized body, bad form) into the
//!   same `{ "error": ... }` shape the handlers use.
//! - Log one metadata-only line per request.
//!
//! # Invariants
//! - JSON bodies are read as a stream, so chunked requests without
//!   `Content-Length` are accepted; reading stops at `MAX_BODY_BYTES`.

use crate::error::{json_error, MSG_INTERNAL};
use crate::state::AppState;
use crate::{api, pages};
use futures::{pin_mut, Stream, StreamExt};
use log::{error, info, warn};
use std::convert::Infallible;
use warp::filters::body::BodyDeserializeError;
use warp::http::StatusCode;
use warp::hyper::body::{Buf, Bytes};
use warp::reject::{
    LengthRequired, MethodNotAllowed, PayloadTooLarge, Reject, UnsupportedMediaType,
};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Upper bound for any request body.
pub const MAX_BODY_BYTES: u64 = 16 * 1024;

/// Builds the full application filter.
pub fn routes(state: AppState) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let create_question = warp::path!("questions")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(api::create_question);

    let get_question = warp::path!("questions" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(api::get_question);

    let create_feedback = warp::path!("feedbacks")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(api::create_feedback);

    let list_feedback = warp::path!("feedbacks" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(api::list_feedback);

    let health = warp::path!("health")
        .and(warp::get())
        .and_then(api::health);

    let home = warp::path::end().and(warp::get()).and_then(pages::home);

    let submit_question = warp::path::end()
        .and(warp::post())
        .and(with_state(state.clone()))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and_then(pages::submit_question);

    let question_page = warp::path!("q" / String)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(pages::question_page);

    let submit_feedback = warp::path!("q" / String)
        .and(warp::post())
        .and(with_state(state))
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::form())
        .and_then(pages::submit_feedback);

    create_question
        .or(get_question)
        .unify()
        .or(create_feedback)
        .unify()
        .or(list_feedback)
        .unify()
        .or(health)
        .unify()
        .or(home)
        .unify()
        .or(submit_question)
        .unify()
        .or(question_page)
        .unify()
        .or(submit_feedback)
        .unify()
        .recover(handle_rejection)
        .unify()
        .with(warp::log::custom(|info| {
            info!(
                "event=http_request module=http method={} path={} status={} duration_ms={}",
                info.method(),
                info.path(),
                info.status().as_u16(),
                info.elapsed().as_millis()
            );
        }))
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Body exceeded `MAX_BODY_BYTES` while streaming.
#[derive(Debug)]
struct BodyTooLarge;

impl Reject for BodyTooLarge {}

/// Transport failure while reading the body.
#[derive(Debug)]
struct BodyReadFailed;

impl Reject for BodyReadFailed {}

fn json_body() -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::body::stream().and_then(|body| read_capped(body, MAX_BODY_BYTES))
}

async fn read_capped<S, B>(body: S, limit: u64) -> Result<Bytes, Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    pin_mut!(body);
    let mut collected = Vec::new();
    while let Some(chunk) = body.next().await {
        let mut chunk = chunk.map_err(|err| {
            warn!("event=body_read module=http status=error error={err}");
            warp::reject::custom(BodyReadFailed)
        })?;
        if (collected.len() + chunk.remaining()) as u64 > limit {
            return Err(warp::reject::custom(BodyTooLarge));
        }
        while chunk.has_remaining() {
            let part = chunk.chunk();
            let len = part.len();
            collected.extend_from_slice(part);
            chunk.advance(len);
        }
    }
    Ok(Bytes::from(collected))
}

async fn handle_rejection(rejection: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found")
    } else if rejection.find::<PayloadTooLarge>().is_some()
        || rejection.find::<BodyTooLarge>().is_some()
    {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else if rejection.find::<BodyReadFailed>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid request body")
    } else if rejection.find::<LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length header is required")
    } else if rejection.find::<BodyDeserializeError>().is_some() {
        (StatusCode::BAD_REQUEST, "Invalid form body")
    } else if rejection.find::<UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported media type")
    } else if rejection.find::<MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    } else {
        error!("event=request_failed module=http status=500 rejection={rejection:?}");
        (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL)
    };

    Ok(json_error(status, message))
}

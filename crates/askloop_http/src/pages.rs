//! Server-rendered pages for asking questions and leaving feedback.
//!
//! # Responsibility
//! - Render the question form, the question page and error pages.
//! - Accept form posts and redirect after a successful write.
//! - Emit title, description, Open Graph and Twitter metadata so shared links
//!   preview with the question text.
//!
//! # Invariants
//! - All user-provided text is HTML-escaped before rendering.
//! - A successful form post always answers `303 See Other`.

use crate::api::feedback_service;
use crate::error::{ApiError, IdSource};
use crate::state::AppState;
use askloop_core::{
    Feedback, QuestionRecord, QuestionService, SqliteQuestionRepository, FEEDBACK_MAX_CHARS,
    QUESTION_MAX_CHARS,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::convert::Infallible;
use std::fmt::Write as _;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;

const SITE_TITLE: &str = "Anonymous Feedback";
const SITE_DESCRIPTION: &str = "Collect anonymous feedback from anyone";

/// Form body of `POST /`.
#[derive(Debug, Default, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: String,
}

/// Form body of `POST /q/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub feedback: String,
}

/// `GET /`
pub async fn home() -> Result<Response, Infallible> {
    Ok(html(StatusCode::OK, render_home(None, "")))
}

/// `POST /`
pub async fn submit_question(state: AppState, form: QuestionForm) -> Result<Response, Infallible> {
    let draft = form.question.clone();
    let result = state
        .run_service(move |conn| {
            QuestionService::new(SqliteQuestionRepository::new(conn))
                .create_question(&form.question)
        })
        .await
        .and_then(|result| result.map_err(|err| ApiError::from_service(err, IdSource::Body)));

    Ok(match result {
        Ok(created) => see_other(&format!("/q/{}", created.id)),
        Err(err) => {
            err.log("page_submit_question");
            html(err.status(), render_home(Some(&err.message()), &draft))
        }
    })
}

/// `GET /q/{id}`
pub async fn question_page(id: String, state: AppState) -> Result<Response, Infallible> {
    Ok(match load_page(&state, id).await {
        Ok((question, items)) => html(
            StatusCode::OK,
            render_question(&state, &question, &items, None, ""),
        ),
        Err(err) => error_page("page_question", err),
    })
}

/// `POST /q/{id}`
pub async fn submit_feedback(
    id: String,
    state: AppState,
    form: FeedbackForm,
) -> Result<Response, Infallible> {
    let draft = form.feedback.clone();
    let question_id = id.clone();
    let result = state
        .run_service(move |conn| {
            feedback_service(conn).create_feedback(&form.feedback, &question_id)
        })
        .await
        .and_then(|result| result.map_err(|err| ApiError::from_service(err, IdSource::Path)));

    let err = match result {
        Ok(created) => return Ok(see_other(&format!("/q/{}", created.question_id))),
        Err(err) => err,
    };
    err.log("page_submit_feedback");

    // Text problems keep the visitor on the page with their draft.
    if !matches!(err, ApiError::Validation(_)) {
        return Ok(error_page("page_submit_feedback", err));
    }
    Ok(match load_page(&state, id).await {
        Ok((question, items)) => html(
            err.status(),
            render_question(&state, &question, &items, Some(&err.message()), &draft),
        ),
        Err(load_err) => error_page("page_submit_feedback", load_err),
    })
}

async fn load_page(
    state: &AppState,
    id: String,
) -> Result<(QuestionRecord, Vec<Feedback>), ApiError> {
    state
        .run_service(move |conn| {
            let question =
                QuestionService::new(SqliteQuestionRepository::new(conn)).get_question(&id)?;
            let items = feedback_service(conn).list_feedback(&id)?;
            Ok((question, items))
        })
        .await?
        .map_err(|err| ApiError::from_service(err, IdSource::Path))
}

fn error_page(route: &str, err: ApiError) -> Response {
    err.log(route);
    let message = err.message();
    let body = format!(
        r#"<main class="centered">
  <h1>{}</h1>
  <a class="button" href="/">Create New Question</a>
</main>"#,
        escape_html(&message)
    );
    html(err.status(), layout(&message, SITE_DESCRIPTION, None, &body))
}

fn render_home(error: Option<&str>, draft: &str) -> String {
    let body = format!(
        r#"<main>
  <h1>{SITE_TITLE}</h1>
  <p class="lead">Ask a question and share the link to collect honest, anonymous answers.</p>
  {error}
  <form method="post" action="/">
    <label for="question">Your question</label>
    <textarea id="question" name="question" maxlength="{max}" required
      placeholder="What would you like feedback on?">{draft}</textarea>
    <button type="submit">Create Question</button>
  </form>
</main>"#,
        error = render_error(error),
        max = QUESTION_MAX_CHARS,
        draft = escape_html(draft),
    );
    layout(SITE_TITLE, SITE_DESCRIPTION, None, &body)
}

fn render_question(
    state: &AppState,
    question: &QuestionRecord,
    items: &[Feedback],
    error: Option<&str>,
    draft: &str,
) -> String {
    let id = question.id.to_string();
    let share_url = state.question_url(&id);

    let mut list = String::new();
    if items.is_empty() {
        list.push_str(
            r#"<p class="empty">No feedback yet. Be the first to share your thoughts!</p>"#,
        );
    } else {
        list.push_str("<ul class=\"feedback\">");
        for item in items {
            let _ = write!(
                list,
                "<li><p>{}</p><time datetime=\"{}\">{}</time></li>",
                escape_html(&item.text),
                item.created_at_rfc3339().unwrap_or_default(),
                display_time(item.created_at),
            );
        }
        list.push_str("</ul>");
    }

    let body = format!(
        r#"<main>
  <a href="/">&larr; Create New Question</a>
  <h1>{question}</h1>
  <label for="share">Share this question</label>
  <input id="share" type="text" readonly value="{share}">
  <section>
    <h2>Share Your Feedback</h2>
    {error}
    <form method="post" action="/q/{id}">
      <textarea name="feedback" maxlength="{max}" required
        placeholder="Your honest feedback is valuable. Share your thoughts anonymously...">{draft}</textarea>
      <button type="submit">Submit Feedback</button>
    </form>
  </section>
  <section>
    <h2>Community Feedback ({count})</h2>
    {list}
  </section>
</main>"#,
        question = escape_html(&question.text),
        share = escape_html(&share_url),
        error = render_error(error),
        max = FEEDBACK_MAX_CHARS,
        draft = escape_html(draft),
        count = items.len(),
    );

    layout(
        &question.text,
        "Share your anonymous feedback",
        Some(&share_url),
        &body,
    )
}

fn render_error(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="error" role="alert">{}</p>"#, escape_html(message)))
        .unwrap_or_default()
}

fn layout(title: &str, description: &str, url: Option<&str>, body: &str) -> String {
    let title = escape_html(title);
    let description = escape_html(description);
    let og_url = url
        .map(|value| format!(r#"<meta property="og:url" content="{}">"#, escape_html(value)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<meta property="og:type" content="website">
<meta property="og:site_name" content="{SITE_TITLE}">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
{og_url}
<meta name="twitter:card" content="summary">
<meta name="twitter:title" content="{title}">
<meta name="twitter:description" content="{description}">
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;min-height:100vh;\
background:linear-gradient(135deg,#7c3aed,#2563eb);color:#1f2937}\
main{max-width:48rem;margin:0 auto;padding:2rem 1rem}\
h1{color:#fff}main>a,label,.lead{color:#fff}\
form,section{background:#fff;border-radius:1rem;padding:1.5rem;margin:1rem 0}\
textarea{width:100%;min-height:8rem;box-sizing:border-box}\
input[readonly]{width:100%;box-sizing:border-box}\
.feedback{list-style:none;padding:0}.feedback li{border-left:4px solid #7c3aed;\
background:#f9fafb;padding:1rem;margin:.5rem 0}\
.error{color:#b91c1c}.centered{text-align:center}";

fn display_time(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|time| time.format("%b %-d, %Y, %I:%M %p UTC").to_string())
        .unwrap_or_default()
}

fn html(status: StatusCode, body: String) -> Response {
    warp::reply::with_status(warp::reply::html(body), status).into_response()
}

fn see_other(location: &str) -> Response {
    warp::reply::with_header(
        warp::reply::with_status(warp::reply(), StatusCode::SEE_OTHER),
        "location",
        location,
    )
    .into_response()
}

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{display_time, escape_html, render_home};

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
    }

    #[test]
    fn home_keeps_escaped_draft_and_error() {
        let page = render_home(Some("Question is required"), "<b>draft</b>");
        assert!(page.contains("Question is required"));
        assert!(page.contains("&lt;b&gt;draft&lt;/b&gt;"));
        assert!(page.contains(r#"maxlength="500""#));
    }

    #[test]
    fn display_time_is_human_readable() {
        assert_eq!(display_time(1_735_787_045_678), "Jan 2, 2025, 03:04 AM UTC");
    }
}

//! Shared request state.
//!
//! # Responsibility
//! - Carry the injected store handle and presentation settings into handlers.
//! - Move blocking SQLite work off the async executor.
//!
//! # Invariants
//! - Every handler sees the same `Store`; cloning `AppState` is cheap.

use crate::error::ApiError;
use askloop_core::{ServiceResult, Store};
use rusqlite::Connection;
use std::sync::Arc;

/// State cloned into every route.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<Store>,
    public_base_url: Option<String>,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            public_base_url: None,
        }
    }

    /// Sets the absolute origin used in share links and `og:url`.
    ///
    /// A trailing slash is dropped.
    pub fn with_public_base_url(mut self, base_url: Option<String>) -> Self {
        self.public_base_url = base_url
            .map(|value| value.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());
        self
    }

    /// Absolute (when configured) or root-relative URL of a question page.
    pub fn question_url(&self, question_id: &str) -> String {
        format!(
            "{}/q/{question_id}",
            self.public_base_url.as_deref().unwrap_or("")
        )
    }

    /// Runs a service call on the blocking pool while holding the store lock.
    ///
    /// The outer error only covers a failed blocking task; service errors are
    /// returned untouched so callers can map them with route context.
    pub async fn run_service<T, F>(&self, op: F) -> Result<ServiceResult<T>, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> ServiceResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.with_conn(op))
            .await
            .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))
    }
}

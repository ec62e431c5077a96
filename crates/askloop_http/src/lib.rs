//! HTTP boundary for askloop.
//!
//! # Responsibility
//! - Expose question/feedback use-cases as JSON endpoints.
//! - Serve the pages people use to ask and answer.
//! - Own server startup and shutdown around an injected store.
//!
//! # Invariants
//! - Handlers never panic and never leak storage errors to clients.

pub mod api;
pub mod error;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, IdSource};
pub use routes::routes;
pub use server::{serve, ServerError, ServerSettings};
pub use state::AppState;

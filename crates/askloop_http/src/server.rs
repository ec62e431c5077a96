//! HTTP server lifecycle.
//!
//! # Responsibility
//! - Bind the route table, run until the shutdown signal fires.
//! - Close the injected store once the server has drained.
//!
//! # Invariants
//! - The store passed in is the only store used by handlers.
//! - `serve` owns the store handle; it closes it on every exit path,
//!   bind failure included.

use crate::routes::routes;
use crate::state::AppState;
use askloop_core::{DbError, Store};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

/// Listener and presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: SocketAddr,
    /// Absolute origin for share links, e.g. `https://ask.example.com`.
    pub public_base_url: Option<String>,
}

#[derive(Debug)]
pub enum ServerError {
    Bind(warp::Error),
    Close(DbError),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bind(err) => write!(f, "failed to bind server: {err}"),
            Self::Close(err) => write!(f, "failed to close store: {err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Bind(err) => Some(err),
            Self::Close(err) => Some(err),
        }
    }
}

/// Serves the application until `shutdown` resolves, then closes `store`.
pub async fn serve(
    store: Arc<Store>,
    settings: ServerSettings,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let state =
        AppState::new(Arc::clone(&store)).with_public_base_url(settings.public_base_url);

    let bound =
        warp::serve(routes(state)).try_bind_with_graceful_shutdown(settings.bind, shutdown);
    let (addr, server) = match bound {
        Ok(bound) => bound,
        Err(err) => {
            error!(
                "event=server_start module=http status=error addr={} error={err}",
                settings.bind
            );
            if let Err(close_err) = close_store(store) {
                warn!("event=db_close module=http status=error error={close_err}");
            }
            return Err(ServerError::Bind(err));
        }
    };
    info!("event=server_start module=http status=ok addr={addr}");

    server.await;
    info!("event=server_stop module=http status=ok addr={addr}");

    close_store(store)
}

fn close_store(store: Arc<Store>) -> Result<(), ServerError> {
    match Arc::try_unwrap(store) {
        Ok(store) => store.close().map_err(ServerError::Close),
        Err(shared) => {
            warn!(
                "event=db_close module=http status=skipped reason=store_still_shared refs={}",
                Arc::strong_count(&shared)
            );
            Ok(())
        }
    }
}

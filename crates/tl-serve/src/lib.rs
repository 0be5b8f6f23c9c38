pub mod middleware;
pub mod openapi;
pub mod routes;

#[cfg(test)]
mod testutil;

use axum::Router;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tl_core::error::StoreError;
use tl_core::sources::LinkTemplates;
use tl_core::{Timeline, TimelineError};
use tl_db::DbStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone)]
pub struct AppState {
    pub db_path: Arc<str>,
    pub links: LinkTemplates,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(db_path: impl Into<Arc<str>>, links: LinkTemplates, request_timeout: Duration) -> Self {
        Self {
            db_path: db_path.into(),
            links,
            request_timeout,
        }
    }
}

pub fn build_timeline(state: &AppState) -> Result<Timeline<DbStore>, TimelineError> {
    let store = DbStore::open(&state.db_path)?;
    Ok(Timeline::new(store, state.links.clone()))
}

/// Runs `f` against a fresh store session on the blocking pool. The session is
/// dropped when `f` returns. If the deadline passes first the running
/// statement is interrupted, and a session that was not yet handed its
/// interrupt handle never runs `f`.
pub async fn with_timeline<T, F>(state: &AppState, f: F) -> Result<T, TimelineError>
where
    F: FnOnce(&Timeline<DbStore>) -> Result<T, TimelineError> + Send + 'static,
    T: Send + 'static,
{
    let seconds = state.request_timeout.as_secs();
    let deadline = Instant::now() + state.request_timeout;
    let (interrupt_tx, mut interrupt_rx) = oneshot::channel();
    let session_state = state.clone();
    let task = tokio::task::spawn_blocking(move || {
        let timeline = build_timeline(&session_state)?;
        let handle = timeline.store().connection().get_interrupt_handle();
        if Instant::now() >= deadline || interrupt_tx.send(handle).is_err() {
            return Err(StoreError::Timeout { seconds }.into());
        }
        f(&timeline)
    });

    match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => Err(TimelineError::Internal {
            message: err.to_string(),
        }),
        Err(_) => {
            // Closing first means the session either sees a failed send or
            // has already handed over a handle we can reach.
            interrupt_rx.close();
            if let Ok(handle) = interrupt_rx.try_recv() {
                handle.interrupt();
            }
            tracing::warn!(timeout_secs = seconds, "store call exceeded request timeout");
            Err(StoreError::Timeout { seconds }.into())
        }
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, db_path = %state.db_path, "listening");
    axum::serve(listener, app(state)).await
}

//! Frontier HTTP service
//!
//! Exposes the shared queue over two endpoints:
//!
//! - `POST /add` with body `{"urls": [..]}` appends URLs; responds 200,
//!   or 400 when the body cannot be decoded.
//! - `GET /fetch?batch=N` removes up to N URLs from the head and returns
//!   them as a JSON array; always 200, empty array when the queue is empty.

use crate::frontier::{AddRequest, Frontier, DEFAULT_BATCH_SIZE};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

/// Query parameters for `GET /fetch`.
///
/// `batch` is kept as a raw string so an unparseable value degrades to an
/// empty batch instead of a client error; an absent value means
/// [`DEFAULT_BATCH_SIZE`].
#[derive(Debug, Deserialize)]
struct FetchParams {
    batch: Option<String>,
}

/// Builds the frontier router over a shared queue.
pub fn router(frontier: Arc<Frontier>) -> Router {
    Router::new()
        .route("/add", post(handle_add))
        .route("/fetch", get(handle_fetch))
        .with_state(frontier)
}

async fn handle_add(
    State(frontier): State<Arc<Frontier>>,
    Json(request): Json<AddRequest>,
) -> StatusCode {
    tracing::debug!("Adding {} URLs to frontier", request.urls.len());
    frontier.add(request.urls);
    StatusCode::OK
}

async fn handle_fetch(
    State(frontier): State<Arc<Frontier>>,
    Query(params): Query<FetchParams>,
) -> Json<Vec<String>> {
    let batch_size = params
        .batch
        .map_or(DEFAULT_BATCH_SIZE, |raw| raw.parse().unwrap_or(0));

    let batch = frontier.take(batch_size);
    tracing::debug!(
        "Handing out {} URLs ({} remain queued)",
        batch.len(),
        frontier.len()
    );
    Json(batch)
}

/// Binds the listener and serves the frontier until `shutdown` resolves.
///
/// A bind failure is fatal and is returned to the caller; once serving,
/// the future completes only after a graceful shutdown.
pub async fn serve<F>(
    addr: SocketAddr,
    frontier: Arc<Frontier>,
    shutdown: F,
) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Frontier listening on {}", listener.local_addr()?);

    axum::serve(listener, router(frontier))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

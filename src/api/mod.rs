//! Search API service
//!
//! Serves substring search over an index populated from the document
//! store at startup. `GET /search?q=term` returns the matching documents
//! as JSON; a missing `q` parameter is a 400.

use crate::document::Document;
use crate::index::{Index, MemoryIndex};
use crate::storage::LocalStore;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: String,
}

/// Builds the search router over an index.
pub fn router(index: Arc<MemoryIndex>) -> Router {
    Router::new()
        .route("/search", get(handle_search))
        .with_state(index)
}

async fn handle_search(
    State(index): State<Arc<MemoryIndex>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Document>> {
    Json(index.search(&params.q))
}

/// Loads previously stored documents into a fresh index.
pub fn load_index(store: &LocalStore) -> crate::Result<Arc<MemoryIndex>> {
    let index = Arc::new(MemoryIndex::new());
    let documents = store.load_documents()?;
    let count = documents.len();
    for doc in documents {
        index.index(doc);
    }
    tracing::info!("Loaded {} documents from local storage into the index", count);
    Ok(index)
}

/// Binds the listener and serves search until `shutdown` resolves.
pub async fn serve<F>(
    addr: SocketAddr,
    index: Arc<MemoryIndex>,
    shutdown: F,
) -> crate::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Search API listening on {}", listener.local_addr()?);

    axum::serve(listener, router(index))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

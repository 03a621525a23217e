//! Search index sink
//!
//! The worker hands every finished document to an [`Index`]. The bundled
//! implementation is an in-memory store with case-insensitive substring
//! search over title and body; it also backs the search API service.

use crate::document::Document;
use std::sync::RwLock;

/// Sink contract for finished documents.
///
/// Indexing is infallible from the worker's point of view; an
/// implementation that can fail internally is expected to log and keep
/// the crawl moving.
pub trait Index: Send + Sync {
    /// Adds a document to the index.
    fn index(&self, doc: Document);

    /// Returns documents whose title or body contains `query`,
    /// case-insensitively.
    fn search(&self, query: &str) -> Vec<Document>;
}

/// In-memory document index.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    documents: RwLock<Vec<Document>>,
}

impl MemoryIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of indexed documents.
    pub fn len(&self) -> usize {
        self.documents.read().unwrap().len()
    }

    /// Returns whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.read().unwrap().is_empty()
    }
}

impl Index for MemoryIndex {
    fn index(&self, doc: Document) {
        tracing::info!("Indexed document: {} (Title: {})", doc.url, doc.title);
        self.documents.write().unwrap().push(doc);
    }

    fn search(&self, query: &str) -> Vec<Document> {
        let query = query.to_lowercase();
        self.documents
            .read()
            .unwrap()
            .iter()
            .filter(|doc| {
                doc.title.to_lowercase().contains(&query)
                    || doc.body.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

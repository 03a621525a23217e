//! Local document storage
//!
//! Persists finished documents as JSON files, one per fetched URL, and
//! loads them back for the search API. Storage is best effort: save
//! failures are logged by the worker and never stall the crawl.

use crate::document::Document;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not create directory {dir}: {source}")]
    CreateDir {
        dir: String,
        source: std::io::Error,
    },

    #[error("Error writing file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Sink contract for persisting finished documents.
pub trait DocStore: Send + Sync {
    /// Persists a document as a keyed blob.
    fn save(&self, doc: &Document) -> StorageResult<()>;
}

/// Stores documents as pretty-printed JSON files in one directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Creates the storage directory (if needed) and returns the store.
    ///
    /// A directory that cannot be created is a fatal startup error for
    /// the process that needs it.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            dir: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Returns the path a document with this URL is stored at.
    pub fn document_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", document_key(url)))
    }

    /// Reads every stored document back from disk.
    ///
    /// Files that cannot be read or decoded are logged and skipped, so a
    /// single corrupt file does not hide the rest of the corpus.
    pub fn load_documents(&self) -> StorageResult<Vec<Document>> {
        let mut documents = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let data = match fs::read_to_string(&path) {
                Ok(data) => data,
                Err(e) => {
                    tracing::warn!("Error reading file {}: {}", path.display(), e);
                    continue;
                }
            };

            match serde_json::from_str::<Document>(&data) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!("Error decoding file {}: {}", path.display(), e);
                }
            }
        }

        Ok(documents)
    }
}

impl DocStore for LocalStore {
    fn save(&self, doc: &Document) -> StorageResult<()> {
        let path = self.document_path(&doc.url);
        let data = serde_json::to_vec_pretty(doc)?;
        fs::write(&path, data).map_err(|source| StorageError::Write {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}

/// Derives a filesystem-safe key from a URL by replacing path separators
/// and colons with underscores.
fn document_key(url: &str) -> String {
    url.replace(['/', ':'], "_")
}

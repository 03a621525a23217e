//! The document type produced by a successful fetch
//!
//! A `Document` is the unit handed to the index and storage sinks and the
//! JSON shape persisted on disk.

use serde::{Deserialize, Serialize};

/// A crawled web page: source URL, extracted title, and body text.
///
/// The title may be empty when the page has no `<title>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub url: String,
    pub title: String,
    pub body: String,
}

//! Frontier module: the authoritative crawl queue
//!
//! The frontier owns the ordered sequence of discovery URLs. Workers never
//! touch the queue directly; they go through the HTTP service in
//! [`service`] using the client in [`client`].

pub mod client;
pub mod service;

pub use client::FrontierClient;

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Request body for the frontier's `POST /add` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequest {
    pub urls: Vec<String>,
}

/// Default number of URLs handed out per `take` when the caller does not
/// specify a batch size.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// The shared FIFO queue of discovery URLs.
///
/// All access is serialized through a single lock: `add` and `take` are
/// each atomic with respect to one another, so no URL is ever delivered to
/// two concurrent `take` calls. There is no uniqueness check (duplicate
/// discoveries stay duplicated) and no in-flight tracking: a URL removed by
/// `take` is gone unless a caller re-adds it explicitly.
#[derive(Debug, Default)]
pub struct Frontier {
    urls: Mutex<VecDeque<String>>,
}

impl Frontier {
    /// Creates an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the given URLs to the tail of the queue, in the given order.
    ///
    /// No well-formedness check is performed here; malformed URLs are
    /// queued as-is and fail later at fetch time.
    pub fn add<I>(&self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut queue = self.urls.lock().unwrap();
        queue.extend(urls);
    }

    /// Removes up to `batch_size` URLs from the head of the queue and
    /// returns them in FIFO order.
    ///
    /// An empty queue yields an empty vector, never an error. A queue with
    /// fewer than `batch_size` entries yields all of them.
    pub fn take(&self, batch_size: usize) -> Vec<String> {
        let mut queue = self.urls.lock().unwrap();
        let count = batch_size.min(queue.len());
        queue.drain(..count).collect()
    }

    /// Returns the number of queued URLs.
    pub fn len(&self) -> usize {
        self.urls.lock().unwrap().len()
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.urls.lock().unwrap().is_empty()
    }
}

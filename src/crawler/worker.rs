//! Worker crawl loop
//!
//! Drives the crawl forward: take a batch from the frontier, check each
//! URL against the robots permission cache, fetch and parse the allowed
//! ones, send discovered links back to the frontier, and hand finished
//! documents to the index and storage sinks.
//!
//! Every step that can fail is isolated to the URL it was working on. A
//! bad page, an unreachable robots.txt, or a sink failure is logged and
//! skipped; the loop itself only stops when the shutdown signal fires.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_page;
use crate::document::Document;
use crate::frontier::FrontierClient;
use crate::index::Index;
use crate::robots::RobotsCache;
use crate::storage::DocStore;
use crate::Result;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use url::Url;

/// A crawl worker bound to one frontier and one pair of sinks.
pub struct Worker {
    frontier: FrontierClient,
    robots: RobotsCache,
    client: Client,
    index: Arc<dyn Index>,
    store: Arc<dyn DocStore>,
    batch_size: usize,
    poll_interval: Duration,
}

impl Worker {
    /// Builds a worker from configuration and the two document sinks.
    ///
    /// The same HTTP client (and therefore the same timeout bounds) is
    /// used for page fetches, robots.txt fetches, and frontier calls.
    pub fn new(
        config: &Config,
        index: Arc<dyn Index>,
        store: Arc<dyn DocStore>,
    ) -> Result<Self> {
        let client = build_http_client(&config.user_agent, &config.worker)?;

        Ok(Self {
            frontier: FrontierClient::new(config.worker.frontier_url.clone(), client.clone()),
            robots: RobotsCache::new(client.clone()),
            client,
            index,
            store,
            batch_size: config.worker.batch_size,
            poll_interval: Duration::from_millis(config.worker.poll_interval_ms),
        })
    }

    /// Builds a worker from already-constructed parts. Used by tests to
    /// inject a frontier address and recording sinks.
    pub fn from_parts(
        frontier: FrontierClient,
        client: Client,
        index: Arc<dyn Index>,
        store: Arc<dyn DocStore>,
        batch_size: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            frontier,
            robots: RobotsCache::new(client.clone()),
            client,
            index,
            store,
            batch_size,
            poll_interval,
        }
    }

    /// Runs the crawl loop until `shutdown` observes `true`.
    ///
    /// The signal is checked before every poll, during the idle backoff,
    /// and between URLs of a batch. A URL that is mid-processing always
    /// completes; the rest of its batch is abandoned, which under the
    /// frontier's at-most-once delivery means those URLs are dropped.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            "Worker started (frontier: {}, batch size: {})",
            self.frontier.base_url(),
            self.batch_size
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let batch = match self.frontier.take(self.batch_size).await {
                Ok(batch) => batch,
                Err(e) => {
                    // Treated as "no work"; back off and re-poll
                    tracing::warn!("Failed to take batch from frontier: {}", e);
                    Vec::new()
                }
            };

            if batch.is_empty() {
                tokio::select! {
                    changed = shutdown.changed() => {
                        // A dropped sender counts as a shutdown request
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = tokio::time::sleep(self.poll_interval) => {}
                }
                continue;
            }

            tracing::debug!("Took batch of {} URLs", batch.len());
            for url in &batch {
                if *shutdown.borrow() {
                    tracing::info!("Shutdown requested, abandoning rest of batch");
                    return;
                }
                self.process_url(url).await;
            }
        }

        tracing::info!("Worker stopped");
    }

    /// Processes a single URL; every failure is terminal for this URL
    /// only and is logged here.
    async fn process_url(&self, url: &str) {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Skipping malformed URL {}: {}", url, e);
                return;
            }
        };

        match self.robots.is_allowed(&parsed).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!("Skipping {} due to robots.txt disallow rules", url);
                return;
            }
            Err(e) => {
                tracing::warn!("Error checking robots for {}: {}", url, e);
                return;
            }
        }

        let page = match fetch_page(&self.client, &parsed).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", url, e);
                return;
            }
        };

        let extracted = parse_page(&page.body, &page.url);
        tracing::info!(
            "Processed page {} with title: {} ({} links)",
            url,
            extracted.title,
            extracted.links.len()
        );

        if !extracted.links.is_empty() {
            if let Err(e) = self.frontier.add(&extracted.links).await {
                // Discovered links are lost; the fetched content is not
                tracing::warn!("Failed to add discovered links to frontier: {}", e);
            }
        }

        let document = Document {
            url: url.to_string(),
            title: extracted.title,
            body: extracted.body,
        };

        self.index.index(document.clone());
        if let Err(e) = self.store.save(&document) {
            tracing::warn!("Error saving document {}: {}", url, e);
        }
    }
}

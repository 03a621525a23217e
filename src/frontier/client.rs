//! HTTP client for the frontier service
//!
//! Workers talk to the frontier exclusively through this client. Failures
//! are surfaced as errors; the worker decides what they mean (a failed
//! `take` is treated as "no work", a failed `add` loses that batch of
//! discovered links).

use crate::frontier::AddRequest;
use crate::{OrbError, Result};
use reqwest::Client;

/// Client for a remote frontier service.
#[derive(Debug, Clone)]
pub struct FrontierClient {
    base_url: String,
    client: Client,
}

impl FrontierClient {
    /// Creates a client for the frontier at `base_url`.
    ///
    /// The HTTP client is shared with the rest of the worker so the same
    /// timeout bounds apply to frontier calls.
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// Returns the frontier base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Takes up to `batch_size` URLs from the head of the frontier queue.
    ///
    /// Returns the batch in FIFO order; an empty vector means the queue
    /// had no work. Transport failures and non-success statuses are
    /// returned as errors.
    pub async fn take(&self, batch_size: usize) -> Result<Vec<String>> {
        let endpoint = format!("{}/fetch?batch={}", self.base_url, batch_size);
        let response = self.client.get(&endpoint).send().await?;

        if !response.status().is_success() {
            return Err(OrbError::FrontierStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(response.json().await?)
    }

    /// Appends the given URLs to the tail of the frontier queue.
    pub async fn add(&self, urls: &[String]) -> Result<()> {
        let endpoint = format!("{}/add", self.base_url);
        let response = self
            .client
            .post(&endpoint)
            .json(&AddRequest {
                urls: urls.to_vec(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OrbError::FrontierStatus {
                status: response.status().as_u16(),
            });
        }

        Ok(())
    }
}

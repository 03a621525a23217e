//! HTTP fetcher
//!
//! Builds the worker's HTTP client (user agent, bounded timeouts) and
//! fetches page bodies. A hung remote server cannot stall a worker past
//! the configured timeout.

use crate::config::{UserAgentConfig, WorkerConfig};
use crate::{OrbError, Result};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A successfully fetched page: the parsed request URL and the raw body.
#[derive(Debug)]
pub struct FetchedPage {
    pub url: Url,
    pub body: String,
}

/// Formats the user agent string sent with every request.
///
/// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
/// contact part omitted when no contact details are configured.
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    if config.contact_url.is_empty() && config.contact_email.is_empty() {
        format!("{}/{}", config.crawler_name, config.crawler_version)
    } else {
        format!(
            "{}/{} (+{}; {})",
            config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
        )
    }
}

/// Builds the HTTP client used for page fetches, robots.txt fetches, and
/// frontier calls.
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    worker: &WorkerConfig,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(worker.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(worker.fetch_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page body with a bounded wait.
///
/// Any non-2xx status is an error; the worker logs it and drops the URL
/// without retrying.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(OrbError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    Ok(FetchedPage {
        url: url.clone(),
        body,
    })
}

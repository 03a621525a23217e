//! Robots.txt permission cache
//!
//! Answers "is this URL allowed for the default crawl agent" with at most
//! one successful robots.txt fetch per domain for the life of the process.
//! The cache never expires and is never invalidated; each worker process
//! populates its own copy independently.

mod parser;

pub use parser::RobotsRules;

use crate::{OrbError, Result};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::RwLock;
use url::Url;

/// Per-domain cache of parsed robots.txt disallow rules.
///
/// Keyed by URL authority (host plus explicit port), so sites on distinct
/// ports of the same host carry independent permissions. Lookups for
/// different domains may run concurrently; two lookups racing on the same
/// uncached domain may both fetch, and the last writer wins.
pub struct RobotsCache {
    client: Client,
    rules: RwLock<HashMap<String, RobotsRules>>,
}

impl RobotsCache {
    /// Creates an empty cache that fetches robots.txt with the given
    /// client (and therefore the worker's timeout bounds).
    pub fn new(client: Client) -> Self {
        Self {
            client,
            rules: RwLock::new(HashMap::new()),
        }
    }

    /// Checks whether `url` may be crawled under its domain's robots.txt
    /// rules.
    ///
    /// A cached domain is evaluated locally. On a miss the cache fetches
    /// `<scheme>://<authority>/robots.txt`:
    ///
    /// - 200: rules are parsed, stored, and evaluated;
    /// - 404: no robots.txt means no restrictions; an empty rule set is
    ///   stored so the domain is not fetched again;
    /// - any other status or a transport error: fail open. The URL is
    ///   allowed and nothing is cached, so the next lookup retries.
    ///
    /// Only URLs without a host are an error; the caller is expected to
    /// skip those.
    pub async fn is_allowed(&self, url: &Url) -> Result<bool> {
        let authority = authority_of(url)?;

        if let Some(rules) = self.rules.read().unwrap().get(&authority) {
            return Ok(rules.is_allowed(url.path()));
        }

        let rules = match self.fetch_rules(url.scheme(), &authority).await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::warn!(
                    "Could not fetch robots.txt for {}, allowing by default: {}",
                    authority,
                    e
                );
                return Ok(true);
            }
        };

        let allowed = rules.is_allowed(url.path());
        self.rules.write().unwrap().insert(authority, rules);
        Ok(allowed)
    }

    /// Returns the number of domains with cached rules.
    pub fn cached_domains(&self) -> usize {
        self.rules.read().unwrap().len()
    }

    async fn fetch_rules(&self, scheme: &str, authority: &str) -> Result<RobotsRules> {
        let robots_url = format!("{}://{}/robots.txt", scheme, authority);
        let response = self.client.get(&robots_url).send().await?;

        match response.status() {
            // Missing robots.txt means no restrictions
            StatusCode::NOT_FOUND => Ok(RobotsRules::allow_all()),
            StatusCode::OK => {
                let body = response.text().await?;
                Ok(RobotsRules::parse(&body))
            }
            status => Err(OrbError::RobotsStatus {
                authority: authority.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

/// Extracts the authority (host plus explicit port) used as the cache key.
fn authority_of(url: &Url) -> Result<String> {
    let host = url.host_str().ok_or_else(|| OrbError::MissingHost {
        url: url.to_string(),
    })?;

    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

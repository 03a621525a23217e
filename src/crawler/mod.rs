//! Crawler module: fetching, extraction, and the worker loop
//!
//! - HTTP fetching with a bounded timeout
//! - HTML extraction (title, body text, outbound links)
//! - The polling worker loop that ties frontier, robots cache, and sinks
//!   together

mod fetcher;
mod parser;
mod worker;

pub use fetcher::{build_http_client, fetch_page, user_agent_string, FetchedPage};
pub use parser::{parse_page, resolve_link, ParsedPage};
pub use worker::Worker;

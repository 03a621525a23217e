//! HTML extraction
//!
//! Pulls the title, body text, and outbound links out of a fetched page.
//! The parse tree is walked with a single iterative pass in document
//! order, so pathologically deep documents cannot overflow the stack.

use scraper::{Html, Node};
use url::Url;

/// Extracted content of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Text of the first `<title>` element, trimmed; empty when absent.
    pub title: String,

    /// Concatenated text content of the document.
    pub body: String,

    /// Outbound links resolved to absolute URLs, in document order.
    pub links: Vec<String>,
}

/// Parses HTML and extracts title, body text, and resolved links.
///
/// The first `<title>` found wins. Every `<a href>` value is resolved
/// against `base`; hrefs that are empty or whose resolved form has no host
/// (fragments, `javascript:`, `mailto:` and similar) are dropped.
pub fn parse_page(html: &str, base: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let mut title: Option<String> = None;
    let mut body = String::new();
    let mut links = Vec::new();

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(element) => match element.name() {
                "title" if title.is_none() => {
                    let text: String = node
                        .children()
                        .filter_map(|child| child.value().as_text())
                        .map(|t| t.to_string())
                        .collect();
                    title = Some(text.trim().to_string());
                }
                "a" => {
                    if let Some(href) = element.attr("href") {
                        if let Some(resolved) = resolve_link(base, href) {
                            links.push(resolved);
                        }
                    }
                }
                _ => {}
            },
            Node::Text(text) => body.push_str(text),
            _ => {}
        }
    }

    ParsedPage {
        title: title.unwrap_or_default(),
        body,
        links,
    }
}

/// Resolves an href against the page URL, keeping only navigable results.
///
/// Returns None for empty hrefs and for resolved URLs without a host.
pub fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = base.join(href).ok()?;
    resolved.host_str()?;

    Some(resolved.to_string())
}

//! Robots.txt parser
//!
//! Collects `Disallow:` path prefixes that apply to the wildcard agent.
//! The crawl identifies itself with its own user agent string but obeys
//! only the default (`*`) agent block, the common case for a general
//! crawler.

/// Disallow rules collected for one domain.
///
/// An empty rule set means everything is allowed. This is the value cached
/// per domain for the life of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    disallow: Vec<String>,
}

impl RobotsRules {
    /// A rule set with no restrictions.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parses robots.txt content into wildcard-agent disallow rules.
    ///
    /// The scan is line oriented: blank lines and `#` comments are
    /// skipped, a `User-agent:` line switches the current block (only the
    /// `*` agent's block contributes), and `Disallow:` lines inside that
    /// block add non-empty path prefixes. An empty `Disallow:` value means
    /// "no restriction" and adds no rule.
    pub fn parse(content: &str) -> Self {
        let mut in_wildcard_block = false;
        let mut disallow = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match key.as_str() {
                "user-agent" => {
                    in_wildcard_block = value.eq_ignore_ascii_case("*");
                }
                "disallow" if in_wildcard_block => {
                    if !value.is_empty() {
                        disallow.push(value.to_string());
                    }
                }
                _ => {}
            }
        }

        Self { disallow }
    }

    /// Checks whether a URL path is allowed under these rules.
    ///
    /// A path is disallowed when it starts with any collected prefix. The
    /// caller passes the percent-encoded path of the URL being checked.
    pub fn is_allowed(&self, path: &str) -> bool {
        !self.disallow.iter().any(|prefix| path.starts_with(prefix))
    }

    /// Returns the collected disallow prefixes.
    pub fn disallow(&self) -> &[String] {
        &self.disallow
    }
}

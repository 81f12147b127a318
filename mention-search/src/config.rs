//! Crawl configuration with sensible defaults.
//!
//! [`CrawlConfig`] controls timeouts, the platform of interest, the
//! estimation factor and the backend endpoints. Endpoints are configurable
//! so tests can point the backends at a local mock server.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of mentions a response may carry.
pub const MAX_MENTIONS_LIMIT: usize = 20;

/// Configuration for a crawl.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides. Deserializes with every field optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Per-request timeout in seconds, applied to every page fetch.
    pub timeout_seconds: u64,
    /// Maximum number of mentions in a response (at most 20).
    pub max_mentions: usize,
    /// Site the mention-volume estimate is restricted to.
    pub platform_site: String,
    /// Factor applied to the result count when no authoritative count exists.
    pub estimate_multiplier: u64,
    /// Restrict the platform query to results from the past week.
    pub recent_week_only: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Bing results page URL.
    pub bing_endpoint: String,
    /// DuckDuckGo HTML-only results page URL.
    pub duckduckgo_endpoint: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 8,
            max_mentions: MAX_MENTIONS_LIMIT,
            platform_site: "linkedin.com".into(),
            estimate_multiplier: 10,
            recent_week_only: true,
            user_agent: None,
            bing_endpoint: "https://www.bing.com/search".into(),
            duckduckgo_endpoint: "https://html.duckduckgo.com/html/".into(),
        }
    }
}

impl CrawlConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `max_mentions` must be between 1 and 20
    /// - `platform_site` must not be blank
    /// - `estimate_multiplier` must be greater than 0
    /// - both endpoints must be absolute URLs
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_mentions == 0 || self.max_mentions > MAX_MENTIONS_LIMIT {
            return Err(SearchError::Config(format!(
                "max_mentions must be between 1 and {MAX_MENTIONS_LIMIT}"
            )));
        }
        if self.platform_site.trim().is_empty() {
            return Err(SearchError::Config("platform_site must not be empty".into()));
        }
        if self.estimate_multiplier == 0 {
            return Err(SearchError::Config(
                "estimate_multiplier must be greater than 0".into(),
            ));
        }
        for (name, endpoint) in [
            ("bing_endpoint", &self.bing_endpoint),
            ("duckduckgo_endpoint", &self.duckduckgo_endpoint),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| SearchError::Config(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }
}

//! Core types for mentions, backend output and the crawl response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single extracted or synthesized reference to the query subject.
///
/// The fields are public for serialization. Code that builds mentions from
/// page content goes through [`Mention::new`], which rejects an empty title
/// or link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    /// Display title of the result.
    pub title: String,
    /// Result URL as the source page gave it (may be relative or wrapped).
    pub link: String,
    /// Free-text excerpt, possibly empty.
    pub snippet: String,
}

impl Mention {
    /// Build a mention from raw extracted text.
    ///
    /// All fields are trimmed. Returns `None` if the title or link is empty
    /// after trimming.
    pub fn new(title: &str, link: &str, snippet: &str) -> Option<Self> {
        let title = title.trim();
        let link = link.trim();
        if title.is_empty() || link.is_empty() {
            return None;
        }
        Some(Self {
            title: title.to_owned(),
            link: link.to_owned(),
            snippet: snippet.trim().to_owned(),
        })
    }
}

/// Output of one backend invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendResult {
    /// Mentions in source page order, top to bottom.
    pub mentions: Vec<Mention>,
    /// Explicit results-count indicator read from the page, if any.
    pub total_count: Option<u64>,
}

impl BackendResult {
    /// The fail-soft value: no mentions and no count.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if no mentions were found.
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }
}

/// Provenance of a [`CrawlResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Bing HTML results, the primary backend.
    Bing,
    /// DuckDuckGo HTML-only endpoint, the secondary backend.
    DuckDuckGo,
    /// Synthetic demonstration data.
    Mock,
}

impl Source {
    /// Returns the wire identifier for this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a mention-volume figure was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateKind {
    /// Read directly from the page's own results-count indicator.
    Authoritative,
    /// Derived from the number of results found.
    Heuristic,
    /// Nothing was found; the figure is zero.
    None,
}

/// A mention-volume figure together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MentionEstimate {
    pub value: u64,
    pub kind: EstimateKind,
}

impl MentionEstimate {
    /// The zero estimate used when nothing was found.
    pub fn zero() -> Self {
        Self {
            value: 0,
            kind: EstimateKind::None,
        }
    }
}

/// Backend-specific diagnostics attached to live responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlDebug {
    /// Site the platform-restricted query was limited to.
    pub platform_site: String,
    /// Number of results the platform-restricted query returned.
    pub platform_hits: usize,
    /// Raw total-count signal from the platform-restricted page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_total_count: Option<u64>,
    /// Whether `last7DaysMentions` is authoritative or heuristic.
    pub estimate_kind: EstimateKind,
}

/// The value returned to the caller of a crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResponse {
    /// The original query, unmodified.
    pub query: String,
    /// When the response was assembled.
    pub timestamp: DateTime<Utc>,
    /// Estimated platform mention volume over the last seven days.
    #[serde(rename = "last7DaysMentions")]
    pub last_7_days_mentions: u64,
    /// Mentions in source order.
    pub mentions: Vec<Mention>,
    /// Which backend (or the synthetic generator) produced this response.
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<CrawlDebug>,
    /// Present only for synthetic responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

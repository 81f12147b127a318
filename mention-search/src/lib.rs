//! # mention-search
//!
//! Finds web mentions of a subject (a company or person) and estimates how
//! often it was mentioned on a social platform over the last seven days.
//!
//! ## Design
//!
//! - Scrapes Bing (primary) and DuckDuckGo (secondary) HTML results pages with
//!   priority-ordered CSS marker tables, so layout changes degrade to fewer
//!   results rather than errors
//! - Queries the bare subject and the platform-restricted subject concurrently
//! - Prefers the page's own results count; otherwise estimates volume from the
//!   number of restricted results through a swappable [`EstimationPolicy`]
//! - Never fails: when no backend yields results, a clearly-labelled synthetic
//!   response with the same shape is returned instead
//!
//! Queries are logged only at trace level.

pub mod config;
pub mod engine;
pub mod engines;
pub mod error;
pub mod estimate;
pub mod extract;
pub mod http;
pub mod orchestrator;
pub mod synthetic;
pub mod types;

pub use config::CrawlConfig;
pub use engine::SearchBackend;
pub use error::{Result, SearchError};
pub use estimate::{EstimationPolicy, ResultMultiplier};
pub use types::{
    BackendResult, CrawlDebug, CrawlResponse, EstimateKind, Mention, MentionEstimate, Source,
};

/// Crawl the web for mentions of `query`.
///
/// Tries Bing, then DuckDuckGo, then falls back to synthetic data. The
/// caller is expected to have rejected blank queries and validated
/// `config`.
///
/// # Examples
///
/// ```no_run
/// # async fn example() {
/// let config = mention_search::CrawlConfig::default();
/// let response = mention_search::crawl("Acme Corp", &config).await;
/// println!("{} mentions from {}", response.mentions.len(), response.source);
/// # }
/// ```
pub async fn crawl(query: &str, config: &CrawlConfig) -> CrawlResponse {
    orchestrator::crawl::orchestrate_crawl(query, config).await
}

/// Crawl with [`CrawlConfig::default()`].
pub async fn crawl_default(query: &str) -> CrawlResponse {
    crawl(query, &CrawlConfig::default()).await
}

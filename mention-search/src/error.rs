//! Error types for the mention-search crate.
//!
//! None of these cross the crawl boundary: backend adapters absorb network
//! and extraction errors, and [`crate::crawl`] always resolves to a response.
//! They surface only from the fallible inner steps and from config validation.

/// Errors that can occur while fetching or extracting a results page.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a search engine failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request did not complete within the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// A results page or built-in request could not be processed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid crawl configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for mention-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

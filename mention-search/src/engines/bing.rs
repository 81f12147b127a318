//! Bing search backend, the primary source.
//!
//! Bing result pages carry a results-count indicator (`.sb_count`), so this
//! backend can report an authoritative mention volume for the
//! platform-restricted query.

use crate::config::CrawlConfig;
use crate::engine::{query_text, SearchBackend};
use crate::error::SearchError;
use crate::extract::MarkerTable;
use crate::types::Source;

/// Bing's result-count indicator changes between layouts; `#result-stats` is
/// kept for Bing pages served through Google-style proxies.
const MARKERS: MarkerTable = MarkerTable {
    blocks: &["li.b_algo", ".b_algo"],
    title: &["h2 a", "h2", "[role=\"heading\"]"],
    link: &[("h2 a", "href"), ("a", "href")],
    snippet: &[
        ".b_caption p",
        ".b_lineclamp2",
        ".b_lineclamp3",
        ".b_paractl",
        "p",
    ],
    count: &["#b_tween .sb_count", ".sb_count", "#result-stats"],
};

/// Bing past-week freshness filter.
const PAST_WEEK_FILTER: &str = "ex1:\"ez2\"";

/// Bing HTML search scraper.
pub struct BingBackend;

impl SearchBackend for BingBackend {
    fn source(&self) -> Source {
        Source::Bing
    }

    fn markers(&self) -> &'static MarkerTable {
        &MARKERS
    }

    fn build_request(
        &self,
        client: &reqwest::Client,
        config: &CrawlConfig,
        query: &str,
        site: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, SearchError> {
        let endpoint = url::Url::parse(&config.bing_endpoint)
            .map_err(|e| SearchError::Parse(format!("invalid Bing endpoint: {e}")))?;

        let mut params = vec![("q", query_text(query, site)), ("setlang", "en".to_owned())];
        if site.is_some() && config.recent_week_only {
            params.push(("filters", PAST_WEEK_FILTER.to_owned()));
        }

        Ok(client.get(endpoint).query(&params))
    }
}

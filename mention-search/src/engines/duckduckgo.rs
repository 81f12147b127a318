//! DuckDuckGo search backend, the secondary source.
//!
//! Uses the HTML-only endpoint at `https://html.duckduckgo.com/html/`, which
//! needs no JavaScript. The page exposes no results count, so mention volume
//! is always the heuristic estimate.

use crate::config::CrawlConfig;
use crate::engine::{query_text, SearchBackend};
use crate::error::SearchError;
use crate::extract::MarkerTable;
use crate::types::Source;
use url::Url;

const MARKERS: MarkerTable = MarkerTable {
    blocks: &[".result:not(.result--ad)", ".web-result"],
    title: &[".result__a", "h2 a", "h2"],
    link: &[
        (".result__a", "href"),
        ("a.result__url", "href"),
        ("h2 a", "href"),
    ],
    snippet: &[".result__snippet", ".result__body"],
    count: &[],
};

/// DuckDuckGo HTML search scraper.
pub struct DuckDuckGoBackend;

impl DuckDuckGoBackend {
    /// Extract the target URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    /// The `uddg` parameter is returned decoded. Links that are not wrapped
    /// are kept as given, including relative ones.
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let Ok(parsed) = Url::parse(&full_href) else {
            return Some(href.to_string());
        };

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
                .filter(|target| !target.is_empty())
        } else {
            Some(full_href)
        }
    }
}

impl SearchBackend for DuckDuckGoBackend {
    fn source(&self) -> Source {
        Source::DuckDuckGo
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
        let endpoint = Url::parse(&config.duckduckgo_endpoint)
            .map_err(|e| SearchError::Parse(format!("invalid DuckDuckGo endpoint: {e}")))?;

        let mut params = vec![("q", query_text(query, site))];
        if site.is_some() && config.recent_week_only {
            params.push(("df", "w".to_owned()));
        }

        Ok(client.get(endpoint).query(&params))
    }

    fn rewrite_link(&self, href: &str) -> Option<String> {
        Self::extract_url(href)
    }
}

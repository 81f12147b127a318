//! Trait definition for pluggable search backends.
//!
//! Each backend (Bing, DuckDuckGo) implements [`SearchBackend`] to describe
//! how its results page is requested and which markers locate results on it.
//! The provided [`SearchBackend::search`] composes fetch and extraction and
//! never fails: its return type is the fail-soft [`BackendResult`], while the
//! fallible step is exposed separately as [`SearchBackend::try_search`].

use crate::config::CrawlConfig;
use crate::error::SearchError;
use crate::estimate::{estimate_volume, heuristic_volume, EstimationPolicy};
use crate::extract::{self, MarkerTable};
use crate::http;
use crate::types::{BackendResult, MentionEstimate, Source};
use std::future::Future;
use std::time::Duration;

/// Literal query text, with a `site:` filter appended when restricted.
pub fn query_text(query: &str, site: Option<&str>) -> String {
    match site {
        Some(site) => format!("{query} site:{site}"),
        None => query.to_owned(),
    }
}

/// A pluggable search backend.
///
/// All implementations must be `Send + Sync` so both query shapes of a
/// crawl can run concurrently against the same backend.
pub trait SearchBackend: Send + Sync {
    /// Which [`Source`] this backend reports as provenance.
    fn source(&self) -> Source;

    /// Selectors used to extract results from this backend's page.
    fn markers(&self) -> &'static MarkerTable;

    /// Build the outbound request for `query`, optionally restricted to `site`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the configured endpoint is unusable.
    fn build_request(
        &self,
        client: &reqwest::Client,
        config: &CrawlConfig,
        query: &str,
        site: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, SearchError>;

    /// Map an extracted `href` to the link stored on the mention.
    ///
    /// Returning `None` drops the candidate. The default keeps it as is.
    fn rewrite_link(&self, href: &str) -> Option<String> {
        Some(href.to_owned())
    }

    /// Whether this backend's page carries a results-count indicator.
    fn exposes_total_count(&self) -> bool {
        !self.markers().count.is_empty()
    }

    /// Extract a [`BackendResult`] from a fetched page.
    fn extract(&self, html: &str) -> BackendResult {
        extract::extract(self.markers(), html, |href| self.rewrite_link(href))
    }

    /// Fetch and extract, surfacing failures.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the request cannot be built, times out, or
    /// the connection fails.
    fn try_search(
        &self,
        client: &reqwest::Client,
        config: &CrawlConfig,
        query: &str,
        site: Option<&str>,
    ) -> impl Future<Output = Result<BackendResult, SearchError>> + Send {
        async move {
            tracing::trace!(backend = %self.source(), query, ?site, "backend search");
            let request = self.build_request(client, config, query, site)?;
            let timeout = Duration::from_secs(config.timeout_seconds);
            let html = http::fetch_page(request, self.source().name(), timeout).await?;
            Ok(self.extract(&html))
        }
    }

    /// Fetch and extract; any failure becomes [`BackendResult::empty`].
    fn search(
        &self,
        client: &reqwest::Client,
        config: &CrawlConfig,
        query: &str,
        site: Option<&str>,
    ) -> impl Future<Output = BackendResult> + Send {
        async move {
            match self.try_search(client, config, query, site).await {
                Ok(result) => {
                    tracing::debug!(
                        backend = %self.source(),
                        restricted = site.is_some(),
                        count = result.mentions.len(),
                        "backend returned results"
                    );
                    result
                }
                Err(err) => {
                    tracing::warn!(backend = %self.source(), error = %err, "backend search failed");
                    BackendResult::empty()
                }
            }
        }
    }

    /// Mention-volume estimate for a platform-restricted `result`.
    ///
    /// Backends with a count indicator prefer it; others use the heuristic.
    fn estimate(&self, result: &BackendResult, policy: &dyn EstimationPolicy) -> MentionEstimate {
        if self.exposes_total_count() {
            estimate_volume(result, policy)
        } else {
            heuristic_volume(result, policy)
        }
    }
}

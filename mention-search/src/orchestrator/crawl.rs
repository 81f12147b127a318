//! The crawl state machine: primary, secondary, synthetic.
//!
//! ```text
//! TryPrimary ──empty──► TrySecondary ──empty──► Synthesize ──► Done
//!     │                      │                      ▲
//!     │ found                │ found                │ panic escaped
//!     ▼                      ▼                      │
//!    Done                   Done      (either live stage)
//! ```
//!
//! Transitions only move forward; each live backend is attempted once.

use crate::config::CrawlConfig;
use crate::engine::SearchBackend;
use crate::engines::{BingBackend, DuckDuckGoBackend};
use crate::estimate::{EstimationPolicy, ResultMultiplier};
use crate::http;
use crate::synthetic;
use crate::types::CrawlResponse;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use super::assemble::live_response;

/// Where a crawl currently is.
#[derive(Debug)]
enum CrawlState {
    TryPrimary,
    TrySecondary,
    Synthesize,
    Done(CrawlResponse),
}

/// Outcome of running one backend for both query shapes.
#[derive(Debug)]
enum Attempt {
    /// The bare query produced at least one mention.
    Found(CrawlResponse),
    /// The bare query produced nothing (or failed, which is the same thing).
    Empty,
    /// A panic escaped the backend.
    Escaped,
}

/// Crawl with Bing as primary and DuckDuckGo as secondary backend.
pub async fn orchestrate_crawl(query: &str, config: &CrawlConfig) -> CrawlResponse {
    orchestrate_with(&BingBackend, &DuckDuckGoBackend, query, config).await
}

/// Run the state machine over an explicit primary and secondary backend.
///
/// Always resolves to a response; when neither backend yields mentions the
/// response is synthetic.
pub async fn orchestrate_with<P, S>(
    primary: &P,
    secondary: &S,
    query: &str,
    config: &CrawlConfig,
) -> CrawlResponse
where
    P: SearchBackend,
    S: SearchBackend,
{
    let policy = ResultMultiplier {
        factor: config.estimate_multiplier,
    };

    // One client per crawl, shared by both shapes of each stage.
    let client = match http::build_client(config) {
        Ok(client) => Some(client),
        Err(err) => {
            tracing::warn!(error = %err, "no HTTP client, skipping live backends");
            None
        }
    };

    let mut state = CrawlState::TryPrimary;
    loop {
        state = match state {
            CrawlState::TryPrimary => match client {
                Some(ref client) => match attempt(primary, client, config, query, &policy).await {
                    Attempt::Found(response) => CrawlState::Done(response),
                    Attempt::Empty => {
                        tracing::info!(backend = %primary.source(), "no results, trying secondary");
                        CrawlState::TrySecondary
                    }
                    Attempt::Escaped => CrawlState::Synthesize,
                },
                None => CrawlState::Synthesize,
            },
            CrawlState::TrySecondary => match client {
                Some(ref client) => match attempt(secondary, client, config, query, &policy).await {
                    Attempt::Found(response) => CrawlState::Done(response),
                    Attempt::Empty => {
                        tracing::info!("all search backends empty, using synthetic data");
                        CrawlState::Synthesize
                    }
                    Attempt::Escaped => CrawlState::Synthesize,
                },
                None => CrawlState::Synthesize,
            },
            CrawlState::Synthesize => CrawlState::Done(synthetic::generate(query)),
            CrawlState::Done(response) => {
                tracing::debug!(
                    source = %response.source,
                    mentions = response.mentions.len(),
                    last_7_days = response.last_7_days_mentions,
                    "crawl complete"
                );
                return response;
            }
        };
    }
}

/// Run `backend` for the bare and the platform-restricted query concurrently.
async fn attempt<B: SearchBackend>(
    backend: &B,
    client: &reqwest::Client,
    config: &CrawlConfig,
    query: &str,
    policy: &dyn EstimationPolicy,
) -> Attempt {
    let site = config.platform_site.as_str();
    let shapes = futures::future::join(
        backend.search(client, config, query, None),
        backend.search(client, config, query, Some(site)),
    );

    let (bare, restricted) = match AssertUnwindSafe(shapes).catch_unwind().await {
        Ok(pair) => pair,
        Err(_) => {
            tracing::error!(
                backend = %backend.source(),
                "backend panicked, abandoning live search"
            );
            return Attempt::Escaped;
        }
    };

    if bare.is_empty() {
        return Attempt::Empty;
    }

    let estimate = backend.estimate(&restricted, policy);
    Attempt::Found(live_response(
        query,
        backend.source(),
        bare,
        &restricted,
        estimate,
        site,
        config.max_mentions,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::extract::MarkerTable;
    use crate::types::{EstimateKind, Source};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TABLE: MarkerTable = MarkerTable {
        blocks: &[".r"],
        title: &["a"],
        link: &[("a", "href")],
        snippet: &[],
        count: &[".count"],
    };

    /// Serves pages from a mock server at `base`, counting invocations.
    struct PageBackend {
        source: Source,
        base: String,
        calls: AtomicUsize,
    }

    impl PageBackend {
        fn new(source: Source, base: String) -> Self {
            Self {
                source,
                base,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SearchBackend for PageBackend {
        fn source(&self) -> Source {
            self.source
        }

        fn markers(&self) -> &'static MarkerTable {
            &TABLE
        }

        fn build_request(
            &self,
            client: &reqwest::Client,
            _config: &CrawlConfig,
            query: &str,
            site: Option<&str>,
        ) -> Result<reqwest::RequestBuilder, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(client
                .get(&self.base)
                .query(&[("q", crate::engine::query_text(query, site))]))
        }
    }

    /// Panics while building its request.
    struct PanickingBackend;

    impl SearchBackend for PanickingBackend {
        fn source(&self) -> Source {
            Source::Bing
        }

        fn markers(&self) -> &'static MarkerTable {
            &TABLE
        }

        fn build_request(
            &self,
            _client: &reqwest::Client,
            _config: &CrawlConfig,
            _query: &str,
            _site: Option<&str>,
        ) -> Result<reqwest::RequestBuilder, SearchError> {
            panic!("selector table corrupted");
        }
    }

    fn hits(n: usize) -> String {
        (0..n)
            .map(|i| {
                format!(r#"<div class="r"><a href="https://hit.example/{i}">Hit {i}</a></div>"#)
            })
            .collect()
    }

    async fn serve(server: &MockServer, q: &str, body: String) {
        Mock::given(method("GET"))
            .and(query_param("q", q))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn primary_hit_stops_pipeline() {
        let server = MockServer::start().await;
        serve(&server, "acme", hits(3)).await;
        serve(&server, "acme site:linkedin.com", hits(2)).await;

        let primary = PageBackend::new(Source::Bing, server.uri());
        let secondary = PageBackend::new(Source::DuckDuckGo, server.uri());
        let response =
            orchestrate_with(&primary, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.source, Source::Bing);
        assert_eq!(response.mentions.len(), 3);
        assert_eq!(response.last_7_days_mentions, 20);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 2);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authoritative_count_preferred() {
        let server = MockServer::start().await;
        serve(&server, "acme", hits(1)).await;
        serve(
            &server,
            "acme site:linkedin.com",
            format!(r#"<span class="count">1,234 results</span>{}"#, hits(2)),
        )
        .await;

        let primary = PageBackend::new(Source::Bing, server.uri());
        let secondary = PageBackend::new(Source::DuckDuckGo, server.uri());
        let response =
            orchestrate_with(&primary, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.last_7_days_mentions, 1234);
        let debug = response.debug.expect("debug");
        assert_eq!(debug.estimate_kind, EstimateKind::Authoritative);
        assert_eq!(debug.platform_hits, 2);
    }

    #[tokio::test]
    async fn empty_restricted_query_gives_zero() {
        let server = MockServer::start().await;
        serve(&server, "acme", hits(4)).await;
        serve(&server, "acme site:linkedin.com", String::new()).await;

        let primary = PageBackend::new(Source::Bing, server.uri());
        let secondary = PageBackend::new(Source::DuckDuckGo, server.uri());
        let response =
            orchestrate_with(&primary, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.source, Source::Bing);
        assert_eq!(response.last_7_days_mentions, 0);
        assert_eq!(
            response.debug.expect("debug").estimate_kind,
            EstimateKind::None
        );
    }

    #[tokio::test]
    async fn falls_back_to_secondary() {
        let primary_server = MockServer::start().await;
        serve(&primary_server, "acme", String::new()).await;
        serve(&primary_server, "acme site:linkedin.com", hits(5)).await;

        let secondary_server = MockServer::start().await;
        serve(&secondary_server, "acme", hits(2)).await;
        serve(&secondary_server, "acme site:linkedin.com", hits(3)).await;

        let primary = PageBackend::new(Source::Bing, primary_server.uri());
        let secondary = PageBackend::new(Source::DuckDuckGo, secondary_server.uri());
        let response =
            orchestrate_with(&primary, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.source, Source::DuckDuckGo);
        assert_eq!(response.mentions.len(), 2);
        assert_eq!(response.last_7_days_mentions, 30);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn all_empty_synthesizes() {
        let server = MockServer::start().await;
        serve(&server, "acme", "<p>blocked</p>".into()).await;
        serve(&server, "acme site:linkedin.com", "<p>blocked</p>".into()).await;

        let primary = PageBackend::new(Source::Bing, server.uri());
        let secondary = PageBackend::new(Source::DuckDuckGo, server.uri());
        let response =
            orchestrate_with(&primary, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.source, Source::Mock);
        assert_eq!(response.mentions.len(), 10);
        assert!(response.note.is_some());
    }

    #[tokio::test]
    async fn panic_in_primary_synthesizes_without_secondary() {
        let server = MockServer::start().await;
        serve(&server, "acme", hits(3)).await;
        let secondary = PageBackend::new(Source::DuckDuckGo, server.uri());

        let response =
            orchestrate_with(&PanickingBackend, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.source, Source::Mock);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn mentions_truncated_to_max() {
        let server = MockServer::start().await;
        serve(&server, "acme", hits(35)).await;
        serve(&server, "acme site:linkedin.com", hits(1)).await;

        let primary = PageBackend::new(Source::Bing, server.uri());
        let secondary = PageBackend::new(Source::DuckDuckGo, server.uri());
        let response =
            orchestrate_with(&primary, &secondary, "acme", &CrawlConfig::default()).await;

        assert_eq!(response.mentions.len(), 20);
        assert_eq!(response.mentions[0].title, "Hit 0");
        assert_eq!(response.mentions[19].title, "Hit 19");
    }
}

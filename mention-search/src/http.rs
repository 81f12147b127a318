//! Page fetcher: shared HTTP client with User-Agent rotation.
//!
//! Provides a configured [`reqwest::Client`] with a browser-like identity and
//! [`fetch_page`], which performs one bounded request and returns the body.

use crate::config::CrawlConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
];

/// Headers sent with every results-page request, alongside the User-Agent.
pub(crate) const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub(crate) const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Build a [`reqwest::Client`] configured for results-page scraping.
///
/// No client-level timeout is set: [`fetch_page`] owns the deadline so an
/// expiry always surfaces as [`SearchError::Timeout`].
///
/// The client has:
/// - Cookie store enabled (consent redirects)
/// - Random User-Agent from the rotation list (or custom if configured)
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &CrawlConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array
        .unwrap_or(USER_AGENTS[0])
}

/// Send `request` and return the response body as text.
///
/// The whole exchange, body included, is bounded by `timeout`. A non-2xx
/// status is not an error: the body is still returned so the extractor can
/// try it, and the status is logged.
///
/// # Errors
///
/// Returns [`SearchError::Timeout`] if the deadline passes, or
/// [`SearchError::Http`] if the connection or body read fails.
pub async fn fetch_page(
    request: reqwest::RequestBuilder,
    label: &str,
    timeout: Duration,
) -> Result<String, SearchError> {
    let exchange = async {
        let response = request
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("{label} request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(backend = label, %status, "non-success status, parsing body anyway");
        }

        response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("{label} response read failed: {e}")))
    };

    let html = tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| SearchError::Timeout(format!("{label} exceeded {}s", timeout.as_secs())))??;

    tracing::trace!(backend = label, bytes = html.len(), "response received");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, headers, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&CrawlConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = CrawlConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[tokio::test]
    async fn fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .and(header("user-agent", "CustomBot/1.0"))
            .and(headers("accept-language", vec!["en-US", "en;q=0.5"]))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let config = CrawlConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        let client = build_client(&config).expect("client");
        let body = fetch_page(
            client.get(format!("{}/page", server.uri())),
            "test",
            Duration::from_secs(5),
        )
        .await
        .expect("fetch");
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn non_success_status_still_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>busy</html>"))
            .mount(&server)
            .await;

        let client = build_client(&CrawlConfig::default()).expect("client");
        let body = fetch_page(client.get(server.uri()), "test", Duration::from_secs(5))
            .await
            .expect("non-2xx is content");
        assert!(body.contains("busy"));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = build_client(&CrawlConfig::default()).expect("client");
        let err = fetch_page(client.get(server.uri()), "test", Duration::from_millis(200))
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Timeout(_)));
    }

    #[tokio::test]
    async fn deadline_equal_to_config_timeout_is_timeout_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("late")
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = CrawlConfig {
            timeout_seconds: 1,
            ..Default::default()
        };
        let client = build_client(&config).expect("client");
        let err = fetch_page(
            client.get(server.uri()),
            "test",
            Duration::from_secs(config.timeout_seconds),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SearchError::Timeout(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_http_error() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("ephemeral port")
            .port();
        let client = build_client(&CrawlConfig::default()).expect("client");
        let err = fetch_page(
            client.get(format!("http://127.0.0.1:{port}/")),
            "test",
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
    }
}

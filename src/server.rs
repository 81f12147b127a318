//! HTTP boundary for the mention crawler.
//!
//! ## Endpoints
//!
//! - `GET /`: liveness message
//! - `POST /api/crawl`: body `{ "query": string }`, returns a crawl response

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use mention_search::CrawlConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Message returned by `GET /`.
pub const LIVENESS_MESSAGE: &str = "Web mention scraper API is running.";

/// Body of `POST /api/crawl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Error body for non-200 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub message: String,
}

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    crawl: Arc<CrawlConfig>,
}

impl AppState {
    pub fn new(crawl: CrawlConfig) -> Self {
        Self {
            crawl: Arc::new(crawl),
        }
    }
}

/// Build the application router with CORS for `allowed_origins`.
///
/// An empty origin list allows any origin. Origins that are not valid
/// header values are ignored here; [`ServerConfig::validate`] rejects them.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(handle_status))
        .route("/api/crawl", post(handle_crawl))
        .layer(cors)
        .with_state(state)
}

/// The mention-scout HTTP server.
///
/// Serves in a background tokio task; aborted on [`MentionServer::shutdown`]
/// or drop.
pub struct MentionServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl MentionServer {
    /// Validate `config`, bind `{host}:{port}` and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the listener cannot bind.
    pub async fn start(config: &ServerConfig) -> Result<Self> {
        config.validate()?;

        let app = router(AppState::new(config.crawl.clone()), &config.allowed_origins);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{bind_addr}: {e}")))?;
        let addr = listener.local_addr()?;

        info!("mention-scout listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for MentionServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_owned(),
        }),
    )
        .into_response()
}

/// `GET /`: liveness message.
async fn handle_status() -> Json<StatusBody> {
    Json(StatusBody {
        message: LIVENESS_MESSAGE.to_owned(),
    })
}

/// `POST /api/crawl`: run a crawl for the body's query.
async fn handle_crawl(
    State(state): State<AppState>,
    body: std::result::Result<Json<CrawlRequest>, JsonRejection>,
) -> Response {
    let query = match body {
        Ok(Json(CrawlRequest { query: Some(q) })) if !q.trim().is_empty() => q,
        Ok(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing query parameter in request body.",
            )
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected crawl body");
            return error_response(
                StatusCode::BAD_REQUEST,
                "Missing query parameter in request body.",
            );
        }
    };

    tracing::debug!(query = %query, "crawl requested");

    // Run on its own task so a panic in the core becomes a 500, not a
    // dropped connection.
    let crawl = Arc::clone(&state.crawl);
    let outcome =
        tokio::spawn(async move { mention_search::crawl(&query, &crawl).await }).await;

    match outcome {
        Ok(response) => {
            info!(
                source = %response.source,
                mentions = response.mentions.len(),
                last_7_days = response.last_7_days_mentions,
                "crawl served"
            );
            Json(response).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "crawl task failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to crawl web.")
        }
    }
}

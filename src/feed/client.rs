//! Complaint Feed Client
//!
//! HTTP client for the complaint endpoint, plus a file-backed source for
//! rendering a saved payload offline. Both decode through [`decode_feed`].

use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use super::types::FeedResponse;

/// Endpoint the dashboard reads by default
pub const DEFAULT_FEED_URL: &str = "http://localhost:5000/api/complaints";

/// Anything that can produce one complaint feed payload
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Human-readable origin, used in logs
    fn describe(&self) -> String;

    /// Fetch and decode the payload. Called once per dashboard.
    async fn fetch(&self) -> Result<FeedResponse, FeedError>;
}

/// Configuration for the HTTP feed client
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// Full URL of the complaint endpoint
    pub url: String,
    /// Request timeout in milliseconds. `None` waits indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            request_timeout_ms: None,
        }
    }
}

/// Single-shot GET client for the complaint endpoint
pub struct FeedClient {
    client: Client,
    config: FeedClientConfig,
}

impl FeedClient {
    /// Create a new client with the given configuration
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let mut builder = Client::builder();
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    fn describe(&self) -> String {
        self.config.url.clone()
    }

    async fn fetch(&self) -> Result<FeedResponse, FeedError> {
        tracing::debug!(url = %self.config.url, "Fetching complaint feed");

        let response = self.client.get(&self.config.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                "Complaint feed answered with an error status, decoding body anyway"
            );
        }

        let body = response.bytes().await?;
        let feed = decode_feed(&body)?;

        tracing::info!(
            count = feed.count,
            received = feed.complaints.len(),
            "Complaint feed loaded"
        );
        warn_if_inconsistent(&feed);

        Ok(feed)
    }
}

/// Reads a previously saved feed payload from disk
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<FeedResponse, FeedError> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| FeedError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        let feed = decode_feed(&body)?;
        tracing::info!(path = ?self.path, count = feed.count, "Complaint feed read from file");
        warn_if_inconsistent(&feed);

        Ok(feed)
    }
}

/// Decode a raw payload.
///
/// Only a body that is not JSON at all fails, with [`FeedError::Parse`].
/// Well-formed JSON of the wrong shape decodes to safe defaults: a
/// non-object body is an empty feed, and missing or wrongly-typed fields
/// take their zero value.
pub fn decode_feed(body: &[u8]) -> Result<FeedResponse, FeedError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(FeedError::Parse)?;

    if !value.is_object() {
        tracing::warn!("Complaint feed body is not a JSON object, treating it as empty");
        return Ok(FeedResponse::default());
    }

    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Unreadable complaint feed, treating it as empty");
        FeedResponse::default()
    }))
}

fn warn_if_inconsistent(feed: &FeedResponse) {
    if !feed.is_consistent() {
        tracing::warn!(
            count = feed.count,
            received = feed.complaints.len(),
            "Feed count does not match complaint list length; totals follow the advertised count"
        );
    }
}

// ============================================
// Errors
// ============================================

/// Errors that can occur while fetching the complaint feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid JSON in feed response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to read feed payload {path:?}: {error}")]
    Io { path: PathBuf, error: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use std::io::Write;

    const FEED_BODY: &str = r#"{
        "count": 2,
        "complaints": [
            {"id": 1, "customer_name": "Ada", "severity": 3, "complaint_date": "2024-03-15T14:30:00", "meal_type": "lunch", "status": "Open"},
            {"id": 2, "customer_name": "Bo", "severity": 5, "complaint_date": "2024-03-16T19:00:00", "meal_type": "dinner", "status": "Resolved"}
        ]
    }"#;

    /// Serve `body` with `status` on an ephemeral port, returning the feed URL
    async fn spawn_feed(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route("/api/complaints", get(move || async move { (status, body) }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api/complaints", addr)
    }

    fn client_for(url: String) -> FeedClient {
        FeedClient::new(FeedClientConfig {
            url,
            request_timeout_ms: Some(5_000),
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = FeedClientConfig::default();
        assert_eq!(config.url, "http://localhost:5000/api/complaints");
        assert!(config.request_timeout_ms.is_none());
    }

    #[test]
    fn test_decode_feed_ok() {
        let feed = decode_feed(FEED_BODY.as_bytes()).unwrap();
        assert_eq!(feed.count, 2);
        assert_eq!(feed.complaints.len(), 2);
        assert_eq!(feed.complaints[1].customer_name, "Bo");
    }

    #[test]
    fn test_decode_feed_parse_error() {
        let err = decode_feed(b"<html>not json</html>").unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[test]
    fn test_decode_feed_wrong_types_default() {
        let feed = decode_feed(
            br#"{"count": 2, "complaints": [{"id": 1, "severity": 3}, {"id": 2, "severity": 3.0}]}"#,
        )
        .unwrap();
        assert_eq!(feed.count, 2);
        assert_eq!(feed.complaints[0].severity, 3);
        assert_eq!(feed.complaints[1].severity, 3);

        let feed = decode_feed(br#"{"count": "many", "complaints": []}"#).unwrap();
        assert_eq!(feed.count, 0);
    }

    #[test]
    fn test_decode_feed_non_object_is_empty() {
        let bodies: [&[u8]; 4] = [b"null", br#""just a string""#, b"[1, 2, 3]", b"42"];
        for body in bodies {
            let feed = decode_feed(body).unwrap();
            assert_eq!(feed, FeedResponse::default());
        }
    }

    #[test]
    fn test_decode_feed_missing_list_is_empty() {
        let feed = decode_feed(br#"{"count": 4}"#).unwrap();
        assert_eq!(feed.count, 4);
        assert!(feed.complaints.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_from_server() {
        let url = spawn_feed(StatusCode::OK, FEED_BODY).await;
        let feed = client_for(url).fetch().await.unwrap();

        assert_eq!(feed.count, 2);
        assert_eq!(feed.complaints[0].severity, 3);
    }

    #[tokio::test]
    async fn test_fetch_non_json_body() {
        let url = spawn_feed(StatusCode::OK, "Internal hiccup").await;
        let err = client_for(url).fetch().await.unwrap_err();

        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_error_status_with_json_body_loads() {
        let url = spawn_feed(StatusCode::INTERNAL_SERVER_ERROR, FEED_BODY).await;
        let feed = client_for(url).fetch().await.unwrap();

        assert_eq!(feed.count, 2);
        assert_eq!(feed.complaints.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_error_status_with_text_body_fails() {
        let url = spawn_feed(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").await;
        let err = client_for(url).fetch().await.unwrap_err();

        assert!(matches!(err, FeedError::Parse(_)));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Grab a free port, then close it so nothing is listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(format!("http://{}/api/complaints", addr))
            .fetch()
            .await
            .unwrap_err();

        assert!(matches!(err, FeedError::Network(_)));
        assert!(err.to_string().starts_with("Network error"));
    }

    #[tokio::test]
    async fn test_file_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FEED_BODY.as_bytes()).unwrap();

        let source = FileFeed::new(file.path());
        let feed = source.fetch().await.unwrap();
        assert_eq!(feed.complaints.len(), 2);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_file_feed_missing() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileFeed::new(dir.path().join("missing.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Io { .. }));
    }
}

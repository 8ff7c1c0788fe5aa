//! Remote endpoint access.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::config::SyncConfig;
use crate::error::QuotebookError;
use crate::quotes::Quote;

const MAX_ERROR_BODY_CHARS: usize = 2 * 1024;

/// The remote side of a sync.
pub trait QuoteRemote: Send + Sync {
    /// Fetch the raw records published by the endpoint.
    ///
    /// # Errors
    ///
    /// Returns a network, status, or payload error.
    fn fetch(&self) -> impl Future<Output = Result<Vec<Value>, QuotebookError>> + Send;

    /// Publish `quotes` to the endpoint. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns a network or status error.
    fn push(&self, quotes: &[Quote]) -> impl Future<Output = Result<(), QuotebookError>> + Send;
}

/// [`QuoteRemote`] over HTTP: `GET` for fetch, JSON `POST` for push.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRemote {
    /// Build a client for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QuotebookError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quotebook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| QuotebookError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build a client from the sync settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &SyncConfig) -> Result<Self, QuotebookError> {
        Self::new(config.endpoint.clone(), config.timeout())
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, QuotebookError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let mut message = response.text().await.unwrap_or_default();
    if message.chars().count() > MAX_ERROR_BODY_CHARS {
        message = message.chars().take(MAX_ERROR_BODY_CHARS).collect();
        message.push_str("...(truncated)");
    }
    if message.is_empty() {
        message = status.canonical_reason().unwrap_or("no body").to_string();
    }

    Err(QuotebookError::Remote {
        status: status.as_u16(),
        message,
    })
}

impl QuoteRemote for HttpRemote {
    async fn fetch(&self) -> Result<Vec<Value>, QuotebookError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let body = ensure_success(response).await?.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            QuotebookError::MalformedPayload(format!("expected a JSON array of records: {e}"))
        })
    }

    async fn push(&self, quotes: &[Quote]) -> Result<(), QuotebookError> {
        let response = self.client.post(&self.endpoint).json(quotes).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn remote(server: &MockServer) -> HttpRemote {
        HttpRemote::new(format!("{}/posts", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"id": 1, "title": "first"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let records = remote(&server).fetch().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["title"], "first");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = remote(&server).fetch().await.unwrap_err();

        match err {
            QuotebookError::Remote { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = remote(&server).fetch().await.unwrap_err();
        assert!(matches!(err, QuotebookError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_is_network_error() {
        let remote = HttpRemote::new("http://127.0.0.1:9/posts", Duration::from_secs(2)).unwrap();
        let err = remote.fetch().await.unwrap_err();
        assert!(matches!(err, QuotebookError::Network(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_push_posts_json_list() {
        let server = MockServer::start().await;
        let quotes = vec![Quote::new("t", "Server")];
        Mock::given(method("POST"))
            .and(path("/posts"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!([{"text": "t", "category": "Server"}])))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 101})))
            .expect(1)
            .mount(&server)
            .await;

        remote(&server).push(&quotes).await.unwrap();
    }
}

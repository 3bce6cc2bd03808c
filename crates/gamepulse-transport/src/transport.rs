//! The async seam between the dispatcher and the network.
//!
//! [`HttpTransport`] is the production implementation; tests inject their
//! own [`Transport`] to observe dispatched payloads without a server.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Connect timeout for the collection endpoint.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Total request timeout (connect + write + read).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors internal to the delivery path. Never crosses the public SDK API;
/// the dispatcher logs and discards these.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request failed below the HTTP layer (DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("collection endpoint returned status {0}")]
    Status(u16),
}

/// Best-effort JSON POST capability consumed by the dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` with the `x-api-key` header.
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<(), TransportError>;
}

/// reqwest-backed transport with the SDK's fixed timeouts.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the HTTP client. Called once per SDK instance; if the builder
    /// fails (exotic TLS misconfiguration) the default client stands in so
    /// initialization stays infallible.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<(), TransportError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("x-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "event sent");
            Ok(())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn posts_json_with_api_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events/collect"))
            .and(header("x-api-key", "test-key"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({"value": "level_start"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new();
        let url = format!("{}/events/collect", server.uri());
        let body = serde_json::json!({"value": "level_start"});
        transport.post_json(&url, "test-key", body).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = HttpTransport::new();
        let err = transport
            .post_json(&server.uri(), "k", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_matches!(err, TransportError::Status(500));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let transport = HttpTransport::new();
        let err = transport
            .post_json("http://127.0.0.1:1/collect", "k", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_matches!(err, TransportError::Request(_));
    }
}

//! HTTP implementation of the request gateway.
//!
//! Talks to the answer service over two endpoints:
//! - `POST /chat` with `{"message": ...}`, answered by `{"answer": ...}`
//! - `GET /health`, checked once at startup
//!
//! No retries and no backoff. A request timeout is applied only when one is
//! configured; otherwise the transport's own behavior stands.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::request::{GatewayError, RequestGateway};
use super::types::{ChatRequest, ErrorBody, HealthStatus, RemoteAnswer};

const CHAT_PATH: &str = "/chat";
const HEALTH_PATH: &str = "/health";

/// Upper bound for the startup health check, independent of the chat timeout.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    /// Build a gateway for the service at `base_url` (e.g. `http://localhost:8080`).
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the service whether it is up.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

/// Pull the service's `{"error": ...}` message out of a failure body, falling
/// back to the raw text.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait]
impl RequestGateway for HttpGateway {
    async fn send(&self, message: &str) -> Result<RemoteAnswer, GatewayError> {
        let url = self.url(CHAT_PATH);
        info!("POST {} (message_len={})", url, message.len());

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("Chat response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            warn!("Chat request rejected: {} - {}", status.as_u16(), detail);
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                detail,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        debug!("Chat response body: {} bytes", bytes.len());

        serde_json::from_slice::<RemoteAnswer>(&bytes)
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

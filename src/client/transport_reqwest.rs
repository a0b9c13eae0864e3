//! Real HTTP transport using reqwest

use crate::client::transport_types::{AsyncTransport, HttpReply, TransportError};
use async_trait::async_trait;
use std::time::{Duration, Instant};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create new transport with default timeout (30s)
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Configuration(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError> {
        let started = Instant::now();
        tracing::debug!(url, body_len = body.len(), timeout_secs = self.timeout.as_secs(), "POST");

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            url,
            status,
            body_len = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response"
        );
        Ok(HttpReply { status, body })
    }
}

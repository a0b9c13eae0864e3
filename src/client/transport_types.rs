//! Transport types
//!
//! Common types shared across transport implementations.

use async_trait::async_trait;

/// Transport-level failures
///
/// Anything here means no structured reply was obtained from the backend.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, reset, ...
    #[error("Network error: {0}")]
    Network(String),

    /// Request did not complete within the configured timeout
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Response body could not be read
    #[error("Body error: {0}")]
    Body(String),

    /// Client could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else if err.is_builder() {
            TransportError::Configuration(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

/// Raw HTTP reply: status plus body text, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Asynchronous HTTP transport
///
/// Abstraction over the HTTP client so tests can use `FakeTransport`.
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// POST a JSON body and return the reply, including non-2xx replies
    async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError>;
}

//! Fake transport for testing
//!
//! Serves fixture bodies instead of making HTTP calls, and records every
//! request it receives.

use crate::client::transport_types::{AsyncTransport, HttpReply, TransportError};
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

/// One recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Status to reply with
    pub status: u16,
    /// Response body to return
    pub response_body: String,
    /// Network error message to return (if set)
    pub error_message: Option<String>,
    /// Artificial latency before replying
    pub delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Fake transport replying 200 with the given body
    pub fn new(response: &str) -> Self {
        Self::with_status(200, response)
    }

    /// Fake transport replying with an explicit status
    pub fn with_status(status: u16, response: &str) -> Self {
        Self {
            status,
            response_body: response.to_string(),
            error_message: None,
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fake transport that fails with a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            error_message: Some(msg.to_string()),
            ..Self::with_status(0, "")
        }
    }

    /// Delay every reply
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AsyncTransport for FakeTransport {
    async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                body: body.to_string(),
            });
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref msg) = self.error_message {
            return Err(TransportError::Network(msg.clone()));
        }
        Ok(HttpReply {
            status: self.status,
            body: self.response_body.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_transport_basic() {
        let transport = FakeTransport::new("test response");
        let reply = transport.post_json("http://test", "{}").await.unwrap();
        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, "test response");
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_fake_transport_with_error() {
        let transport = FakeTransport::with_error("connection refused");
        let result = transport.post_json("http://test", "{}").await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }

    #[tokio::test]
    async fn test_fake_transport_records_body() {
        let transport = FakeTransport::with_status(400, r#"{"error": "x"}"#);
        let _ = transport.post_json("http://test/analyze", r#"{"code":""}"#).await;
        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://test/analyze");
        assert_eq!(requests[0].body, r#"{"code":""}"#);
    }

    #[test]
    fn test_transport_error_display() {
        let err = TransportError::Network("test".to_string());
        assert_eq!(format!("{}", err), "Network error: test");

        let err = TransportError::Timeout("30s".to_string());
        assert!(format!("{}", err).contains("30s"));
    }
}

//! Analysis client
//!
//! Sends source text and a mode to the backend's `/analyze` endpoint and
//! classifies whatever comes back into an [`Outcome`]:
//! - 2xx with a body matching the mode's shape: `Success`
//! - non-2xx with `{"error": ...}`: `ApplicationError`
//! - anything else (no reply, unparsable body): `TransportError`
//!
//! `analyze` never returns `Err`; every failure is an outcome.

pub mod events;
pub mod transport;
mod transport_fake;
mod transport_reqwest;
mod transport_types;

pub use events::{AnalysisEvent, AnalysisReceiver, AnalysisSender};
pub use transport::{
    AsyncTransport, FakeTransport, HttpReply, ReqwestTransport, Transport, TransportError,
};
pub use transport_fake::RecordedRequest;

use crate::config::BackendConfig;
use compilab_core::{AnalysisRequest, AnalysisResponse, ErrorBody, Mode, Outcome};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Path of the analysis endpoint, relative to the backend URL
pub const ANALYZE_PATH: &str = "/analyze";

/// Client for the analysis backend
#[derive(Debug)]
pub struct AnalysisClient {
    transport: Transport,
    base_url: String,
}

impl AnalysisClient {
    /// Build a client with the real HTTP transport
    pub fn from_config(config: &BackendConfig) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::with_timeout(config.timeout_secs)?;
        Ok(Self::with_transport(&config.url, Transport::Real(transport)))
    }

    /// Build a client over any transport
    pub fn with_transport(base_url: &str, transport: impl Into<Transport>) -> Self {
        Self {
            transport: transport.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Issue one analysis request and classify the reply
    pub async fn analyze(&self, source_text: &str, mode: Mode) -> Outcome {
        let request = AnalysisRequest::new(source_text, mode);
        self.send(&request).await
    }

    /// Same as [`analyze`](Self::analyze) for a prepared request
    pub async fn send(&self, request: &AnalysisRequest) -> Outcome {
        let body = match serde_json::to_string(request) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode analysis request");
                return Outcome::TransportError {
                    detail: e.to_string(),
                };
            }
        };

        let endpoint = self.endpoint();
        tracing::info!(
            endpoint = %endpoint,
            mode = %request.mode,
            code_len = request.source_text.len(),
            "analysis request"
        );

        match self.transport.post_json(&endpoint, &body).await {
            Ok(reply) => classify_reply(request.mode, &reply),
            Err(e) => {
                tracing::warn!(error = %e, endpoint = %endpoint, "backend unreachable");
                Outcome::TransportError {
                    detail: e.to_string(),
                }
            }
        }
    }
}

/// Turn a raw HTTP reply into an outcome for `mode`
pub fn classify_reply(mode: Mode, reply: &HttpReply) -> Outcome {
    if reply.is_success() {
        return match AnalysisResponse::from_json(mode, &reply.body) {
            Ok(response) => {
                tracing::info!(status = reply.status, mode = %mode, "analysis succeeded");
                Outcome::Success { response }
            }
            Err(e) => {
                tracing::warn!(status = reply.status, error = %e, "malformed success body");
                Outcome::TransportError {
                    detail: format!("malformed response body: {}", e),
                }
            }
        };
    }

    match serde_json::from_str::<ErrorBody>(&reply.body) {
        Ok(body) => {
            tracing::info!(status = reply.status, error = %body.error, "backend rejected input");
            Outcome::ApplicationError {
                message: body.error,
            }
        }
        Err(e) => {
            tracing::warn!(status = reply.status, error = %e, "unstructured error reply");
            Outcome::TransportError {
                detail: format!("HTTP {} without error body", reply.status),
            }
        }
    }
}

/// Run one request on the runtime and report it over `tx`
///
/// Sends `Started`, then exactly one `Settled`. A closed receiver is not an
/// error; the result is simply dropped.
pub fn spawn_analysis(
    runtime: &tokio::runtime::Handle,
    client: Arc<AnalysisClient>,
    request_id: u64,
    request: AnalysisRequest,
    tx: AnalysisSender,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        let mode = request.mode;
        let _ = tx.send(AnalysisEvent::Started { request_id, mode });
        let outcome = client.send(&request).await;
        if tx
            .send(AnalysisEvent::Settled {
                request_id,
                mode,
                outcome,
            })
            .is_err()
        {
            tracing::debug!(request_id, "analysis receiver dropped");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> HttpReply {
        HttpReply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_classify_success() {
        let outcome = classify_reply(
            Mode::Assembly,
            &reply(200, r#"{"registers": {"A": 1}, "output": []}"#),
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn test_classify_error_body() {
        let outcome = classify_reply(Mode::Lexical, &reply(400, r#"{"error": "boom"}"#));
        assert_eq!(
            outcome,
            Outcome::ApplicationError {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_classify_unstructured_error_is_transport() {
        let outcome = classify_reply(Mode::Lexical, &reply(502, "<html>Bad Gateway</html>"));
        assert!(matches!(outcome, Outcome::TransportError { .. }));
    }

    #[test]
    fn test_classify_malformed_success_is_transport() {
        let outcome = classify_reply(Mode::Full, &reply(200, "not json"));
        assert!(matches!(outcome, Outcome::TransportError { .. }));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = AnalysisClient::with_transport("http://host:5000/", FakeTransport::new("{}"));
        assert_eq!(client.endpoint(), "http://host:5000/analyze");
    }
}

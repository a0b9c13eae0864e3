//! HTTP transport for the analysis client
//!
//! Async HTTP via reqwest, or a fake for tests.

pub use crate::client::transport_fake::FakeTransport;
pub use crate::client::transport_reqwest::ReqwestTransport;
pub use crate::client::transport_types::{AsyncTransport, HttpReply, TransportError};

use async_trait::async_trait;

/// Concrete transport enum
///
/// Wraps all transport types so the client needs no trait objects.
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl AsyncTransport for Transport {
    async fn post_json(&self, url: &str, body: &str) -> Result<HttpReply, TransportError> {
        match self {
            Transport::Real(t) => t.post_json(url, body).await,
            Transport::Fake(t) => t.post_json(url, body).await,
        }
    }
}

impl From<FakeTransport> for Transport {
    fn from(fake: FakeTransport) -> Self {
        Transport::Fake(fake)
    }
}

impl From<ReqwestTransport> for Transport {
    fn from(real: ReqwestTransport) -> Self {
        Transport::Real(real)
    }
}

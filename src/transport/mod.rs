//! The "send request, get status + body" seam between the clients and HTTP.

pub mod http;

pub use http::ReqwestTransport;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{Result, SeqseekError};
use crate::query::QueryParams;

/// Status line and body of a completed GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into [`SeqseekError::Transport`]
    pub fn error_for_status(self, endpoint: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SeqseekError::Transport {
                endpoint: endpoint.to_string(),
                status: self.status,
            })
        }
    }
}

/// Issues GET requests on behalf of the E-utilities and BLAST clients.
///
/// Implementations report a request that could not be sent at all as
/// [`SeqseekError::Network`] and hand back every response that did arrive,
/// whatever its status.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<HttpResponse> {
        (**self).get(url, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        assert!(HttpResponse::ok("fine").error_for_status("esearch").is_ok());
        assert!(HttpResponse::new(204, "").is_success());

        match HttpResponse::new(502, "bad gateway").error_for_status("efetch") {
            Err(SeqseekError::Transport { endpoint, status }) => {
                assert_eq!(endpoint, "efetch");
                assert_eq!(status, 502);
            }
            other => panic!("Expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_arc_forwards_to_inner() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|url, _| Ok(HttpResponse::ok(url.to_string())));

        let shared: Arc<MockTransport> = Arc::new(mock);
        let response = shared.get("https://example.org", &QueryParams::new()).await.unwrap();
        assert_eq!(response.body, "https://example.org");
    }
}

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::{HttpResponse, Transport};
use crate::core::config::HttpConfig;
use crate::error::{Result, SeqseekError};
use crate::query::QueryParams;

/// [`Transport`] backed by a shared `reqwest` client
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| SeqseekError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, params: &QueryParams) -> Result<HttpResponse> {
        let request_url = params.to_url(url)?;
        debug!(url = %request_url, "GET");

        let response = self.client.get(request_url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse::new(status, body))
    }
}

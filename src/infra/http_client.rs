use crate::app::ports::HttpClientPort;
use crate::constants::USER_AGENT;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::debug;

/// `HttpClientPort` backed by a shared `reqwest::Client`
pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RelayError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn check_status(url: &str, resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RelayError::Upstream {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Vec<u8>> {
        let mut request = self.client.get(url).timeout(timeout);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| RelayError::transport(url, e))?;
        let resp = Self::check_status(url, resp).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RelayError::transport(url, e))?;
        debug!("GET {} returned {} bytes", url, bytes.len());
        Ok(bytes.to_vec())
    }

    async fn post_json(&self, url: &str, body: Vec<u8>, timeout: Duration) -> Result<()> {
        let resp = self
            .client
            .post(url)
            .timeout(timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| RelayError::transport(url, e))?;
        Self::check_status(url, resp).await?;
        Ok(())
    }
}

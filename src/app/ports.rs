use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// HTTP access used by the fetch and push use cases.
///
/// Implementations map non-2xx responses to `RelayError::Upstream` and network
/// failures (including timeouts) to `RelayError::Transport`.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// GET `url` and return the body of a successful response
    async fn get(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Vec<u8>>;

    /// POST an already-serialized JSON body
    async fn post_json(&self, url: &str, body: Vec<u8>, timeout: Duration) -> Result<()>;
}

use crate::app::ports::HttpClientPort;
use crate::error::{RelayError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Scripted in-memory HTTP port that records every request
pub struct MockHttp {
    pub get_status: u16,
    pub get_body: Vec<u8>,
    /// Webhook status per batch number; anything not listed answers 200
    pub post_failures: Vec<(usize, u16)>,
    pub gets: Arc<Mutex<Vec<Option<String>>>>,
    pub posts: Arc<Mutex<Vec<Value>>>,
}

impl MockHttp {
    pub fn serving(body: Value) -> Self {
        Self {
            get_status: 200,
            get_body: serde_json::to_vec(&body).unwrap(),
            post_failures: Vec::new(),
            gets: Arc::new(Mutex::new(Vec::new())),
            posts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Serve `body` byte for byte
    pub fn serving_raw(body: &str) -> Self {
        let mut mock = Self::serving(Value::Null);
        mock.get_body = body.as_bytes().to_vec();
        mock
    }

    pub fn with_get_status(mut self, status: u16, body: &str) -> Self {
        self.get_status = status;
        self.get_body = body.as_bytes().to_vec();
        self
    }

    pub fn failing_batch(mut self, batch_number: usize, status: u16) -> Self {
        self.post_failures.push((batch_number, status));
        self
    }
}

#[async_trait]
impl HttpClientPort for MockHttp {
    async fn get(
        &self,
        url: &str,
        bearer_token: Option<&str>,
        _timeout: Duration,
    ) -> Result<Vec<u8>> {
        self.gets.lock().await.push(bearer_token.map(str::to_string));
        if (200..300).contains(&self.get_status) {
            Ok(self.get_body.clone())
        } else {
            Err(RelayError::Upstream {
                url: url.to_string(),
                status: self.get_status,
                body: String::from_utf8_lossy(&self.get_body).into_owned(),
            })
        }
    }

    async fn post_json(&self, url: &str, body: Vec<u8>, _timeout: Duration) -> Result<()> {
        let value: Value = serde_json::from_slice(&body)?;
        let batch_number = value["batch_number"].as_u64().unwrap_or_default() as usize;
        self.posts.lock().await.push(value);

        match self.post_failures.iter().find(|(n, _)| *n == batch_number) {
            Some((_, status)) => Err(RelayError::Upstream {
                url: url.to_string(),
                status: *status,
                body: "webhook rejected batch".to_string(),
            }),
            None => Ok(()),
        }
    }
}

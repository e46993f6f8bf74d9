use crate::app::ports::HttpClientPort;
use crate::config::RelayConfig;
use crate::constants::WEBHOOK_URL_ENV;
use crate::error::{RelayError, Result};
use crate::metrics::PushMetrics;
use crate::types::{BatchPayload, PushedBatch, Record};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument};

/// Use case for delivering batches to the webhook, one POST per batch, in order.
///
/// The first failure aborts the remaining pushes. Batches already delivered are
/// not rolled back and nothing records where the run stopped.
pub struct PushUseCase {
    http: Arc<dyn HttpClientPort>,
    webhook_url: String,
    timeout: Duration,
}

impl PushUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, config: &RelayConfig) -> Result<Self> {
        let webhook_url = config.webhook_url.clone().ok_or_else(|| {
            RelayError::Config(format!("webhook URL is not set ({})", WEBHOOK_URL_ENV))
        })?;
        Ok(Self {
            http,
            webhook_url,
            timeout: config.push_timeout,
        })
    }

    #[instrument(skip_all, fields(batches = batches.len()))]
    pub async fn push_batches(&self, batches: &[Vec<Record>]) -> Result<Vec<PushedBatch>> {
        let mut pushed = Vec::with_capacity(batches.len());

        for (index, items) in batches.iter().enumerate() {
            let batch_number = index + 1;
            let body = serde_json::to_vec(&BatchPayload {
                batch_number,
                items,
            })?;
            let body_bytes = body.len();

            let started = Instant::now();
            if let Err(e) = self
                .http
                .post_json(&self.webhook_url, body, self.timeout)
                .await
            {
                PushMetrics::record_batch_error(e.kind());
                error!(
                    batch_number,
                    remaining = batches.len() - batch_number,
                    "Push failed, aborting: {}",
                    e
                );
                return Err(e);
            }
            PushMetrics::record_batch_success(
                started.elapsed().as_secs_f64(),
                items.len(),
                body_bytes,
            );

            println!("→ pushed batch {} ({} items)", batch_number, items.len());
            info!(batch_number, items = items.len(), body_bytes, "Pushed batch");

            pushed.push(PushedBatch {
                batch_number,
                item_count: items.len(),
                body_bytes,
            });
        }

        Ok(pushed)
    }
}

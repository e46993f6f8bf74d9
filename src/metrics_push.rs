use anyhow::{anyhow, bail, Result};
use std::time::Duration;
use tracing::info;

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Push the in-process metrics snapshot to a Prometheus Pushgateway
pub async fn push_metrics(pushgateway_url: &str, instance: &str) -> Result<()> {
    let handle = crate::metrics::get_handle()
        .ok_or_else(|| anyhow!("metrics recorder is not installed"))?;
    let metrics_text = handle.render();

    let push_url = format!(
        "{}/metrics/job/batch_relay/instance/{}",
        pushgateway_url.trim_end_matches('/'),
        instance
    );

    let client = reqwest::Client::new();
    let push_response = client
        .post(&push_url)
        .header("Content-Type", "text/plain; version=0.0.4")
        .timeout(PUSH_TIMEOUT)
        .body(metrics_text)
        .send()
        .await?;

    if !push_response.status().is_success() {
        let status = push_response.status();
        let body = push_response.text().await.unwrap_or_default();
        bail!("Pushgateway returned status {}: {}", status, body);
    }

    info!("Pushed metrics to Pushgateway for instance={}", instance);
    Ok(())
}

/// Instance label for this run
pub fn instance_name() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_push_metrics_posts_snapshot() {
        crate::metrics::init_metrics();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/metrics/job/batch_relay/instance/test-host"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        push_metrics(&format!("{}/", server.uri()), "test-host")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_push_metrics_reports_gateway_errors() {
        crate::metrics::init_metrics();
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let err = push_metrics(&server.uri(), "test-host").await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}

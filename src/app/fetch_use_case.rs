use crate::app::ports::HttpClientPort;
use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::metrics::FetchMetrics;
use crate::types::{json_type_name, Record};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Use case for pulling the full record collection from the source API
pub struct FetchUseCase {
    http: Arc<dyn HttpClientPort>,
    source_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl FetchUseCase {
    pub fn new(http: Arc<dyn HttpClientPort>, config: &RelayConfig) -> Self {
        Self {
            http,
            source_url: config.source_url.clone(),
            token: config.token.clone(),
            timeout: config.fetch_timeout,
        }
    }

    /// One authenticated GET; any failure aborts the run
    #[instrument(skip(self), fields(url = %self.source_url))]
    pub async fn fetch_records(&self) -> Result<Vec<Record>> {
        let started = Instant::now();

        let result = self
            .http
            .get(&self.source_url, self.token.as_deref(), self.timeout)
            .await
            .and_then(|payload| parse_records(&payload).map(|records| (payload.len(), records)));

        match result {
            Ok((payload_bytes, records)) => {
                FetchMetrics::record_request_success(
                    started.elapsed().as_secs_f64(),
                    payload_bytes,
                    records.len(),
                );
                info!(
                    records = records.len(),
                    payload_bytes, "Fetched records from source API"
                );
                Ok(records)
            }
            Err(e) => {
                FetchMetrics::record_request_error(e.kind());
                warn!("Fetch failed: {}", e);
                Err(e)
            }
        }
    }
}

/// Decode a source body, which must be a top-level JSON array
pub fn parse_records(payload: &[u8]) -> Result<Vec<Record>> {
    match serde_json::from_slice::<Value>(payload)? {
        Value::Array(records) => Ok(records),
        other => Err(RelayError::UnexpectedShape {
            found: json_type_name(&other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::MockHttp;
    use crate::config::ConfigOverrides;
    use serde_json::json;

    fn config(token: Option<&str>) -> RelayConfig {
        RelayConfig::resolve(
            ConfigOverrides::default(),
            None,
            token.map(str::to_string),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_records_accepts_arrays_only() {
        assert_eq!(
            parse_records(br#"[{"a":1},2,"x"]"#).unwrap(),
            vec![json!({"a": 1}), json!(2), json!("x")]
        );
        assert!(parse_records(b"[]").unwrap().is_empty());

        let err = parse_records(br#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, RelayError::UnexpectedShape { found: "object" }));

        let err = parse_records(b"not json").unwrap_err();
        assert!(matches!(err, RelayError::Json(_)));
    }

    #[test]
    fn test_records_keep_key_order_and_number_text() {
        let source = r#"[{"zeta":1,"alpha":2},{"id":12345678901234567890123}]"#;
        let records = parse_records(source.as_bytes()).unwrap();

        assert_eq!(serde_json::to_string(&records).unwrap(), source);

        let body = serde_json::to_string(&crate::types::BatchPayload {
            batch_number: 1,
            items: &records,
        })
        .unwrap();
        assert_eq!(body, format!(r#"{{"batch_number":1,"items":{}}}"#, source));
    }

    #[tokio::test]
    async fn test_fetched_records_reserialize_to_source_bytes() {
        let source = r#"[{"name":"Zoë","b":[3,1,2],"a":null},{"ratio":0.10,"big":-98765432109876543210}]"#;
        let http = Arc::new(MockHttp::serving_raw(source));
        let use_case = FetchUseCase::new(http, &config(Some("abc")));

        let records = use_case.fetch_records().await.unwrap();
        assert_eq!(serde_json::to_string(&records).unwrap(), source);
    }

    #[tokio::test]
    async fn test_fetch_sends_token_and_returns_records() {
        let http = Arc::new(MockHttp::serving(json!([{"id": 1}, {"id": 2}])));
        let gets = http.gets.clone();
        let use_case = FetchUseCase::new(http, &config(Some("abc")));

        let records = use_case.fetch_records().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(*gets.lock().await, vec![Some("abc".to_string())]);
    }

    #[tokio::test]
    async fn test_fetch_without_token_surfaces_upstream_rejection() {
        let http =
            Arc::new(MockHttp::serving(json!([])).with_get_status(401, "missing credentials"));
        let gets = http.gets.clone();
        let use_case = FetchUseCase::new(http, &config(None));

        let err = use_case.fetch_records().await.unwrap_err();
        match err {
            RelayError::Upstream { status, body, .. } => {
                assert_eq!(status, 401);
                assert_eq!(body, "missing credentials");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(*gets.lock().await, vec![None]);
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_array_payload() {
        let http = Arc::new(MockHttp::serving(json!({"data": [1, 2]})));
        let use_case = FetchUseCase::new(http, &config(Some("abc")));

        let err = use_case.fetch_records().await.unwrap_err();
        assert!(matches!(err, RelayError::UnexpectedShape { found: "object" }));
    }
}

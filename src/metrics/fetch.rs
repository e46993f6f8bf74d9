//! Fetch phase metrics
//!
//! Health and size of the single GET against the source API.

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct FetchMetrics;

impl FetchMetrics {
    pub fn record_request_success(duration_secs: f64, payload_bytes: usize, records: usize) {
        ::metrics::counter!(phase_metric!(counter, "fetch", "requests_success")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "fetch", "request_duration_seconds"))
            .record(duration_secs);
        ::metrics::histogram!(phase_metric!(histogram, "fetch", "payload_bytes"))
            .record(payload_bytes as f64);
        ::metrics::counter!(phase_metric!(counter, "fetch", "records"))
            .increment(records as u64);
    }

    pub fn record_request_error(error_kind: &'static str) {
        ::metrics::counter!(
            phase_metric!(counter, "fetch", "requests_error"),
            "error_kind" => error_kind
        )
        .increment(1);
    }
}

impl PhaseMetrics for FetchMetrics {
    fn register_metrics() {
        use metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "fetch", "requests_success"));
        let _ = counter!(phase_metric!(counter, "fetch", "requests_error"));
        let _ = counter!(phase_metric!(counter, "fetch", "records"));
        let _ = histogram!(phase_metric!(histogram, "fetch", "request_duration_seconds"));
        let _ = histogram!(phase_metric!(histogram, "fetch", "payload_bytes"));
    }

    fn phase_name() -> &'static str {
        "fetch"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "fetch", "requests_success"),
                metric_type: MetricType::Counter,
                help: "Successful GET requests to the source API",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "fetch", "requests_error"),
                metric_type: MetricType::Counter,
                help: "Failed GET requests to the source API",
                labels: vec!["error_kind"],
            },
            MetricDoc {
                name: phase_metric!(counter, "fetch", "records"),
                metric_type: MetricType::Counter,
                help: "Records received from the source API",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "fetch", "request_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Duration of the source GET in seconds",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "fetch", "payload_bytes"),
                metric_type: MetricType::Histogram,
                help: "Size of the source response body in bytes",
                labels: vec![],
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_metrics_registration() {
        FetchMetrics::register_metrics();
        FetchMetrics::record_request_success(0.25, 1024, 3);
        FetchMetrics::record_request_error("upstream");
    }

    #[test]
    fn test_metrics_documentation() {
        let docs = FetchMetrics::metrics_documentation();
        assert_eq!(docs.len(), 5);
        for doc in docs {
            assert!(doc.name.starts_with("relay_fetch_"));
        }
    }
}

//! Push phase metrics

use crate::metrics::{phase_metric, MetricDoc, MetricType, PhaseMetrics};

pub struct PushMetrics;

impl PushMetrics {
    pub fn record_batch_success(duration_secs: f64, items: usize, body_bytes: usize) {
        ::metrics::counter!(phase_metric!(counter, "push", "batches_success")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "push", "request_duration_seconds"))
            .record(duration_secs);
        ::metrics::histogram!(phase_metric!(histogram, "push", "batch_items"))
            .record(items as f64);
        ::metrics::histogram!(phase_metric!(histogram, "push", "batch_bytes"))
            .record(body_bytes as f64);
    }

    pub fn record_batch_error(error_kind: &'static str) {
        ::metrics::counter!(
            phase_metric!(counter, "push", "batches_error"),
            "error_kind" => error_kind
        )
        .increment(1);
    }
}

impl PhaseMetrics for PushMetrics {
    fn register_metrics() {
        use metrics::{counter, histogram};

        let _ = counter!(phase_metric!(counter, "push", "batches_success"));
        let _ = counter!(phase_metric!(counter, "push", "batches_error"));
        let _ = histogram!(phase_metric!(histogram, "push", "request_duration_seconds"));
        let _ = histogram!(phase_metric!(histogram, "push", "batch_items"));
        let _ = histogram!(phase_metric!(histogram, "push", "batch_bytes"));
    }

    fn phase_name() -> &'static str {
        "push"
    }

    fn metrics_documentation() -> Vec<MetricDoc> {
        vec![
            MetricDoc {
                name: phase_metric!(counter, "push", "batches_success"),
                metric_type: MetricType::Counter,
                help: "Batches accepted by the webhook",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(counter, "push", "batches_error"),
                metric_type: MetricType::Counter,
                help: "Batches rejected by the webhook or lost in transport",
                labels: vec!["error_kind"],
            },
            MetricDoc {
                name: phase_metric!(histogram, "push", "request_duration_seconds"),
                metric_type: MetricType::Histogram,
                help: "Duration of each webhook POST in seconds",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "push", "batch_items"),
                metric_type: MetricType::Histogram,
                help: "Items per pushed batch",
                labels: vec![],
            },
            MetricDoc {
                name: phase_metric!(histogram, "push", "batch_bytes"),
                metric_type: MetricType::Histogram,
                help: "Request body size per pushed batch in bytes",
                labels: vec![],
            },
        ]
    }
}

//! Registers every phase's metrics and flags naming conflicts early.

use crate::metrics::{MetricDoc, PhaseMetrics};
use std::collections::HashMap;
use tracing::{debug, warn};

pub fn register_all_metrics() {
    let mut all_metrics = HashMap::new();

    register_phase_metrics::<super::fetch::FetchMetrics>(&mut all_metrics);
    register_phase_metrics::<super::push::PushMetrics>(&mut all_metrics);

    debug!(
        "Registered {} total metrics across all phases",
        all_metrics.len()
    );
}

fn register_phase_metrics<T: PhaseMetrics>(all_metrics: &mut HashMap<String, MetricDoc>) {
    T::register_metrics();
    let phase_name = T::phase_name();

    for doc in T::metrics_documentation() {
        let doc_phase = extract_phase_from_metric_name(doc.name);
        if doc_phase != phase_name {
            warn!(
                "Metric '{}' is registered by phase '{}' but named for phase '{}'",
                doc.name, phase_name, doc_phase
            );
        }
        if all_metrics.contains_key(doc.name) {
            warn!(
                "Metric name conflict detected: '{}' registered twice (phase '{}')",
                doc.name, phase_name
            );
        } else {
            all_metrics.insert(doc.name.to_string(), doc);
        }
    }
}

/// Extract phase name from metric name (e.g., "relay_push_batches_success_total" -> "push")
fn extract_phase_from_metric_name(metric_name: &str) -> &str {
    if let Some(stripped) = metric_name.strip_prefix("relay_") {
        if let Some(next_underscore) = stripped.find('_') {
            return &stripped[..next_underscore];
        }
    }
    "unknown"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_phase_from_metric_name() {
        assert_eq!(
            extract_phase_from_metric_name("relay_push_batches_success_total"),
            "push"
        );
        assert_eq!(
            extract_phase_from_metric_name("relay_fetch_payload_bytes"),
            "fetch"
        );
        assert_eq!(
            extract_phase_from_metric_name("invalid_metric_name"),
            "unknown"
        );
    }

    #[test]
    fn test_phase_names_are_unique() {
        let mut names: Vec<&str> = super::super::FetchMetrics::metrics_documentation()
            .into_iter()
            .chain(super::super::PushMetrics::metrics_documentation())
            .map(|d| d.name)
            .collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}

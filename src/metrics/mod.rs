//! Metrics for the relay pipeline
//!
//! Each pipeline phase (fetch, push) defines its own metrics in a dedicated
//! submodule. The recorder is in-process only; short-lived runs hand the rendered
//! snapshot to a Pushgateway (see `metrics_push`).

pub mod fetch;
pub mod push;
pub mod registry;

pub use fetch::FetchMetrics;
pub use push::PushMetrics;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{debug, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and register all phase metrics. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Metrics handle was already set");
            }
            registry::register_all_metrics();
            debug!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
}

/// Handle for rendering the current snapshot, if the recorder is installed
pub fn get_handle() -> Option<&'static PrometheusHandle> {
    HANDLE.get()
}

/// Trait for phase-specific metrics collections
pub trait PhaseMetrics {
    /// Pre-register every metric so it shows up in a snapshot before first use
    fn register_metrics();

    fn phase_name() -> &'static str;

    fn metrics_documentation() -> Vec<MetricDoc>;
}

/// Documentation for a single metric
#[derive(Debug, Clone)]
pub struct MetricDoc {
    pub name: &'static str,
    pub metric_type: MetricType,
    pub help: &'static str,
    #[allow(dead_code)]
    pub labels: Vec<&'static str>,
}

#[derive(Debug, Clone)]
pub enum MetricType {
    Counter,
    Histogram,
}

/// Builds metric names as relay_{phase}_{name}, with a _total suffix for counters
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("relay_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("relay_", $phase, "_", $name)
    };
}

pub(crate) use phase_metric;

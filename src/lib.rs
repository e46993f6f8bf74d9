pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod metrics;
pub mod metrics_push;
pub mod pipeline;
pub mod types;

pub use error::{RelayError, Result};

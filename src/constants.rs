/// Endpoint and environment constants shared by the CLI and the relay pipeline.

// Source API
pub const DEFAULT_SOURCE_URL: &str =
    "https://qservices.pegasusgateway.com/installations/api/v1/installation";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

// Destination webhook
pub const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_BATCH_BYTES: usize = 5 * 1024 * 1024;

// Environment variable names
pub const TOKEN_ENV: &str = "PEGASUS_TOKEN";
pub const WEBHOOK_URL_ENV: &str = "ZAPIER_HOOK_URL";
pub const SOURCE_URL_ENV: &str = "RELAY_SOURCE_URL";
pub const MAX_BATCH_BYTES_ENV: &str = "RELAY_MAX_BATCH_BYTES";
pub const FETCH_TIMEOUT_ENV: &str = "RELAY_FETCH_TIMEOUT_SECS";
pub const PUSH_TIMEOUT_ENV: &str = "RELAY_PUSH_TIMEOUT_SECS";
pub const PUSHGATEWAY_URL_ENV: &str = "RELAY_PUSHGATEWAY_URL";

pub const USER_AGENT: &str = concat!("batch_relay/", env!("CARGO_PKG_VERSION"));

/// Directory and file prefix for the rolling JSON log
pub const LOG_DIR: &str = "logs";
pub const LOG_FILE_PREFIX: &str = "relay.log";

use crate::constants::{
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_BATCH_BYTES, DEFAULT_PUSH_TIMEOUT_SECS,
    DEFAULT_SOURCE_URL, FETCH_TIMEOUT_ENV, MAX_BATCH_BYTES_ENV, PUSH_TIMEOUT_ENV, SOURCE_URL_ENV,
    WEBHOOK_URL_ENV,
};
use crate::error::{RelayError, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

/// Settings that may come from flags or the environment. Unset values fall back to the
/// config file, then to built-in defaults.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigOverrides {
    /// Source API URL to fetch the collection from
    #[arg(long, env = SOURCE_URL_ENV)]
    pub source_url: Option<String>,

    /// Webhook URL that receives the batches. Required unless --dry-run; a missing
    /// URL is rejected at startup, before the source is fetched
    #[arg(long, env = WEBHOOK_URL_ENV)]
    pub webhook_url: Option<String>,

    /// Upper bound for the serialized item list of one batch, in bytes
    #[arg(long, env = MAX_BATCH_BYTES_ENV)]
    pub max_batch_bytes: Option<usize>,

    /// Timeout for the source GET, in seconds
    #[arg(long, env = FETCH_TIMEOUT_ENV)]
    pub fetch_timeout_secs: Option<u64>,

    /// Timeout for each webhook POST, in seconds
    #[arg(long, env = PUSH_TIMEOUT_ENV)]
    pub push_timeout_secs: Option<u64>,
}

/// Optional TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub source: SourceSection,
    #[serde(default)]
    pub webhook: WebhookSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSection {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_batch_bytes: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FileConfig = toml::from_str(content)?;
        Ok(config)
    }
}

/// Fully resolved, immutable configuration for one run
#[derive(Clone)]
pub struct RelayConfig {
    pub source_url: String,
    pub token: Option<String>,
    pub webhook_url: Option<String>,
    pub max_batch_bytes: usize,
    pub fetch_timeout: Duration,
    pub push_timeout: Duration,
}

impl RelayConfig {
    /// Merge flags/env over the file over defaults and validate the result.
    ///
    /// `require_webhook` is false for dry runs, which never POST.
    pub fn resolve(
        overrides: ConfigOverrides,
        file: Option<FileConfig>,
        token: Option<String>,
        require_webhook: bool,
    ) -> Result<Self> {
        let file = file.unwrap_or_default();

        let source_url = non_empty(overrides.source_url)
            .or(non_empty(file.source.url))
            .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string());
        let webhook_url = non_empty(overrides.webhook_url).or(non_empty(file.webhook.url));
        let max_batch_bytes = overrides
            .max_batch_bytes
            .or(file.webhook.max_batch_bytes)
            .unwrap_or(DEFAULT_MAX_BATCH_BYTES);
        let fetch_timeout_secs = overrides
            .fetch_timeout_secs
            .or(file.source.timeout_seconds)
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS);
        let push_timeout_secs = overrides
            .push_timeout_secs
            .or(file.webhook.timeout_seconds)
            .unwrap_or(DEFAULT_PUSH_TIMEOUT_SECS);

        validate_url("source", &source_url)?;
        match &webhook_url {
            Some(url) => validate_url("webhook", url)?,
            None if require_webhook => {
                return Err(RelayError::Config(format!(
                    "webhook URL is not set (use --webhook-url or {})",
                    WEBHOOK_URL_ENV
                )))
            }
            None => {}
        }
        if max_batch_bytes == 0 {
            return Err(RelayError::Config("max batch bytes must be greater than zero".into()));
        }
        if fetch_timeout_secs == 0 || push_timeout_secs == 0 {
            return Err(RelayError::Config("timeouts must be greater than zero seconds".into()));
        }

        let token = non_empty(token);
        if token.is_none() {
            warn!("No source API token configured; the fetch will be sent without credentials");
        }

        Ok(Self {
            source_url,
            token,
            webhook_url,
            max_batch_bytes,
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
            push_timeout: Duration::from_secs(push_timeout_secs),
        })
    }
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("source_url", &self.source_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("webhook_url", &self.webhook_url)
            .field("max_batch_bytes", &self.max_batch_bytes)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("push_timeout", &self.push_timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(which: &str, url: &str) -> Result<()> {
    reqwest::Url::parse(url)
        .map(|_| ())
        .map_err(|e| RelayError::Config(format!("invalid {} URL '{}': {}", which, url, e)))
}

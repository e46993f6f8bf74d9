use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("upstream {url} returned HTTP {status}: {body}")]
    Upstream {
        url: String,
        status: u16,
        body: String,
    },

    #[error("HTTP request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array from the source API, got {found}")]
    UnexpectedShape { found: &'static str },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RelayError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        RelayError::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Short label used for error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Upstream { .. } => "upstream",
            RelayError::Transport { .. } => "transport",
            RelayError::Json(_) => "json",
            RelayError::UnexpectedShape { .. } => "unexpected_shape",
            RelayError::Toml(_) => "toml",
            RelayError::Io(_) => "io",
            RelayError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

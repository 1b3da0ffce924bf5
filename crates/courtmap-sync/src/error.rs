use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejected fetch configuration. Checked once, before any request is made.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("COURTLISTENER_API_KEY is not set")]
    MissingApiKey,
    #[error("base URL must start with http:// or https://, got `{0}`")]
    InvalidBaseUrl(String),
    #[error("page size must be between 1 and 100, got {0}")]
    InvalidPageSize(u32),
}

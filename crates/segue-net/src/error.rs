use thiserror::Error;

pub type NetResult<T> = Result<T, NetError>;

/// Centralized error type for segue-net loaders.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP {status} for URL: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request failed after {max_retries} retries: {source}")]
    RetryExhausted {
        max_retries: u32,
        source: Box<NetError>,
    },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Unsupported URL: {0}")]
    UnsupportedUrl(String),
}

impl NetError {
    /// Whether a retry of the same request has a chance of succeeding.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout => true,
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            Self::Http(msg) => {
                msg.contains("timeout") || msg.contains("connection") || msg.contains("network")
            }
            Self::RetryExhausted { .. } | Self::Io { .. } | Self::UnsupportedUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for NetError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return Self::Timeout;
        }
        // Alternate formatting includes the full error chain
        // (e.g. "error sending request … : connection refused").
        Self::Http(format!("{e:#}"))
    }
}

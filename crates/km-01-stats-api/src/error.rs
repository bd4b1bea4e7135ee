//! Error types for Stats API access

use thiserror::Error;

/// Errors that can occur when talking to the Stats API.
#[derive(Debug, Error)]
pub enum StatsApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl StatsApiError {
    /// Worth another attempt: timeouts, dropped connections, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            StatsApiError::Timeout(_) | StatsApiError::Connection(_) => true,
            StatsApiError::Status { status, .. } => *status == 429 || *status >= 500,
            StatsApiError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

//! Analysis client error types.

use thiserror::Error;

pub type AiClientResult<T> = Result<T, AiClientError>;

#[derive(Debug, Error)]
pub enum AiClientError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AiClientError {
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiClientError::ServiceUnavailable(_) | AiClientError::Network(_)
        )
    }

    /// Check whether the error looks like a rate-limit rejection.
    ///
    /// The service does not use a dedicated error code for this, so the
    /// message text is pattern-matched the same way permanent failures are
    /// classified elsewhere.
    pub fn is_rate_limited(&self) -> bool {
        let msg = self.to_string().to_lowercase();
        msg.contains("rate limit")
            || msg.contains("too many requests")
            || msg.contains("usage_limit")
            || msg.contains("429")
    }
}

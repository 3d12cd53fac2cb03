//! Pipeline error types.
//!
//! Errors here are infrastructure failures: the pipeline could not judge
//! the content. Content judgments (missing metadata, off-campaign posts,
//! milk not detected) are quarantine outcomes, not errors.

use thiserror::Error;

use milkmob_ai_client::AiClientError;
use milkmob_metadata::MetadataError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),

    #[error("Indexing timed out after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("AI analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Service error: {0}")]
    Client(#[from] AiClientError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::UploadFailed(msg.into())
    }

    pub fn processing_failed(msg: impl Into<String>) -> Self {
        Self::ProcessingFailed(msg.into())
    }

    pub fn analysis_failed(msg: impl Into<String>) -> Self {
        Self::AnalysisFailed(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Check whether the failure looks like a service rate limit.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            PipelineError::Client(e) => e.is_rate_limited(),
            other => {
                let msg = other.to_string().to_lowercase();
                msg.contains("rate limit") || msg.contains("too many requests") || msg.contains("429")
            }
        }
    }

    /// Message shown to the user when a submission is abandoned.
    pub fn user_message(&self) -> String {
        if self.is_rate_limited() {
            "The analysis service is rate-limiting requests right now. Wait a minute and try again."
                .to_string()
        } else {
            format!("Could not process this video: {}", self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_detection_from_wrapped_client_error() {
        let err = PipelineError::Client(AiClientError::RequestFailed(
            "service returned 429: Too Many Requests".into(),
        ));
        assert!(err.is_rate_limited());
        assert!(err.user_message().contains("rate-limiting"));
    }

    #[test]
    fn test_rate_limit_detection_from_message_text() {
        let err = PipelineError::UploadFailed("rate limit exceeded for index".into());
        assert!(err.is_rate_limited());

        let err = PipelineError::Timeout { attempts: 24 };
        assert!(!err.is_rate_limited());
        assert!(err.user_message().contains("timed out"));
    }
}

//! Error types for oracle operations

use thiserror::Error;

/// Result type for oracle operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when calling the scoring oracle
#[derive(Error, Debug)]
pub enum LlmError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Response contained no generated text
    #[error("Empty response from model")]
    EmptyResponse,

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[cfg(feature = "gemini")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl LlmError {
    /// Whether a retry has any chance of succeeding.
    ///
    /// Timeouts, rate limits, and malformed or empty bodies are transient;
    /// authentication, request-shape, and configuration failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(_)
            | Self::RateLimitExceeded(_)
            | Self::EmptyResponse
            | Self::UnexpectedResponse(_) => true,
            #[cfg(feature = "gemini")]
            Self::HttpError(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(LlmError::RequestFailed("timeout".to_string()).is_transient());
        assert!(LlmError::RateLimitExceeded("429".to_string()).is_transient());
        assert!(LlmError::EmptyResponse.is_transient());
        assert!(LlmError::UnexpectedResponse("bad json".to_string()).is_transient());

        assert!(!LlmError::AuthenticationFailed.is_transient());
        assert!(!LlmError::InvalidRequest("bad".to_string()).is_transient());
        assert!(!LlmError::ModelNotFound("nope".to_string()).is_transient());
        assert!(!LlmError::ConfigurationError("no key".to_string()).is_transient());
    }
}

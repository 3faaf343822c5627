//! Error types for the sentiment pipeline

use thiserror::Error;

/// Sentiment pipeline errors
///
/// Only `ConfigError`, `InvalidTicker`, and `NoData` are meant to reach the
/// caller as distinguishable outcomes. Per-headline oracle failures are
/// absorbed inside the analyzer (degraded to a default score) and
/// per-source scrape failures are absorbed inside the scraper.
#[derive(Debug, Error)]
pub enum SentimentError {
    /// Configuration error (missing credential, invalid setting)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Empty or blank ticker input
    #[error("Invalid ticker: {0:?}")]
    InvalidTicker(String),

    /// Scraper found zero headlines across all sources
    #[error("No news found for {ticker}")]
    NoData {
        ticker: String,
    },

    /// A single news source failed (absorbed inside the scraper)
    #[error("News source error: {0}")]
    SourceError(String),

    /// Feed body could not be parsed
    #[error("Feed parse error: {0}")]
    FeedError(String),

    /// Oracle error that escaped per-headline handling
    #[error("Oracle error: {0}")]
    Oracle(#[from] mood_llm::LlmError),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Report/export I/O error
    #[error("Export error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for sentiment operations
pub type Result<T> = std::result::Result<T, SentimentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SentimentError::InvalidTicker("".to_string());
        assert_eq!(err.to_string(), "Invalid ticker: \"\"");

        let err = SentimentError::NoData {
            ticker: "AAPL".to_string(),
        };
        assert_eq!(err.to_string(), "No news found for AAPL");

        let err = SentimentError::ConfigError("GEMINI_API_KEY not configured".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: GEMINI_API_KEY not configured"
        );
    }

    #[test]
    fn test_oracle_error_conversion() {
        let llm_err = mood_llm::LlmError::AuthenticationFailed;
        let err: SentimentError = llm_err.into();

        match err {
            SentimentError::Oracle(inner) => {
                assert!(!inner.is_transient());
            }
            _ => panic!("Expected Oracle variant"),
        }
    }
}

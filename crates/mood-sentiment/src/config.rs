//! Configuration for sentiment pipeline runs

use crate::error::{Result, SentimentError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one pipeline's scraper, analyzer, and reporter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentConfig {
    /// Gemini API key for the scoring oracle
    pub gemini_api_key: Option<String>,

    /// Oracle model identifier
    pub model: String,

    /// Maximum headlines analyzed per run
    pub max_headlines: usize,

    /// Maximum number of attempts per oracle call (including the first)
    pub max_retries: u32,

    /// Initial backoff duration for retries
    pub retry_backoff_base: Duration,

    /// Request timeout for news source fetches
    pub request_timeout: Duration,

    /// Maximum oracle calls in flight at once
    pub max_concurrency: usize,

    /// Oracle request pacing (requests per minute)
    pub oracle_rate_limit: u32,

    /// Sampling temperature for the oracle
    pub temperature: f32,

    /// Max tokens per oracle response
    pub max_tokens: usize,

    /// Directory for CSV exports
    pub data_dir: PathBuf,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: "gemini-2.0-flash".to_string(),
            max_headlines: 20,
            max_retries: 3,
            retry_backoff_base: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            max_concurrency: 4,
            oracle_rate_limit: 60,
            temperature: 0.2,
            max_tokens: 256,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl SentimentConfig {
    /// Create a new configuration builder
    pub fn builder() -> SentimentConfigBuilder {
        SentimentConfigBuilder::default()
    }

    /// Load the Gemini API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(SentimentError::ConfigError(
                "max_retries must be greater than 0".to_string(),
            ));
        }

        if self.max_concurrency == 0 {
            return Err(SentimentError::ConfigError(
                "max_concurrency must be greater than 0".to_string(),
            ));
        }

        if self.max_headlines == 0 {
            return Err(SentimentError::ConfigError(
                "max_headlines must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get retry backoff duration for attempt number
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        self.retry_backoff_base * 2_u32.pow(attempt)
    }
}

/// Builder for SentimentConfig
#[derive(Debug, Default)]
pub struct SentimentConfigBuilder {
    gemini_api_key: Option<String>,
    model: Option<String>,
    max_headlines: Option<usize>,
    max_retries: Option<u32>,
    retry_backoff_base: Option<Duration>,
    request_timeout: Option<Duration>,
    max_concurrency: Option<usize>,
    oracle_rate_limit: Option<u32>,
    temperature: Option<f32>,
    max_tokens: Option<usize>,
    data_dir: Option<PathBuf>,
}

impl SentimentConfigBuilder {
    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    /// Load the Gemini API key from the environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        self
    }

    /// Set the oracle model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the per-run headline cap
    pub fn max_headlines(mut self, max_headlines: usize) -> Self {
        self.max_headlines = Some(max_headlines);
        self
    }

    /// Set maximum oracle attempts
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set retry backoff base duration
    pub fn retry_backoff_base(mut self, duration: Duration) -> Self {
        self.retry_backoff_base = Some(duration);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the oracle concurrency cap
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = Some(max_concurrency);
        self
    }

    /// Set oracle request pacing (requests per minute)
    pub fn oracle_rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.oracle_rate_limit = Some(requests_per_minute);
        self
    }

    /// Set the oracle sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the oracle response token cap
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the CSV export directory
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SentimentConfig> {
        let defaults = SentimentConfig::default();

        let config = SentimentConfig {
            gemini_api_key: self.gemini_api_key,
            model: self.model.unwrap_or(defaults.model),
            max_headlines: self.max_headlines.unwrap_or(defaults.max_headlines),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            retry_backoff_base: self.retry_backoff_base.unwrap_or(defaults.retry_backoff_base),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_concurrency: self.max_concurrency.unwrap_or(defaults.max_concurrency),
            oracle_rate_limit: self.oracle_rate_limit.unwrap_or(defaults.oracle_rate_limit),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
        };

        config.validate()?;
        Ok(config)
    }
}

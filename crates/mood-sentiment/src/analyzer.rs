//! Headline sentiment scoring via the oracle
//!
//! The analyzer assigns a sentiment score and short rationale to every
//! headline. The oracle is unreliable and unstructured, so every call runs
//! behind a retry policy and every response goes through defensive parsing;
//! a headline whose call fails permanently degrades to the 0.0 default
//! without affecting the rest of the batch.

use crate::config::SentimentConfig;
use crate::error::{Result, SentimentError};
use crate::prompts::{SYSTEM_PROMPT, scoring_prompt};
use crate::score::{PARSE_FAILURE_MARKER, parse_score};
use crate::types::{AnalyzedHeadline, Headline};
use futures::stream::{self, StreamExt};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use mood_llm::providers::GeminiProvider;
use mood_llm::{CompletionRequest, LlmProvider, Message, RetryPolicy};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const DEFAULT_ORACLE_RPM: NonZeroU32 = NonZeroU32::new(60).unwrap();

/// Terminal state of one headline's scoring attempt
///
/// A headline is pending until its retries are exhausted or a response
/// parses; it then lands in exactly one of these states.
#[derive(Debug, Clone, PartialEq)]
enum ScoreOutcome {
    /// The oracle produced an extractable score
    Scored { sentiment: f64, reasoning: String },
    /// All attempts failed or nothing was extractable; 0.0 stands in
    Defaulted { reason: String },
}

/// Analyzer that enriches headlines with sentiment scores
pub struct SentimentAnalyzer {
    provider: Arc<dyn LlmProvider>,
    model: String,
    max_tokens: usize,
    temperature: f32,
    max_concurrency: usize,
    retry: RetryPolicy,
    rate_limiter: SharedRateLimiter,
}

impl SentimentAnalyzer {
    /// Create an analyzer backed by the Gemini oracle
    ///
    /// Fails fast with a configuration error when no API key is
    /// configured, so a pipeline never runs silently without scoring.
    pub fn new(config: &SentimentConfig) -> Result<Self> {
        let api_key = config.gemini_api_key.clone().ok_or_else(|| {
            SentimentError::ConfigError(
                "GEMINI_API_KEY not configured; set it in the environment or a .env file"
                    .to_string(),
            )
        })?;

        let provider = Arc::new(GeminiProvider::new(api_key)?);
        Ok(Self::with_provider(provider, config))
    }

    /// Create an analyzer over an explicit provider (used by tests)
    pub fn with_provider(provider: Arc<dyn LlmProvider>, config: &SentimentConfig) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(config.oracle_rate_limit).unwrap_or(DEFAULT_ORACLE_RPM),
        );
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        let retry = RetryPolicy::new(
            config.max_retries,
            config.retry_backoff_base,
            Duration::from_secs(10),
            2.0,
        );

        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_concurrency: config.max_concurrency,
            retry,
            rate_limiter,
        }
    }

    /// Score every headline, returning new enriched records
    ///
    /// The result has the same length and index order as the input
    /// regardless of how individual oracle calls interleave; callers zip
    /// results positionally. Input records are never mutated. An empty
    /// input returns immediately with no oracle calls.
    pub async fn analyze_headlines(&self, headlines: &[Headline]) -> Vec<AnalyzedHeadline> {
        if headlines.is_empty() {
            return Vec::new();
        }

        debug!(count = headlines.len(), "analyzing headlines");

        // `buffered` caps in-flight calls and yields in input order, so
        // completion order cannot reorder the batch.
        stream::iter(headlines.iter().cloned().map(|h| self.analyze_one(h)))
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    async fn analyze_one(&self, headline: Headline) -> AnalyzedHeadline {
        self.rate_limiter.until_ready().await;

        match self.score_headline(&headline).await {
            ScoreOutcome::Scored {
                sentiment,
                reasoning,
            } => AnalyzedHeadline {
                headline,
                sentiment,
                reasoning,
                scored: true,
            },
            ScoreOutcome::Defaulted { reason } => AnalyzedHeadline {
                headline,
                sentiment: 0.0,
                reasoning: reason,
                scored: false,
            },
        }
    }

    async fn score_headline(&self, headline: &Headline) -> ScoreOutcome {
        let request = CompletionRequest::builder(self.model.clone())
            .system(SYSTEM_PROMPT)
            .add_message(Message::user(scoring_prompt(headline)))
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build();

        let result = self
            .retry
            .execute("score_headline", || {
                let request = request.clone();
                async move { self.provider.complete(request).await }
            })
            .await;

        match result {
            Ok(response) => match parse_score(response.text()) {
                Ok(parsed) => ScoreOutcome::Scored {
                    sentiment: parsed.sentiment,
                    reasoning: parsed.reasoning,
                },
                Err(e) => {
                    warn!(title = %headline.title, "unparseable oracle response: {e}");
                    ScoreOutcome::Defaulted {
                        reason: PARSE_FAILURE_MARKER.to_string(),
                    }
                }
            },
            Err(e) => {
                warn!(title = %headline.title, "oracle call failed permanently: {e}");
                ScoreOutcome::Defaulted {
                    reason: format!("oracle call failed: {e}"),
                }
            }
        }
    }
}

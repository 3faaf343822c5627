//! News scraping for ticker headlines
//!
//! Each source implements [`NewsSource`]; the [`NewsScraper`] queries every
//! configured source in order, absorbs per-source failures, and de-duplicates
//! titles while preserving first-seen order.

pub mod google_news;
pub mod yahoo;

use crate::config::SentimentConfig;
use crate::error::{Result, SentimentError};
use crate::types::{Headline, Ticker};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::collections::HashSet;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, warn};

pub use google_news::GoogleNewsSource;
pub use yahoo::YahooFinanceSource;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// A single external headline source
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Source name, for logging and diagnostics
    fn name(&self) -> &str;

    /// Fetch up to `limit` headlines for a ticker
    async fn fetch(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Headline>>;
}

/// Shared HTTP client for news source fetches
pub fn default_http_client(timeout: std::time::Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (compatible; tickermood/0.1)")
        .timeout(timeout)
        .build()
        .map_err(Into::into)
}

/// Scraper that turns a ticker into a deduplicated, ordered headline list
pub struct NewsScraper {
    sources: Vec<Box<dyn NewsSource>>,
    rate_limiter: SharedRateLimiter,
    max_headlines: usize,
}

impl NewsScraper {
    /// Create a scraper with the default sources (Google News, Yahoo Finance)
    pub fn new(config: &SentimentConfig) -> Result<Self> {
        let client = default_http_client(config.request_timeout)?;

        let sources: Vec<Box<dyn NewsSource>> = vec![
            Box::new(GoogleNewsSource::new(client.clone())),
            Box::new(YahooFinanceSource::new(client)),
        ];

        Ok(Self::with_sources(sources, config))
    }

    /// Create a scraper over explicit sources (used by tests)
    pub fn with_sources(sources: Vec<Box<dyn NewsSource>>, config: &SentimentConfig) -> Self {
        // One outbound source request per second keeps the public feeds happy
        let quota = Quota::per_second(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Self {
            sources,
            rate_limiter,
            max_headlines: config.max_headlines,
        }
    }

    /// Fetch recent headlines for a ticker
    ///
    /// A failing source is logged and contributes zero headlines; the run
    /// degrades to whatever the other sources yielded. Exact-duplicate
    /// titles are removed, keeping the first-seen occurrence, so the result
    /// order matches source order. An empty result means "no news found"
    /// and is a routine outcome, not an error.
    pub async fn fetch_news(&self, ticker: &Ticker) -> Vec<Headline> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut headlines = Vec::new();

        for source in &self.sources {
            self.rate_limiter.until_ready().await;

            match source.fetch(ticker, self.max_headlines).await {
                Ok(fetched) => {
                    debug!(
                        source = source.name(),
                        count = fetched.len(),
                        "fetched headlines"
                    );
                    for headline in fetched {
                        if headline.title.trim().is_empty() {
                            continue;
                        }
                        if seen.insert(headline.title.clone()) {
                            headlines.push(headline);
                        }
                    }
                }
                Err(e) => {
                    warn!(source = source.name(), ticker = %ticker, "news source failed: {e}");
                }
            }
        }

        headlines.truncate(self.max_headlines);
        headlines
    }
}

/// Map an HTTP error status into a source error
pub(crate) fn status_error(source: &str, status: reqwest::StatusCode) -> SentimentError {
    SentimentError::SourceError(format!("{source} returned HTTP {status}"))
}

//! One-ticker pipeline: scrape, analyze, aggregate

use crate::analyzer::SentimentAnalyzer;
use crate::config::SentimentConfig;
use crate::error::{Result, SentimentError};
use crate::scraper::NewsScraper;
use crate::stats::SentimentStats;
use crate::types::{SentimentReport, Ticker};
use chrono::Utc;
use tracing::info;

/// Pipeline composing the scraper and analyzer for one run per ticker
///
/// Components are constructed once and hold no mutable cross-request state,
/// so a pipeline value is safe to reuse across runs. Abandoning a run
/// (dropping its future) abandons its in-flight calls with it.
pub struct SentimentPipeline {
    scraper: NewsScraper,
    analyzer: SentimentAnalyzer,
}

impl SentimentPipeline {
    /// Build a pipeline from configuration
    ///
    /// Fails fast on invalid configuration or a missing oracle credential,
    /// before any network call happens.
    pub fn new(config: &SentimentConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            scraper: NewsScraper::new(config)?,
            analyzer: SentimentAnalyzer::new(config)?,
        })
    }

    /// Build a pipeline over explicit components (used by tests)
    pub fn with_components(scraper: NewsScraper, analyzer: SentimentAnalyzer) -> Self {
        Self { scraper, analyzer }
    }

    /// Run the pipeline for one ticker
    ///
    /// Returns `NoData` when no source yielded a headline; per-headline
    /// oracle failures never surface here, they degrade to default scores
    /// inside the analyzer.
    pub async fn run(&self, raw_ticker: &str) -> Result<SentimentReport> {
        let ticker = Ticker::new(raw_ticker)?;

        info!(ticker = %ticker, "fetching news");
        let headlines = self.scraper.fetch_news(&ticker).await;
        if headlines.is_empty() {
            return Err(SentimentError::NoData {
                ticker: ticker.to_string(),
            });
        }

        info!(ticker = %ticker, count = headlines.len(), "scoring headlines");
        let analyzed = self.analyzer.analyze_headlines(&headlines).await;
        let stats = SentimentStats::from_headlines(&analyzed);

        Ok(SentimentReport {
            ticker,
            generated_at: Utc::now(),
            headlines: analyzed,
            stats,
        })
    }
}

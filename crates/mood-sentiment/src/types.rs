//! Domain types for the sentiment pipeline

use crate::error::{Result, SentimentError};
use crate::stats::SentimentStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized stock ticker symbol
///
/// Construction trims and uppercases the input, so two tickers that differ
/// only in case compare equal. An empty (post-trim) input is rejected before
/// any network call is made. No validation against a real exchange registry
/// is performed; the ticker is a query key and a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    /// Create a normalized ticker from raw user input
    pub fn new(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(SentimentError::InvalidTicker(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    /// The normalized symbol
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single news item's title plus source metadata, pre-analysis
///
/// Produced only by the scraper and immutable once created; the analyzer
/// builds new enriched records rather than mutating these in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    /// Headline text (non-empty)
    pub title: String,
    /// Publishing source (e.g., "Yahoo Finance")
    pub source: String,
    /// Link to the article, when the feed provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Publication time, when the feed provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Headline {
    /// Create a headline with title and source only
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            url: None,
            published_at: None,
        }
    }

    /// Attach the article URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach the publication time
    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

/// A headline enriched with its sentiment score and rationale
///
/// `sentiment` is always present and within [-1.0, 1.0]. When the oracle
/// failed or its response had no extractable number, `sentiment` is 0.0,
/// `reasoning` records what happened, and `scored` is false so aggregate
/// consumers can tell "neutral" from "unknown".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedHeadline {
    /// The original headline record
    #[serde(flatten)]
    pub headline: Headline,
    /// Sentiment score in [-1.0, 1.0]
    pub sentiment: f64,
    /// Short rationale from the oracle, or a failure marker
    pub reasoning: String,
    /// False when the score fell back to the 0.0 default
    #[serde(default = "default_scored")]
    pub scored: bool,
}

fn default_scored() -> bool {
    true
}

/// Result of one pipeline run for one ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReport {
    /// The analyzed ticker
    pub ticker: Ticker,
    /// When the run completed
    pub generated_at: DateTime<Utc>,
    /// Analyzed headlines, in scraper order
    pub headlines: Vec<AnalyzedHeadline>,
    /// Aggregate statistics over the batch
    pub stats: SentimentStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_normalization() {
        let ticker = Ticker::new("  aapl ").unwrap();
        assert_eq!(ticker.as_str(), "AAPL");
        assert_eq!(ticker, Ticker::new("AAPL").unwrap());
    }

    #[test]
    fn test_ticker_case_insensitive_equality() {
        assert_eq!(Ticker::new("msft").unwrap(), Ticker::new("MsFt").unwrap());
    }

    #[test]
    fn test_empty_ticker_rejected() {
        assert!(matches!(
            Ticker::new("   "),
            Err(SentimentError::InvalidTicker(_))
        ));
        assert!(Ticker::new("").is_err());
    }

    #[test]
    fn test_headline_builder() {
        let headline = Headline::new("Apple beats estimates", "Reuters")
            .with_url("https://example.com/apple");

        assert_eq!(headline.title, "Apple beats estimates");
        assert_eq!(headline.source, "Reuters");
        assert_eq!(headline.url.as_deref(), Some("https://example.com/apple"));
        assert!(headline.published_at.is_none());
    }

    #[test]
    fn test_analyzed_headline_serialization_flattens() {
        let analyzed = AnalyzedHeadline {
            headline: Headline::new("Good news", "Reuters"),
            sentiment: 0.8,
            reasoning: "strong quarter".to_string(),
            scored: true,
        };

        let json = serde_json::to_value(&analyzed).unwrap();
        assert_eq!(json["title"], "Good news");
        assert_eq!(json["sentiment"], 0.8);
    }
}

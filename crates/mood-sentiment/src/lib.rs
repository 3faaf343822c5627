//! Ticker news sentiment pipeline
//!
//! This crate turns a stock ticker into a sentiment report. It includes:
//!
//! - News scraping from public RSS feeds (Google News, Yahoo Finance)
//!   with per-source failure isolation and title de-duplication
//! - Headline sentiment scoring via a hosted generative model, with
//!   bounded concurrency, retry, and defensive response parsing
//! - Aggregate statistics (mean sentiment, positive/negative/neutral and
//!   unscored counts) over one batch
//! - CSV export and a plain-text summary report
//!
//! # Architecture
//!
//! The pipeline composes two components, leaves first:
//! - `NewsScraper`: ticker -> deduplicated, ordered `Headline` records
//! - `SentimentAnalyzer`: headlines -> `AnalyzedHeadline` records, same
//!   length and order, every record carrying a numeric sentiment
//!
//! `SentimentPipeline` wires them together for one run per ticker; nothing
//! is shared mutably across runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use mood_sentiment::{SentimentConfig, SentimentPipeline};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SentimentConfig::builder().with_env_api_key().build()?;
//!     let pipeline = SentimentPipeline::new(&config)?;
//!
//!     let report = pipeline.run("AAPL").await?;
//!     println!("mean sentiment: {:.2}", report.stats.mean);
//!
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod score;
pub mod scraper;
pub mod stats;
pub mod types;

// Re-export main types for convenience
pub use analyzer::SentimentAnalyzer;
pub use config::SentimentConfig;
pub use error::{Result, SentimentError};
pub use pipeline::SentimentPipeline;
pub use report::Reporter;
pub use scraper::NewsScraper;
pub use stats::SentimentStats;
pub use types::{AnalyzedHeadline, Headline, SentimentReport, Ticker};

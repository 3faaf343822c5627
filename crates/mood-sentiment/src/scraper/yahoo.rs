//! Yahoo Finance headline RSS source

use super::{NewsSource, status_error};
use crate::error::{Result, SentimentError};
use crate::types::{Headline, Ticker};
use async_trait::async_trait;
use chrono::Utc;

/// Headline source backed by the Yahoo Finance per-symbol RSS feed
pub struct YahooFinanceSource {
    client: reqwest::Client,
}

impl YahooFinanceSource {
    /// Create a new Yahoo Finance source over a shared client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn feed_url(ticker: &Ticker) -> String {
        format!(
            "https://feeds.finance.yahoo.com/rss/2.0/headline?s={}&region=US&lang=en-US",
            ticker
        )
    }
}

#[async_trait]
impl NewsSource for YahooFinanceSource {
    fn name(&self) -> &str {
        "yahoo-finance"
    }

    async fn fetch(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Headline>> {
        let response = self.client.get(Self::feed_url(ticker)).send().await?;

        if !response.status().is_success() {
            return Err(status_error(self.name(), response.status()));
        }

        let body = response.bytes().await?;
        let feed = feed_rs::parser::parse(&body[..])
            .map_err(|e| SentimentError::FeedError(e.to_string()))?;

        let headlines = feed
            .entries
            .into_iter()
            .take(limit)
            .filter_map(|entry| {
                let title = entry.title.map(|t| t.content)?;

                let mut headline = Headline::new(title, "Yahoo Finance");
                if let Some(link) = entry.links.first() {
                    headline = headline.with_url(link.href.clone());
                }
                if let Some(published) = entry.published.or(entry.updated) {
                    headline = headline.with_published_at(published.with_timezone(&Utc));
                }
                Some(headline)
            })
            .collect();

        Ok(headlines)
    }
}

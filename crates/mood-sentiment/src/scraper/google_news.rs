//! Google News RSS search source

use super::{NewsSource, status_error};
use crate::error::{Result, SentimentError};
use crate::types::{Headline, Ticker};
use async_trait::async_trait;
use chrono::Utc;

/// Headline source backed by the Google News search RSS feed
pub struct GoogleNewsSource {
    client: reqwest::Client,
}

impl GoogleNewsSource {
    /// Create a new Google News source over a shared client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn feed_url(ticker: &Ticker) -> String {
        format!(
            "https://news.google.com/rss/search?q={}+stock&hl=en-US&gl=US&ceid=US:en",
            ticker
        )
    }
}

#[async_trait]
impl NewsSource for GoogleNewsSource {
    fn name(&self) -> &str {
        "google-news"
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
                let raw_title = entry.title.map(|t| t.content)?;
                // Google News titles read "Headline - Publisher"
                let (title, source) = split_publisher(&raw_title);

                let mut headline = Headline::new(title, source);
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

/// Split a "Headline - Publisher" feed title into its parts
fn split_publisher(raw: &str) -> (String, String) {
    match raw.rsplit_once(" - ") {
        Some((title, publisher)) if !title.trim().is_empty() => {
            (title.trim().to_string(), publisher.trim().to_string())
        }
        _ => (raw.trim().to_string(), "Google News".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_publisher() {
        let (title, source) = split_publisher("Apple beats estimates - Reuters");
        assert_eq!(title, "Apple beats estimates");
        assert_eq!(source, "Reuters");
    }

    #[test]
    fn test_split_publisher_without_suffix() {
        let (title, source) = split_publisher("Apple beats estimates");
        assert_eq!(title, "Apple beats estimates");
        assert_eq!(source, "Google News");
    }

    #[test]
    fn test_split_publisher_keeps_inner_dashes() {
        let (title, source) = split_publisher("Q3 wrap-up - chips rally - Bloomberg");
        assert_eq!(title, "Q3 wrap-up - chips rally");
        assert_eq!(source, "Bloomberg");
    }

    #[test]
    fn test_feed_url_uses_normalized_ticker() {
        let ticker = Ticker::new("aapl").unwrap();
        let url = GoogleNewsSource::feed_url(&ticker);
        assert!(url.contains("q=AAPL+stock"));
    }
}

//! Report generation: CSV export and text summary

use crate::error::Result;
use crate::types::SentimentReport;
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Writes analyzed batches to flat files and formats text summaries
pub struct Reporter {
    data_dir: PathBuf,
}

impl Reporter {
    /// Create a reporter writing under `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Save the analyzed headlines to a CSV file
    ///
    /// The file is named `<TICKER>_sentiment_<YYYYMMDD_HHMMSS>.csv`. An
    /// empty batch writes nothing and returns `Ok(None)`.
    pub fn save_csv(&self, report: &SentimentReport) -> Result<Option<PathBuf>> {
        if report.headlines.is_empty() {
            info!("no data to save");
            return Ok(None);
        }

        fs::create_dir_all(&self.data_dir)?;

        let timestamp = report.generated_at.format("%Y%m%d_%H%M%S");
        let path = self
            .data_dir
            .join(format!("{}_sentiment_{}.csv", report.ticker, timestamp));

        let mut out = String::from("title,source,url,published_at,sentiment,reasoning,scored\n");
        for record in &report.headlines {
            let row = [
                csv_field(&record.headline.title),
                csv_field(&record.headline.source),
                csv_field(record.headline.url.as_deref().unwrap_or("")),
                csv_field(
                    &record
                        .headline
                        .published_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default(),
                ),
                record.sentiment.to_string(),
                csv_field(&record.reasoning),
                record.scored.to_string(),
            ];
            out.push_str(&row.join(","));
            out.push('\n');
        }

        fs::write(&path, out)?;
        info!("data saved to {}", path.display());
        Ok(Some(path))
    }

    /// Format a plain-text summary of one report
    pub fn summary(report: &SentimentReport) -> String {
        let stats = &report.stats;
        format!(
            "--- Sentiment Report for {} ---\n\
             Average Sentiment: {:.2}\n\
             Positive: {}\n\
             Negative: {}\n\
             Neutral: {}\n\
             Unscored: {}\n\
             -------------------------------------",
            report.ticker, stats.mean, stats.positive, stats.negative, stats.neutral,
            stats.unscored
        )
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::SentimentStats;
    use crate::types::{AnalyzedHeadline, Headline, Ticker};
    use chrono::{TimeZone, Utc};

    fn sample_report() -> SentimentReport {
        let headlines = vec![
            AnalyzedHeadline {
                headline: Headline::new("Good news, really", "Reuters")
                    .with_url("https://example.com/a"),
                sentiment: 0.8,
                reasoning: "strong \"beat\"".to_string(),
                scored: true,
            },
            AnalyzedHeadline {
                headline: Headline::new("Bad news", "Bloomberg"),
                sentiment: -0.6,
                reasoning: "guidance cut".to_string(),
                scored: true,
            },
        ];
        let stats = SentimentStats::from_headlines(&headlines);

        SentimentReport {
            ticker: Ticker::new("TEST").unwrap(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 45).unwrap(),
            headlines,
            stats,
        }
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("has, comma"), "\"has, comma\"");
        assert_eq!(csv_field("has \"quote\""), "\"has \"\"quote\"\"\"");
    }

    #[test]
    fn test_save_csv_names_file_by_ticker_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(dir.path());

        let path = reporter.save_csv(&sample_report()).unwrap().unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "TEST_sentiment_20240301_123045.csv"
        );

        let contents = fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "title,source,url,published_at,sentiment,reasoning,scored"
        );
        assert!(contents.contains("\"Good news, really\""));
        assert!(contents.contains("-0.6"));
    }

    #[test]
    fn test_save_csv_empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = Reporter::new(dir.path());

        let report = SentimentReport {
            headlines: Vec::new(),
            stats: SentimentStats::from_headlines(&[]),
            ..sample_report()
        };

        assert!(reporter.save_csv(&report).unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_summary_format() {
        let summary = Reporter::summary(&sample_report());
        assert!(summary.contains("Sentiment Report for TEST"));
        assert!(summary.contains("Average Sentiment: 0.10"));
        assert!(summary.contains("Positive: 1"));
        assert!(summary.contains("Negative: 1"));
    }
}

//! Aggregate statistics over one analyzed batch

use crate::types::AnalyzedHeadline;
use serde::{Deserialize, Serialize};

/// Mean sentiment and per-class counts for one batch
///
/// A defaulted record (oracle failure or unparseable response) carries
/// sentiment 0.0 and therefore counts as neutral, matching the documented
/// aggregate behavior; `unscored` counts those records separately so
/// consumers can tell "neutral" from "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    /// Mean sentiment over all records (0.0 for an empty batch)
    pub mean: f64,
    /// Records with sentiment > 0
    pub positive: usize,
    /// Records with sentiment < 0
    pub negative: usize,
    /// Records with sentiment == 0
    pub neutral: usize,
    /// Records whose score fell back to the default
    pub unscored: usize,
}

impl SentimentStats {
    /// Compute statistics over one analyzed batch
    pub fn from_headlines(headlines: &[AnalyzedHeadline]) -> Self {
        if headlines.is_empty() {
            return Self {
                mean: 0.0,
                positive: 0,
                negative: 0,
                neutral: 0,
                unscored: 0,
            };
        }

        let sum: f64 = headlines.iter().map(|h| h.sentiment).sum();

        Self {
            mean: sum / headlines.len() as f64,
            positive: headlines.iter().filter(|h| h.sentiment > 0.0).count(),
            negative: headlines.iter().filter(|h| h.sentiment < 0.0).count(),
            neutral: headlines.iter().filter(|h| h.sentiment == 0.0).count(),
            unscored: headlines.iter().filter(|h| !h.scored).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Headline;

    fn analyzed(title: &str, sentiment: f64, scored: bool) -> AnalyzedHeadline {
        AnalyzedHeadline {
            headline: Headline::new(title, "stub"),
            sentiment,
            reasoning: "test".to_string(),
            scored,
        }
    }

    #[test]
    fn test_empty_batch() {
        let stats = SentimentStats::from_headlines(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.positive + stats.negative + stats.neutral, 0);
    }

    #[test]
    fn test_counts_and_mean() {
        let batch = vec![
            analyzed("a", 0.8, true),
            analyzed("b", -0.6, true),
            analyzed("c", 0.1, true),
        ];

        let stats = SentimentStats::from_headlines(&batch);
        assert!((stats.mean - 0.1).abs() < 1e-9);
        assert_eq!(stats.positive, 2);
        assert_eq!(stats.negative, 1);
        assert_eq!(stats.neutral, 0);
        assert_eq!(stats.unscored, 0);
    }

    #[test]
    fn test_defaulted_records_count_as_neutral_and_unscored() {
        let batch = vec![
            analyzed("a", 0.5, true),
            analyzed("b", 0.0, false),
            analyzed("c", 0.0, true),
        ];

        let stats = SentimentStats::from_headlines(&batch);
        assert_eq!(stats.neutral, 2);
        assert_eq!(stats.unscored, 1);
    }
}

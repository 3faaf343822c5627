//! Defensive parsing of oracle responses
//!
//! The oracle returns free text. This module extracts a numeric sentiment
//! and a short rationale from it as a pure function, so every malformed
//! shape can be tested without invoking the model.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Rationale recorded when a response had no extractable number
pub const PARSE_FAILURE_MARKER: &str = "could not parse model response";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("hardcoded regex compiles"));

/// Sentiment and rationale extracted from a response
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScore {
    /// Score clamped to [-1.0, 1.0]
    pub sentiment: f64,
    /// Rationale text surrounding the score, or the whole response
    pub reasoning: String,
}

/// Failure to extract a numeric sentiment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreParseError {
    /// Response was empty or whitespace
    #[error("empty response")]
    Empty,

    /// No numeric sentiment anywhere in the response
    #[error("no numeric sentiment found in response")]
    NoNumber,
}

/// Extract a sentiment score and rationale from free oracle text
///
/// Tolerates values wrapped in prose, markdown fencing, and extra
/// whitespace. Out-of-range values are clamped to the nearest bound.
pub fn parse_score(text: &str) -> Result<ParsedScore, ScoreParseError> {
    let cleaned = strip_fencing(text);
    if cleaned.is_empty() {
        return Err(ScoreParseError::Empty);
    }

    let matched = NUMBER_RE.find(&cleaned).ok_or(ScoreParseError::NoNumber)?;
    let value: f64 = matched
        .as_str()
        .parse()
        .map_err(|_| ScoreParseError::NoNumber)?;

    let after = cleaned[matched.end()..]
        .trim_start_matches(|c: char| {
            c.is_whitespace() || matches!(c, '-' | '—' | ':' | ',' | '.' | ';' | ')' | '*')
        })
        .trim();

    let reasoning = if after.is_empty() {
        cleaned.to_string()
    } else {
        after.to_string()
    };

    Ok(ParsedScore {
        sentiment: value.clamp(-1.0, 1.0),
        reasoning,
    })
}

/// Drop markdown code fences and surrounding whitespace
fn strip_fencing(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

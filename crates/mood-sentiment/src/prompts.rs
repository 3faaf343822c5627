//! Prompts for the sentiment scoring oracle

use crate::types::Headline;

/// System prompt used for every scoring call
pub const SYSTEM_PROMPT: &str = r#"You are a financial news sentiment analyst.

You will be given one news headline about a publicly traded company. Rate
its sentiment toward the company on a scale from -1.0 (very negative) to
1.0 (very positive), where 0.0 is neutral.

Respond on a single line in exactly this format:

sentiment: <score> - <one short sentence explaining the rating>

Consider the likely impact on the stock, not the general tone of the
language. Earnings beats, upgrades, and product wins are positive;
lawsuits, downgrades, and missed guidance are negative. Routine coverage
with no directional signal is neutral.
"#;

/// Build the user message for one headline
pub fn scoring_prompt(headline: &Headline) -> String {
    if headline.source.is_empty() {
        format!("Headline: \"{}\"", headline.title)
    } else {
        format!(
            "Headline from {}: \"{}\"",
            headline.source, headline.title
        )
    }
}

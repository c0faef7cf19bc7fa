//! Prompt construction for the hosted-model summary.

use crate::analytics::{Order, sentiment_counts, sorted_by_published};
use crate::models::{ScoredArticle, Sentiment};

/// How many of the newest headlines go into the prompt.
pub const PROMPT_HEADLINES: usize = 10;

/// Build the analyst prompt from the newest headlines and the label counts.
pub fn build_prompt(scored: &[ScoredArticle]) -> String {
    let counts = sentiment_counts(scored);
    let distribution = Sentiment::ALL
        .iter()
        .filter(|s| counts.get(**s) > 0)
        .map(|s| format!("{}: {}", s, counts.get(*s)))
        .collect::<Vec<_>>()
        .join(", ");

    let headlines = sorted_by_published(scored, Order::Descending)
        .into_iter()
        .take(PROMPT_HEADLINES)
        .map(|s| format!("- {} ({})", s.title(), s.sentiment))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an analyst summarizing recent news coverage about a topic.

Sentiment distribution (article counts): {distribution}

Recent headlines with sentiment:
{headlines}

Write EXACTLY 4 concise Markdown bullet points:
1. Overall sentiment trend (bullish / bearish / mixed) and how strong it is.
2. Main themes or storylines appearing in these headlines.
3. Strong positive developments (if any).
4. Strong negative signals or concerns (if any).

Be objective and avoid speculation."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::scored;

    #[test]
    fn test_prompt_lists_ten_newest_headlines() {
        let items: Vec<_> = (0..12)
            .map(|i| scored(&format!("headline {i:02}"), if i % 2 == 0 { 0.5 } else { -0.5 }, i))
            .collect();
        let prompt = build_prompt(&items);
        assert!(prompt.contains("- headline 11 (negative)\n- headline 10 (positive)"));
        assert!(prompt.contains("headline 02"));
        assert!(!prompt.contains("headline 01"));
        assert!(!prompt.contains("headline 00"));
        assert!(prompt.contains("positive: 6, negative: 6"));
        assert!(!prompt.contains("neutral:"));
        assert!(prompt.contains("EXACTLY 4"));
    }
}

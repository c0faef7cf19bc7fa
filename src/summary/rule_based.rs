//! Deterministic four-bullet summary built from label counts and scores.

use crate::analytics::{Order, sentiment_counts, top_by_score};
use crate::models::{ScoredArticle, Sentiment, Trend};
use crate::utils::truncate_title;

pub const NO_ARTICLES: &str = "• No articles were found for this topic in the selected time window.";

const THEMES: &str = "• Main themes: Headlines cluster around a few recurring stories for this topic \
                      such as recent events, reactions, and commentary.";
const NO_POSITIVE: &str =
    "• Strong positive signals: No clearly positive headlines dominate right now.";
const NO_NEGATIVE: &str =
    "• Strong negative signals: No clearly negative headlines dominate right now.";

/// How many headlines each signal bullet lists.
const SIGNAL_HEADLINES: usize = 2;

/// Summarize without any network call. Identical input gives identical output.
pub fn rule_based_summary(scored: &[ScoredArticle]) -> String {
    if scored.is_empty() {
        return NO_ARTICLES.to_string();
    }

    let counts = sentiment_counts(scored);
    let trend = Trend::from_counts(counts.positive, counts.negative, scored.len());

    let overall = format!(
        "• Overall sentiment: {} positive, {} negative, {} neutral articles. The tone looks **{}**.",
        counts.positive,
        counts.negative,
        counts.neutral,
        trend.describe()
    );

    let positives = top_by_score(scored, Sentiment::Positive, Order::Descending, SIGNAL_HEADLINES);
    let negatives = top_by_score(scored, Sentiment::Negative, Order::Ascending, SIGNAL_HEADLINES);

    [
        overall,
        THEMES.to_string(),
        signal_bullet("• Strong positive signals:", &positives, NO_POSITIVE),
        signal_bullet("• Strong negative signals:", &negatives, NO_NEGATIVE),
    ]
    .join("\n")
}

fn signal_bullet(heading: &str, articles: &[&ScoredArticle], none: &str) -> String {
    if articles.is_empty() {
        return none.to_string();
    }
    let lines = articles
        .iter()
        .map(|a| format!("  - {}", truncate_title(a.title())))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{heading}\n{lines}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::scored;

    fn first_line(text: &str) -> &str {
        text.lines().next().unwrap()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(rule_based_summary(&[]), NO_ARTICLES);
    }

    #[test]
    fn test_all_positive_is_bullish() {
        let items: Vec<_> = (0..10).map(|i| scored(&format!("up {i}"), 0.6, i)).collect();
        let summary = rule_based_summary(&items);
        assert_eq!(
            first_line(&summary),
            "• Overall sentiment: 10 positive, 0 negative, 0 neutral articles. \
             The tone looks **bullish (more positive than negative coverage)**."
        );
        assert!(summary.contains(NO_NEGATIVE));
    }

    #[test]
    fn test_balanced_is_mixed() {
        let mut items: Vec<_> = (0..5).map(|i| scored(&format!("up {i}"), 0.6, i)).collect();
        items.extend((5..10).map(|i| scored(&format!("down {i}"), -0.6, i)));
        assert!(first_line(&rule_based_summary(&items)).contains("**mixed"));
    }

    #[test]
    fn test_exact_ten_point_margin_is_mixed() {
        // 3 positive (30%), 2 negative (20%), 5 neutral
        let mut items = vec![
            scored("p1", 0.5, 0),
            scored("p2", 0.5, 1),
            scored("p3", 0.5, 2),
            scored("n1", -0.5, 3),
            scored("n2", -0.5, 4),
        ];
        items.extend((5..10).map(|i| scored(&format!("flat {i}"), 0.0, i)));
        assert!(first_line(&rule_based_summary(&items)).contains("**mixed"));
    }

    #[test]
    fn test_mostly_negative_is_bearish() {
        let items = vec![scored("n1", -0.5, 0), scored("n2", -0.7, 1), scored("flat", 0.0, 2)];
        assert!(first_line(&rule_based_summary(&items)).contains("**bearish"));
    }

    #[test]
    fn test_exactly_four_bullets() {
        let items = vec![
            scored("a", 0.9, 0),
            scored("b", 0.4, 1),
            scored("c", 0.2, 2),
            scored("d", -0.3, 3),
        ];
        let summary = rule_based_summary(&items);
        assert_eq!(summary.lines().filter(|l| l.starts_with("• ")).count(), 4);
    }

    #[test]
    fn test_signal_headlines_are_ranked_and_suffixed() {
        let items = vec![
            scored("mild gain", 0.2, 0),
            scored("big gain", 0.9, 1),
            scored("some gain", 0.5, 2),
            scored("small loss", -0.2, 3),
            scored("huge loss", -0.9, 4),
        ];
        let summary = rule_based_summary(&items);
        assert!(summary.contains("• Strong positive signals:\n  - big gain...\n  - some gain..."));
        assert!(summary.contains("• Strong negative signals:\n  - huge loss...\n  - small loss..."));
        assert!(!summary.contains("mild gain"));
    }

    #[test]
    fn test_long_titles_are_cut_at_ninety_chars() {
        let long = "x".repeat(120);
        let summary = rule_based_summary(&[scored(&long, 0.8, 0)]);
        let expected = format!("  - {}...", "x".repeat(90));
        assert!(summary.lines().any(|l| l == expected));
    }

    #[test]
    fn test_deterministic() {
        let items = vec![scored("a", 0.5, 0), scored("b", -0.5, 1), scored("c", 0.5, 2)];
        assert_eq!(rule_based_summary(&items), rule_based_summary(&items));
    }
}

//! Built-in sample articles used whenever the live source is unavailable.

use crate::models::RawArticle;
use chrono::{TimeZone, Utc};

/// Four fixed headlines about `topic`: positive, negative, rumor-driven
/// positive, and neutral, in that order. At most `limit` are returned.
pub fn sample_articles(topic: &str, limit: usize) -> Vec<RawArticle> {
    let at = |hour, minute| {
        Utc.with_ymd_and_hms(2025, 12, 19, hour, minute, 0)
            .single()
            .unwrap_or_default()
    };

    let samples = [
        RawArticle {
            title: format!("{topic} surges 5% amid positive market sentiment"),
            description: format!(
                "Latest developments in {topic} show strong bullish trend with major investors entering."
            ),
            url: "https://example.com/positive".to_string(),
            published_at: at(10, 30),
            source: "MarketWatch".to_string(),
        },
        RawArticle {
            title: format!("{topic} faces regulatory scrutiny, drops 3%"),
            description: format!("Government announces new regulations impacting {topic} operations."),
            url: "https://example.com/negative".to_string(),
            published_at: at(9, 45),
            source: "Reuters".to_string(),
        },
        RawArticle {
            title: format!("{topic} partnership rumors boost investor confidence"),
            description: format!(
                "Unconfirmed reports of major partnership send {topic} higher in pre-market."
            ),
            url: "https://example.com/positive2".to_string(),
            published_at: at(8, 20),
            source: "Bloomberg".to_string(),
        },
        RawArticle {
            title: format!("{topic} technical analysis: Neutral outlook"),
            description: format!("Analysts maintain neutral stance on {topic} amid mixed signals."),
            url: "https://example.com/neutral".to_string(),
            published_at: at(7, 15),
            source: "CNBC".to_string(),
        },
    ];

    samples.into_iter().take(limit).collect()
}

//! Sentiment classification of fetched articles.
//!
//! [`classify`] is total and order-preserving: every [`RawArticle`] yields
//! exactly one [`ScoredArticle`] at the same position.

mod analyzer;

pub use analyzer::PolarityAnalyzer;

use crate::models::{RawArticle, ScoredArticle};
use tracing::{debug, instrument};

/// Score every article with the polarity model and label it.
#[instrument(level = "info", skip_all, fields(count = articles.len()))]
pub fn classify(articles: &[RawArticle]) -> Vec<ScoredArticle> {
    let analyzer = PolarityAnalyzer::new();
    articles
        .iter()
        .map(|article| {
            let scores = analyzer.polarity_scores(&article.analysis_text());
            let scored = ScoredArticle::new(article.clone(), scores);
            debug!(
                title = %article.title,
                compound = scored.compound_score,
                sentiment = %scored.sentiment,
                "Scored article"
            );
            scored
        })
        .collect()
}

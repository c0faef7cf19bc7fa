//! Small projections over a scored collection.
//!
//! These stand in for the handful of table operations the summary and the
//! dashboard need: count by label, top-N by score, sort by publication time.
//! All sorts are stable, so ties keep the source order.

use crate::models::{ScoredArticle, Sentiment};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentCounts {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn get(&self, sentiment: Sentiment) -> usize {
        match sentiment {
            Sentiment::Positive => self.positive,
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
        }
    }
}

pub fn sentiment_counts(scored: &[ScoredArticle]) -> SentimentCounts {
    let counts = scored.iter().counts_by(|s| s.sentiment);
    SentimentCounts {
        positive: counts.get(&Sentiment::Positive).copied().unwrap_or(0),
        negative: counts.get(&Sentiment::Negative).copied().unwrap_or(0),
        neutral: counts.get(&Sentiment::Neutral).copied().unwrap_or(0),
    }
}

/// Sort direction for the projections below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

/// Up to `n` articles labelled `sentiment`, ordered by compound score.
pub fn top_by_score(
    scored: &[ScoredArticle],
    sentiment: Sentiment,
    order: Order,
    n: usize,
) -> Vec<&ScoredArticle> {
    scored
        .iter()
        .filter(|s| s.sentiment == sentiment)
        .sorted_by(|a, b| order.apply(a.compound_score.total_cmp(&b.compound_score)))
        .take(n)
        .collect()
}

/// Every article ordered by publication time.
pub fn sorted_by_published(scored: &[ScoredArticle], order: Order) -> Vec<&ScoredArticle> {
    scored
        .iter()
        .sorted_by(|a, b| order.apply(a.published_at().cmp(&b.published_at())))
        .collect()
}

/// Up to `n` of the most recently published articles labelled `sentiment`.
pub fn latest_with_sentiment(
    scored: &[ScoredArticle],
    sentiment: Sentiment,
    n: usize,
) -> Vec<&ScoredArticle> {
    sorted_by_published(scored, Order::Descending)
        .into_iter()
        .filter(|s| s.sentiment == sentiment)
        .take(n)
        .collect()
}

/// Mean compound score, 0.0 for an empty collection.
pub fn mean_compound(scored: &[ScoredArticle]) -> f64 {
    if scored.is_empty() {
        return 0.0;
    }
    scored.iter().map(|s| s.compound_score).sum::<f64>() / scored.len() as f64
}

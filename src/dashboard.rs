//! Rendering model: everything the report writers display, computed once.
//!
//! The writers in [`crate::outputs`] are pure consumers of [`Dashboard`];
//! none of them re-derives counts or orderings.

use crate::analytics::{
    Order, SentimentCounts, latest_with_sentiment, mean_compound, sentiment_counts,
    sorted_by_published,
};
use crate::models::{Notice, ScoredArticle, Sentiment};
use crate::sources::ArticleOrigin;
use crate::summary::{SummaryOutcome, SummaryStrategy};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Headlines shown per column in the top positive / negative lists.
pub const TOP_HEADLINES: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    /// Mean compound score across all articles.
    pub overall_sentiment: f64,
    pub counts: SentimentCounts,
}

/// One point of the polarity-over-time chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub published_at: DateTime<Utc>,
    pub compound_score: f64,
    pub sentiment: Sentiment,
}

/// A headline with its attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub url: String,
}

/// One row of the full-article table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleRow {
    pub title: String,
    pub sentiment: Sentiment,
    pub source: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub compound_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub topic: String,
    pub generated_at: DateTime<Utc>,
    pub origin: ArticleOrigin,
    pub notices: Vec<Notice>,
    pub metrics: Metrics,
    /// Counts in positive, negative, neutral order.
    pub distribution: Vec<(Sentiment, usize)>,
    /// Oldest first.
    pub trend: Vec<TrendPoint>,
    pub summary: String,
    pub summary_strategy: SummaryStrategy,
    pub top_positive: Vec<Headline>,
    pub top_negative: Vec<Headline>,
    /// Newest first.
    pub articles: Vec<ArticleRow>,
}

impl Dashboard {
    pub fn build(
        topic: &str,
        origin: ArticleOrigin,
        scored: &[ScoredArticle],
        summary: SummaryOutcome,
        mut notices: Vec<Notice>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let counts = sentiment_counts(scored);
        notices.extend(summary.notice);

        let trend = sorted_by_published(scored, Order::Ascending)
            .into_iter()
            .map(|s| TrendPoint {
                published_at: s.published_at(),
                compound_score: s.compound_score,
                sentiment: s.sentiment,
            })
            .collect();

        let articles = sorted_by_published(scored, Order::Descending)
            .into_iter()
            .map(|s| ArticleRow {
                title: s.article.title.clone(),
                sentiment: s.sentiment,
                source: s.article.source.clone(),
                url: s.article.url.clone(),
                published_at: s.published_at(),
                compound_score: s.compound_score,
            })
            .collect();

        Self {
            topic: topic.to_string(),
            generated_at,
            origin,
            notices,
            metrics: Metrics {
                overall_sentiment: mean_compound(scored),
                counts,
            },
            distribution: Sentiment::ALL.iter().map(|s| (*s, counts.get(*s))).collect(),
            trend,
            summary: summary.text,
            summary_strategy: summary.strategy,
            top_positive: headlines(scored, Sentiment::Positive),
            top_negative: headlines(scored, Sentiment::Negative),
            articles,
        }
    }

    /// True when there is nothing to chart; renderers show the empty state.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

fn headlines(scored: &[ScoredArticle], sentiment: Sentiment) -> Vec<Headline> {
    latest_with_sentiment(scored, sentiment, TOP_HEADLINES)
        .into_iter()
        .map(|s| Headline {
            title: s.article.title.clone(),
            source: s.article.source.clone(),
            url: s.article.url.clone(),
        })
        .collect()
}

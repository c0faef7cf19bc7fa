//! Data models for articles as they move through the pipeline.
//!
//! - [`RawArticle`]: what the article source emits, already validated
//! - [`ScoredArticle`]: a raw article plus its polarity scores and label
//! - [`Sentiment`]: the three-way label derived from the compound score
//! - [`Trend`]: the overall tone reported by the rule-based summary
//!
//! Both article records are request-scoped: built fresh for one analysis
//! run and dropped once the reports are written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compound score at or above which an article is labelled positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which an article is labelled negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// A news article as emitted by the article source.
///
/// The source guarantees `title` and `description` are present and that
/// `published_at` parsed; records failing either check never get this far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    /// Headline, never empty.
    pub title: String,
    /// Teaser text, may be empty.
    pub description: String,
    /// Link to the full article.
    pub url: String,
    /// Publication time, serialized as RFC 3339.
    pub published_at: DateTime<Utc>,
    /// Publisher name.
    pub source: String,
}

impl RawArticle {
    /// Text handed to the polarity model: title and description joined by one space.
    pub fn analysis_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Three-way sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Display order used by every chart and count listing.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// Label a compound score using the fixed dead zone around zero.
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Chart colour for this label.
    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#00D084",
            Sentiment::Negative => "#FF6B6B",
            Sentiment::Neutral => "#A4B0BE",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the polarity model for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Net polarity in `[-1.0, 1.0]`.
    pub compound: f64,
    /// Proportion of positive signal, `[0, 1]`.
    pub pos: f64,
    /// Proportion of negative signal, `[0, 1]`.
    pub neg: f64,
    /// Proportion of neutral signal, `[0, 1]`.
    pub neu: f64,
}

impl PolarityScores {
    /// Scores for text carrying no sentiment at all.
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            pos: 0.0,
            neg: 0.0,
            neu: 1.0,
        }
    }
}

/// A raw article enriched with its sentiment.
///
/// Serializes flat: the raw fields sit next to `compound_score`,
/// `sentiment`, `pos`, `neg` and `neu`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: RawArticle,
    pub compound_score: f64,
    pub sentiment: Sentiment,
    pub pos: f64,
    pub neg: f64,
    pub neu: f64,
}

impl ScoredArticle {
    pub fn new(article: RawArticle, scores: PolarityScores) -> Self {
        Self {
            article,
            compound_score: scores.compound,
            sentiment: Sentiment::from_compound(scores.compound),
            pos: scores.pos,
            neg: scores.neg,
            neu: scores.neu,
        }
    }

    pub fn title(&self) -> &str {
        &self.article.title
    }

    pub fn published_at(&self) -> DateTime<Utc> {
        self.article.published_at
    }
}

/// Overall tone of the coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Mixed,
}

impl Trend {
    /// Classify label counts with a fixed 10 percentage point margin.
    ///
    /// `pos_pct > neg_pct + 10` is evaluated as `10*pos > 10*neg + total`
    /// so a margin of exactly 10 points is always `Mixed`.
    pub fn from_counts(pos: usize, neg: usize, total: usize) -> Self {
        let total = total.max(1);
        if 10 * pos > 10 * neg + total {
            Trend::Bullish
        } else if 10 * neg > 10 * pos + total {
            Trend::Bearish
        } else {
            Trend::Mixed
        }
    }

    /// Phrase used in the first summary bullet.
    pub fn describe(&self) -> &'static str {
        match self {
            Trend::Bullish => "bullish (more positive than negative coverage)",
            Trend::Bearish => "bearish (more negative than positive coverage)",
            Trend::Mixed => "mixed (positive and negative are fairly balanced)",
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A user-facing message about a degraded step (sample data, rule-based fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

//! Polarity model: VADER (lexicon and rule-based sentiment reasoner).
//!
//! The `vader_sentiment` crate carries the full VADER lexicon (about 7,500
//! scored words, emoticons and slang) together with its rules for boosters,
//! negation, ALL-CAPS emphasis, "but" contrast and punctuation. This module
//! adapts its output to [`PolarityScores`].

use crate::models::PolarityScores;
use std::collections::HashMap;
use vader_sentiment::SentimentIntensityAnalyzer;

#[derive(Debug, Default, Clone, Copy)]
pub struct PolarityAnalyzer;

impl PolarityAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Score a piece of text. Total: empty or sentiment-free text is neutral.
    pub fn polarity_scores(&self, text: &str) -> PolarityScores {
        if !text.chars().any(char::is_alphanumeric) {
            return PolarityScores::neutral();
        }
        let analyzer = SentimentIntensityAnalyzer::new();
        let raw = analyzer.polarity_scores(text);
        from_vader(&raw)
    }
}

/// Convert VADER's `neg`/`neu`/`pos`/`compound` map.
///
/// VADER reports all-zero proportions when no token was scored at all; that
/// is the same situation as sentiment-free text, so it maps to neutral.
fn from_vader(raw: &HashMap<&str, f64>) -> PolarityScores {
    let get = |key: &str| raw.get(key).copied().unwrap_or(0.0);
    let (pos, neg, neu) = (get("pos"), get("neg"), get("neu"));
    if pos + neg + neu == 0.0 {
        return PolarityScores::neutral();
    }
    PolarityScores {
        compound: get("compound").clamp(-1.0, 1.0),
        pos,
        neg,
        neu,
    }
}

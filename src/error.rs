//! Error type for every external boundary of the pipeline.
//!
//! Nothing in the classifier or the rule-based summary can fail; these
//! variants only come out of the article source, the hosted model client,
//! configuration loading, and report writing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} returned {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hosted model returned no completion text")]
    EmptyCompletion,

    #[error("invalid published_at timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("article is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

//! NewsAPI `everything` endpoint client.
//!
//! See <https://newsapi.org/docs/endpoints/everything>. The key is sent in
//! the `X-Api-Key` header so it never appears in logged URLs.

use crate::config::{MAX_ARTICLES, NewsSettings};
use crate::error::{DashboardError, Result};
use crate::models::RawArticle;
use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiArticle {
    pub source: NewsApiSource,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsApiSource {
    pub name: Option<String>,
}

impl TryFrom<NewsApiArticle> for RawArticle {
    type Error = DashboardError;

    fn try_from(article: NewsApiArticle) -> Result<Self> {
        let title = article
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or(DashboardError::MissingField("title"))?;
        let description = article
            .description
            .filter(|d| !d.trim().is_empty())
            .ok_or(DashboardError::MissingField("description"))?;
        let published = article
            .published_at
            .ok_or(DashboardError::MissingField("publishedAt"))?;
        let published_at = parse_published_at(&published)?;

        Ok(RawArticle {
            title,
            description,
            url: article.url.unwrap_or_default(),
            published_at,
            source: article.source.name.unwrap_or_default(),
        })
    }
}

/// Parse an RFC 3339 publication timestamp.
pub fn parse_published_at(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| DashboardError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}

/// Keep the first `limit` usable articles, dropping records that break the
/// source contract (missing title or description, unparseable timestamp).
pub fn usable_articles(articles: Vec<NewsApiArticle>, limit: usize) -> Vec<RawArticle> {
    articles
        .into_iter()
        .take(limit)
        .filter_map(|article| match RawArticle::try_from(article) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(error = %e, "Dropping article");
                None
            }
        })
        .collect()
}

pub struct NewsApiClient {
    client: Client,
    settings: NewsSettings,
}

impl NewsApiClient {
    pub fn new(settings: NewsSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("news_sentiment_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, settings })
    }

    fn everything_url(&self, topic: &str, limit: usize, now: DateTime<Utc>) -> Result<Url> {
        let from = (now - Duration::days(self.settings.lookback_days))
            .format("%Y-%m-%d")
            .to_string();
        let page_size = limit.min(MAX_ARTICLES).to_string();
        let endpoint = format!("{}/everything", self.settings.base_url.trim_end_matches('/'));
        Url::parse_with_params(
            &endpoint,
            &[
                ("q", topic),
                ("language", self.settings.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("from", from.as_str()),
            ],
        )
        .map_err(|e| DashboardError::Api {
            service: "NewsAPI",
            status: 0,
            message: format!("invalid base URL: {e}"),
        })
    }

    /// Fetch up to `limit` articles about `topic`.
    ///
    /// An error is returned for transport failures, non-success responses,
    /// and successful responses carrying no articles at all. A response whose
    /// articles are all unusable yields `Ok(vec![])`.
    #[instrument(level = "info", skip(self, api_key))]
    pub async fn fetch(&self, topic: &str, limit: usize, api_key: &str) -> Result<Vec<RawArticle>> {
        let url = self.everything_url(topic, limit, Utc::now())?;
        debug!(%url, "Requesting NewsAPI");

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", api_key)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let parsed: NewsApiResponse = serde_json::from_str(&body)?;

        if !status.is_success() || parsed.articles.is_empty() {
            return Err(DashboardError::Api {
                service: "NewsAPI",
                status: status.as_u16(),
                message: parsed.message.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        let received = parsed.articles.len();
        let articles = usable_articles(parsed.articles, limit);
        info!(received, usable = articles.len(), "Fetched NewsAPI articles");
        Ok(articles)
    }
}

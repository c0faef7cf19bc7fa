//! Article source: live NewsAPI results with a built-in sample fallback.
//!
//! [`ArticleSource::fetch_news`] never fails. A missing credential, a
//! transport error, a non-success response, or an empty result set all
//! degrade to [`sample_articles`] and attach a [`Notice`] for the user.

mod newsapi;
mod sample;

pub use sample::sample_articles;

use newsapi::NewsApiClient;

use crate::config::{MAX_ARTICLES, NewsSettings};
use crate::error::{DashboardError, Result};
use crate::models::{Notice, RawArticle};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

/// Where the articles of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleOrigin {
    Live,
    Sample,
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub articles: Vec<RawArticle>,
    pub origin: ArticleOrigin,
    pub notice: Option<Notice>,
}

pub struct ArticleSource {
    client: NewsApiClient,
    api_key: Option<String>,
}

impl ArticleSource {
    pub fn new(settings: NewsSettings, api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            client: NewsApiClient::new(settings)?,
            api_key,
        })
    }

    #[instrument(level = "info", skip(self))]
    pub async fn fetch_news(&self, topic: &str, limit: usize) -> FetchOutcome {
        let limit = limit.min(MAX_ARTICLES);

        let Some(api_key) = self.api_key.as_deref() else {
            warn!("No NEWS_API_KEY configured; using sample data");
            return FetchOutcome::sample(
                topic,
                limit,
                Notice::warning("No NEWS_API_KEY found. Using sample data."),
            );
        };

        match self.client.fetch(topic, limit, api_key).await {
            Ok(articles) => {
                info!(count = articles.len(), "Using live articles");
                FetchOutcome {
                    articles,
                    origin: ArticleOrigin::Live,
                    notice: None,
                }
            }
            Err(DashboardError::Api { message, status, .. }) => {
                warn!(status, %message, "NewsAPI returned no articles; using sample data");
                FetchOutcome::sample(
                    topic,
                    limit,
                    Notice::warning(format!("API returned no articles: {message}")),
                )
            }
            Err(e) => {
                error!(error = %e, "NewsAPI request failed; using sample data");
                FetchOutcome::sample(topic, limit, Notice::error(format!("News API error: {e}")))
            }
        }
    }
}

impl FetchOutcome {
    fn sample(topic: &str, limit: usize, notice: Notice) -> Self {
        Self {
            articles: sample_articles(topic, limit),
            origin: ArticleOrigin::Sample,
            notice: Some(notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeLevel;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single HTTP request with `status` and a JSON `body`.
    /// Returns a base URL to point [`NewsSettings::base_url`] at.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/v2")
    }

    async fn fetch_from(base_url: String) -> FetchOutcome {
        let settings = NewsSettings {
            base_url,
            timeout_secs: 5,
            ..NewsSettings::default()
        };
        let source = ArticleSource::new(settings, Some("test-key".to_string())).unwrap();
        source.fetch_news("Bitcoin", 30).await
    }

    #[tokio::test]
    async fn test_missing_key_falls_back_to_samples() {
        let source = ArticleSource::new(NewsSettings::default(), None).unwrap();
        let outcome = source.fetch_news("Bitcoin", 4).await;
        assert_eq!(outcome.origin, ArticleOrigin::Sample);
        assert_eq!(outcome.articles.len(), 4);
        assert!(outcome.articles.iter().all(|a| a.title.contains("Bitcoin")));
        assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_samples() {
        let settings = NewsSettings {
            base_url: "http://127.0.0.1:9/v2".to_string(),
            timeout_secs: 2,
            ..NewsSettings::default()
        };
        let source = ArticleSource::new(settings, Some("test-key".to_string())).unwrap();
        let outcome = source.fetch_news("Ethereum", 30).await;
        assert_eq!(outcome.origin, ArticleOrigin::Sample);
        assert_eq!(outcome.articles.len(), 4);
        assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_rejected_key_falls_back_with_warning() {
        let base = serve_once(
            "401 Unauthorized",
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#,
        )
        .await;
        let outcome = fetch_from(base).await;
        assert_eq!(outcome.origin, ArticleOrigin::Sample);
        assert_eq!(outcome.articles.len(), 4);
        let notice = outcome.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "API returned no articles: Your API key is invalid.");
    }

    #[tokio::test]
    async fn test_empty_result_set_falls_back_with_warning() {
        let base = serve_once("200 OK", r#"{"status":"ok","totalResults":0,"articles":[]}"#).await;
        let outcome = fetch_from(base).await;
        assert_eq!(outcome.origin, ArticleOrigin::Sample);
        assert_eq!(outcome.articles.len(), 4);
        let notice = outcome.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, "API returned no articles: Unknown error");
    }

    #[tokio::test]
    async fn test_all_unusable_records_give_empty_live_result() {
        let base = serve_once(
            "200 OK",
            r#"{"status":"ok","totalResults":2,"articles":[
                {"source":{"id":null,"name":"Reuters"},"title":"Gold climbs","description":null,
                 "url":"https://example.com/a","publishedAt":"2025-12-19T09:45:00Z"},
                {"source":{"id":null,"name":"AP"},"title":"Oil slips","description":"",
                 "url":"https://example.com/b","publishedAt":"2025-12-19T08:00:00Z"}
            ]}"#,
        )
        .await;
        let outcome = fetch_from(base).await;
        assert_eq!(outcome.origin, ArticleOrigin::Live);
        assert!(outcome.articles.is_empty());
        assert!(outcome.notice.is_none());
    }
}

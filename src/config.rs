//! Runtime configuration: tunables from an optional YAML file plus secrets.
//!
//! Secrets come from the CLI (which reads them from the environment) and are
//! carried in [`Secrets`]; nothing below `main` reads the environment itself.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// Largest number of articles a single run may request.
pub const MAX_ARTICLES: usize = 100;

/// Deployment secrets. Either may be absent; both consumers degrade.
#[derive(Clone, Default)]
pub struct Secrets {
    pub news_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("news_api_key", &self.news_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Article source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsSettings {
    /// Base URL of the NewsAPI v2 endpoints.
    pub base_url: String,
    pub language: String,
    /// How many days back the `from` filter reaches.
    pub lookback_days: i64,
    pub timeout_secs: u64,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org/v2".to_string(),
            language: "en".to_string(),
            lookback_days: 7,
            timeout_secs: 10,
        }
    }
}

/// Hosted chat-completion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostedModelSettings {
    /// Base URL of an OpenAI-compatible API.
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Extra attempts after the first failure. 0 means a single attempt.
    pub max_retries: usize,
}

impl Default for HostedModelSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 250,
            temperature: 0.3,
            max_retries: 0,
        }
    }
}

/// Tunables as they appear in the YAML file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub news: NewsSettings,
    pub hosted_model: HostedModelSettings,
}

impl FileConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&yaml)?;
        info!("Loaded configuration file");
        Ok(config)
    }
}

/// Everything a run needs besides the per-run inputs.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub news: NewsSettings,
    pub hosted_model: HostedModelSettings,
    pub secrets: Secrets,
}

impl AppConfig {
    pub fn new(file: FileConfig, secrets: Secrets) -> Self {
        Self {
            news: file.news,
            hosted_model: file.hosted_model,
            secrets: Secrets {
                news_api_key: non_blank(secrets.news_api_key),
                openai_api_key: non_blank(secrets.openai_api_key),
            },
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

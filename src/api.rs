//! Hosted language-model client for the summary step.
//!
//! [`ChatCompletionClient`] speaks the OpenAI-compatible `chat/completions`
//! protocol. [`RetryAsk`] wraps any [`AskAsync`] with exponential backoff:
//! `max_retries` extra attempts after the first failure (0 means one attempt),
//! delays doubling from the base delay up to 30 seconds, plus 0-250ms jitter.

use crate::config::HostedModelSettings;
use crate::error::{DashboardError, Result};
use crate::utils::truncate_for_log;
use rand::{Rng, rng};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Trait for async hosted-model interaction.
///
/// Implementors send a prompt to a model and return its reply. The summary
/// generator only depends on this trait, so tests can substitute a stub.
pub trait AskAsync {
    /// Send `prompt` and return the model's text.
    async fn ask(&self, prompt: &str) -> Result<String>;
}

/// Retrying decorator. Delay before retry `n` is
/// `min(base_delay * 2^(n-1), 30s)` plus up to 250ms of jitter.
pub struct RetryAsk<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryAsk<T>
where
    T: AskAsync,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryAsk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryAsk")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .finish_non_exhaustive()
    }
}

impl<T> AskAsync for RetryAsk<T>
where
    T: AskAsync,
{
    #[instrument(level = "info", skip_all, fields(max_retries = self.max_retries))]
    async fn ask(&self, prompt: &str) -> Result<String> {
        let started = Instant::now();
        let mut failures = 0usize;

        loop {
            let err = match self.inner.ask(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => e,
            };
            failures += 1;

            if failures > self.max_retries {
                error!(
                    attempts = failures,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %err,
                    "Hosted model request failed; giving up"
                );
                return Err(err);
            }

            let backoff = self
                .base_delay
                .saturating_mul(1 << (failures - 1).min(16))
                .min(self.max_delay);
            let delay = backoff + StdDuration::from_millis(rng().random_range(0..=250));

            warn!(
                attempt = failures,
                elapsed_ms = started.elapsed().as_millis(),
                ?delay,
                error = %err,
                "Hosted model request failed; retrying"
            );
            sleep(delay).await;
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for an OpenAI-compatible `POST {api_base}/chat/completions`.
pub struct ChatCompletionClient {
    client: Client,
    api_key: String,
    settings: HostedModelSettings,
}

impl fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("api_base", &self.settings.api_base)
            .field("model", &self.settings.model)
            .finish()
    }
}

impl ChatCompletionClient {
    pub fn new(settings: HostedModelSettings, api_key: String) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            settings,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.api_base.trim_end_matches('/'))
    }
}

/// One user message carrying `prompt`, with the configured model and sampling.
fn chat_request<'a>(settings: &'a HostedModelSettings, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &settings.model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    }
}

/// Pull the completion text out of a response body, trimmed.
fn completion_text(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(DashboardError::EmptyCompletion)
}

impl AskAsync for ChatCompletionClient {
    #[instrument(level = "info", skip_all, fields(model = %self.settings.model))]
    async fn ask(&self, prompt: &str) -> Result<String> {
        let t0 = Instant::now();
        let request = chat_request(&self.settings, prompt);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| truncate_for_log(&body, 300));
            warn!(elapsed_ms = dt.as_millis(), status = status.as_u16(), "API call failed");
            return Err(DashboardError::Api {
                service: "hosted model",
                status: status.as_u16(),
                message,
            });
        }

        let text = completion_text(&body)?;
        info!(elapsed_ms = dt.as_millis(), chars = text.len(), "Hosted completion received");
        Ok(text)
    }
}

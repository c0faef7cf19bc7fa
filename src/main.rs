//! # News Sentiment Dashboard
//!
//! Fetches recent news coverage for a topic, scores each article's polarity,
//! summarizes the coverage, and renders the result as HTML, Markdown and JSON
//! reports plus a short terminal digest.
//!
//! ## Features
//!
//! - Live articles from NewsAPI, with a built-in sample set when no key is
//!   configured or the request fails
//! - Lexicon-based polarity scoring with a three-way label per article
//! - Four-bullet summary from an OpenAI-compatible model, or a rule-based
//!   summary when the model is unavailable or not requested
//! - Self-contained HTML dashboard with inline SVG charts
//!
//! ## Usage
//!
//! ```sh
//! news_sentiment_dashboard "Nifty 50" -n 50 --use-llm -o ./reports
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Pull articles for the topic (or fall back to samples)
//! 2. **Classifying**: Score and label every article
//! 3. **Summarizing**: Hosted model or rule-based bullets
//! 4. **Output**: Build the dashboard model and write the reports

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration as StdDuration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analytics;
mod api;
mod cli;
mod config;
mod dashboard;
mod error;
mod models;
mod outputs;
mod sentiment;
mod sources;
mod summary;
mod utils;

use api::{ChatCompletionClient, RetryAsk};
use cli::Cli;
use config::{AppConfig, FileConfig};
use dashboard::Dashboard;
use sources::ArticleSource;
use summary::Summarizer;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_sentiment_dashboard starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(topic = %args.topic, limit = args.limit(), use_llm = args.use_llm, output_dir = %args.output_dir, "Parsed CLI arguments");

    // ---- Load config ----
    let file_config = match args.config.as_deref() {
        Some(path) => FileConfig::load(Path::new(path))?,
        None => FileConfig::default(),
    };
    let config = AppConfig::new(file_config, args.secrets());
    debug!(?config, "Resolved configuration");

    // Early check: ensure output dir is writable before any network call
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Fetch and classify ----
    let source = ArticleSource::new(config.news.clone(), config.secrets.news_api_key.clone())?;
    let fetched = source.fetch_news(&args.topic, args.limit()).await;
    info!(count = fetched.articles.len(), origin = ?fetched.origin, "Articles ready for analysis");

    let scored = sentiment::classify(&fetched.articles);

    // ---- Summarize ----
    let hosted = match config.secrets.openai_api_key.clone() {
        Some(key) => match ChatCompletionClient::new(config.hosted_model.clone(), key) {
            Ok(client) => Some(RetryAsk::new(
                client,
                config.hosted_model.max_retries,
                StdDuration::from_secs(1),
            )),
            Err(e) => {
                error!(error = %e, "Failed to build hosted model client");
                None
            }
        },
        None => None,
    };
    let summary = Summarizer::new(hosted).summarize(&scored, args.use_llm).await;
    info!(strategy = ?summary.strategy, "Summary ready");

    // ---- Render ----
    let board = Dashboard::build(
        &args.topic,
        fetched.origin,
        &scored,
        summary,
        fetched.notice.into_iter().collect(),
        Utc::now(),
    );

    let paths = outputs::write_reports(&board, &args.output_dir).await?;
    outputs::terminal::print_dashboard(&board)?;
    println!("Dashboard: {}", paths.html.display());

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

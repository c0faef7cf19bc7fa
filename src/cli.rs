//! Command-line interface definitions for the news sentiment dashboard.
//!
//! Every option has a default; the two credentials can also come from the
//! environment.

use crate::config::Secrets;
use clap::Parser;

/// Command-line arguments for one dashboard run.
///
/// # Examples
///
/// ```sh
/// # Sample data, rule-based summary
/// news_sentiment_dashboard
///
/// # Live NewsAPI results for a topic, hosted-model summary
/// NEWS_API_KEY=... OPENAI_API_KEY=... news_sentiment_dashboard "Nifty 50" -n 50 --use-llm
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Topic or keyword to search for
    #[arg(default_value = "Bitcoin")]
    pub topic: String,

    /// Number of articles to analyze
    #[arg(short = 'n', long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(10..=100))]
    pub articles: u16,

    /// Summarize with the hosted language model instead of the rule-based summary
    #[arg(long)]
    pub use_llm: bool,

    /// NewsAPI key; sample data is used when absent
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,

    /// OpenAI-compatible API key for the hosted summary
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output directory for the rendered reports
    #[arg(short, long, default_value = "reports")]
    pub output_dir: String,
}

impl Cli {
    pub fn limit(&self) -> usize {
        usize::from(self.articles)
    }

    pub fn secrets(&self) -> Secrets {
        Secrets {
            news_api_key: self.news_api_key.clone(),
            openai_api_key: self.openai_api_key.clone(),
        }
    }
}

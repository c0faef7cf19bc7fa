//! Summary generation with a hosted model and a rule-based fallback.
//!
//! Dispatch, first match wins:
//! 1. hosted requested, credential configured, call succeeds: hosted text
//! 2. hosted requested, call fails: error notice, rule-based text
//! 3. hosted requested, no credential: info notice, rule-based text
//! 4. otherwise: rule-based text
//!
//! The hosted path never surfaces a partial response; any failure lands on
//! the rule-based text, which is always available.

mod hosted;
mod rule_based;

pub use hosted::build_prompt;
pub use rule_based::{NO_ARTICLES, rule_based_summary};

use crate::api::AskAsync;
use crate::models::{Notice, ScoredArticle};
use serde::Serialize;
use tracing::{error, info, instrument};

/// Which strategy produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    Hosted,
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryOutcome {
    pub text: String,
    pub strategy: SummaryStrategy,
    pub notice: Option<Notice>,
}

impl SummaryOutcome {
    fn rule_based(scored: &[ScoredArticle], notice: Option<Notice>) -> Self {
        Self {
            text: rule_based_summary(scored),
            strategy: SummaryStrategy::RuleBased,
            notice,
        }
    }
}

/// Summary generator. `hosted` is `None` when no credential is configured.
pub struct Summarizer<A> {
    hosted: Option<A>,
}

impl<A: AskAsync> Summarizer<A> {
    pub fn new(hosted: Option<A>) -> Self {
        Self { hosted }
    }

    #[instrument(level = "info", skip_all, fields(count = scored.len(), use_hosted_model = use_hosted_model))]
    pub async fn summarize(&self, scored: &[ScoredArticle], use_hosted_model: bool) -> SummaryOutcome {
        if !use_hosted_model {
            return SummaryOutcome::rule_based(scored, None);
        }

        let Some(client) = self.hosted.as_ref() else {
            info!("No OPENAI_API_KEY configured; using rule-based summary");
            return SummaryOutcome::rule_based(
                scored,
                Some(Notice::info(
                    "OPENAI_API_KEY not found. Using rule-based summary.",
                )),
            );
        };

        match client.ask(&build_prompt(scored)).await {
            Ok(text) => {
                info!("Using hosted-model summary");
                SummaryOutcome {
                    text: text.trim().to_string(),
                    strategy: SummaryStrategy::Hosted,
                    notice: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Hosted summary failed; falling back to rule-based summary");
                SummaryOutcome::rule_based(
                    scored,
                    Some(Notice::error(format!("LLM summary failed: {e}"))),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::fixtures::scored;
    use crate::error::{DashboardError, Result};
    use crate::models::NoticeLevel;
    use std::cell::RefCell;

    struct Failing;

    impl AskAsync for Failing {
        async fn ask(&self, _prompt: &str) -> Result<String> {
            Err(DashboardError::Api {
                service: "hosted model",
                status: 429,
                message: "quota exceeded".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct Canned {
        prompts: RefCell<Vec<String>>,
    }

    impl AskAsync for Canned {
        async fn ask(&self, prompt: &str) -> Result<String> {
            self.prompts.borrow_mut().push(prompt.to_string());
            Ok("\n- Tone is upbeat\n- Themes\n- Positives\n- Negatives\n\n".to_string())
        }
    }

    fn items() -> Vec<ScoredArticle> {
        vec![scored("rally", 0.8, 0), scored("slump", -0.6, 1), scored("flat", 0.0, 2)]
    }

    #[tokio::test]
    async fn test_rule_based_when_not_requested() {
        let summarizer = Summarizer::new(Some(Canned::default()));
        let outcome = summarizer.summarize(&items(), false).await;
        assert_eq!(outcome.strategy, SummaryStrategy::RuleBased);
        assert_eq!(outcome.text, rule_based_summary(&items()));
        assert!(outcome.notice.is_none());
        assert!(summarizer.hosted.unwrap().prompts.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_hosted_text_is_trimmed() {
        let summarizer = Summarizer::new(Some(Canned::default()));
        let outcome = summarizer.summarize(&items(), true).await;
        assert_eq!(outcome.strategy, SummaryStrategy::Hosted);
        assert_eq!(outcome.text, "- Tone is upbeat\n- Themes\n- Positives\n- Negatives");
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn test_hosted_failure_matches_rule_based_output() {
        let failing = Summarizer::new(Some(Failing)).summarize(&items(), true).await;
        let plain = Summarizer::<Failing>::new(None).summarize(&items(), false).await;
        assert_eq!(failing.text, plain.text);
        assert_eq!(failing.strategy, SummaryStrategy::RuleBased);
        let notice = failing.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn test_missing_credential_notifies_and_falls_back() {
        let outcome = Summarizer::<Failing>::new(None).summarize(&items(), true).await;
        assert_eq!(outcome.strategy, SummaryStrategy::RuleBased);
        assert_eq!(outcome.text, rule_based_summary(&items()));
        assert_eq!(outcome.notice.unwrap().level, NoticeLevel::Info);
    }

    #[tokio::test]
    async fn test_empty_input_without_hosted_model() {
        let outcome = Summarizer::<Failing>::new(None).summarize(&[], false).await;
        assert_eq!(outcome.text, NO_ARTICLES);
    }
}

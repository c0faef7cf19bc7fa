//! Report writers for a rendered [`Dashboard`].
//!
//! # Submodules
//!
//! - [`html`]: self-contained HTML page with inline SVG charts
//! - [`markdown`]: Markdown report
//! - [`json`]: the serialized rendering model
//! - [`terminal`]: plain-text digest for stdout
//!
//! # Output Structure
//!
//! Each run writes three files sharing one stem:
//! ```text
//! output_dir/
//! ├── bitcoin_2025-12-19_103000.html
//! ├── bitcoin_2025-12-19_103000.md
//! └── bitcoin_2025-12-19_103000.json
//! ```

pub mod html;
pub mod json;
pub mod markdown;
pub mod terminal;

use crate::dashboard::Dashboard;
use crate::utils::slugify;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Shown instead of charts when a run produced no usable articles.
pub const EMPTY_STATE: &str = "No articles found. Try a different topic or check API key.";

/// Display format for timestamps in every report.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// File stem shared by the reports of one run.
pub fn report_stem(topic: &str, generated_at: DateTime<Utc>) -> String {
    format!("{}_{}", slugify(topic), generated_at.format("%Y-%m-%d_%H%M%S"))
}

/// Paths of the files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub html: PathBuf,
    pub markdown: PathBuf,
    pub json: PathBuf,
}

impl ReportPaths {
    pub fn new(output_dir: &str, stem: &str) -> Self {
        let dir = Path::new(output_dir);
        Self {
            html: dir.join(format!("{stem}.html")),
            markdown: dir.join(format!("{stem}.md")),
            json: dir.join(format!("{stem}.json")),
        }
    }
}

/// Write the HTML, Markdown and JSON reports into `output_dir`.
#[instrument(level = "info", skip_all, fields(%output_dir, topic = %board.topic))]
pub async fn write_reports(board: &Dashboard, output_dir: &str) -> Result<ReportPaths, Box<dyn Error>> {
    let paths = ReportPaths::new(output_dir, &report_stem(&board.topic, board.generated_at));

    fs::write(&paths.html, html::render_html(board)?).await?;
    info!(path = %paths.html.display(), "Wrote HTML dashboard");

    fs::write(&paths.markdown, markdown::render_markdown(board)?).await?;
    info!(path = %paths.markdown.display(), "Wrote Markdown report");

    json::write_dashboard(board, &paths.json).await?;
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::{dashboard, mixed_items};
    use chrono::TimeZone;

    #[test]
    fn test_report_stem() {
        let at = Utc.with_ymd_and_hms(2025, 12, 19, 10, 30, 5).unwrap();
        assert_eq!(report_stem("Nifty 50", at), "nifty-50_2025-12-19_103005");
        assert_eq!(report_stem("???", at), "topic_2025-12-19_103005");
    }

    #[test]
    fn test_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 12, 19, 7, 15, 0).unwrap();
        assert_eq!(timestamp(at), "2025-12-19 07:15 UTC");
    }

    #[tokio::test]
    async fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().to_str().unwrap();
        let paths = write_reports(&dashboard(&mixed_items()), output_dir).await.unwrap();

        assert_eq!(paths, ReportPaths::new(output_dir, "bitcoin_2025-12-20_080000"));
        assert!(std::fs::read_to_string(&paths.html).unwrap().contains("<svg"));
        assert!(std::fs::read_to_string(&paths.markdown).unwrap().contains("## All Articles"));
        assert!(paths.json.is_file());
    }
}

//! JSON output of the rendering model.
//!
//! The file carries every field of [`Dashboard`], so downstream tools can
//! rebuild charts without re-running the classifier.

use crate::dashboard::Dashboard;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `board` and write it to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_dashboard(board: &Dashboard, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(board)?;
    fs::write(path, json).await?;
    info!(articles = board.articles.len(), "Wrote dashboard JSON");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::{dashboard, mixed_items};

    #[tokio::test]
    async fn test_write_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bitcoin.json");
        write_dashboard(&dashboard(&mixed_items()), &path).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["topic"], "Bitcoin");
        assert_eq!(value["origin"], "sample");
        assert_eq!(value["summary_strategy"], "rule_based");
        assert_eq!(value["metrics"]["counts"]["positive"], 2);
        assert_eq!(value["distribution"][0][0], "positive");
        assert_eq!(value["articles"].as_array().unwrap().len(), 4);
        assert_eq!(value["notices"][0]["level"], "warning");
    }
}

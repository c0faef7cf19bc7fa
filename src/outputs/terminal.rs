//! Plain-text digest printed at the end of a run.

use crate::dashboard::Dashboard;
use crate::models::Trend;
use crate::outputs::EMPTY_STATE;
use std::fmt::{self, Write};

pub fn render_terminal(board: &Dashboard) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "News sentiment: {}", board.topic)?;
    for notice in &board.notices {
        writeln!(out, "[{:?}] {}", notice.level, notice.message)?;
    }

    if board.is_empty() {
        writeln!(out, "{EMPTY_STATE}")?;
    } else {
        let counts = &board.metrics.counts;
        let trend = Trend::from_counts(counts.positive, counts.negative, counts.total());
        writeln!(
            out,
            "Overall sentiment {:.2} ({})",
            board.metrics.overall_sentiment,
            trend.describe()
        )?;
        writeln!(
            out,
            "Positive {} | Negative {} | Neutral {}",
            counts.positive, counts.negative, counts.neutral
        )?;
    }
    writeln!(out)?;
    writeln!(out, "{}", board.summary)?;
    Ok(out)
}

pub fn print_dashboard(board: &Dashboard) -> Result<(), fmt::Error> {
    println!("{}", render_terminal(board)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::{dashboard, mixed_items};

    #[test]
    fn test_terminal_digest() {
        let text = render_terminal(&dashboard(&mixed_items())).unwrap();
        assert!(text.starts_with("News sentiment: Bitcoin\n"));
        assert!(text.contains("[Warning] No NEWS_API_KEY found."));
        assert!(text.contains("Positive 2 | Negative 1 | Neutral 1"));
        assert!(text.contains("• Overall sentiment: 2 positive, 1 negative, 1 neutral articles."));
    }

    #[test]
    fn test_terminal_empty() {
        let text = render_terminal(&dashboard(&[])).unwrap();
        assert!(text.contains(EMPTY_STATE));
        assert!(!text.contains("Overall sentiment "));
    }
}

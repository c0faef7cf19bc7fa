//! Markdown rendering of a [`Dashboard`].

use crate::dashboard::{Dashboard, Headline};
use crate::models::Trend;
use crate::outputs::{EMPTY_STATE, timestamp};
use std::fmt::{self, Write};

/// Render the report: metrics, summary, headline lists, article table.
pub fn render_markdown(board: &Dashboard) -> Result<String, fmt::Error> {
    let mut md = String::new();

    writeln!(md, "# News Sentiment Dashboard: {}\n", board.topic)?;
    writeln!(md, "_Generated {}_\n", timestamp(board.generated_at))?;

    for notice in &board.notices {
        writeln!(md, "> **{:?}:** {}", notice.level, notice.message)?;
    }
    if !board.notices.is_empty() {
        writeln!(md)?;
    }

    if board.is_empty() {
        writeln!(md, "{EMPTY_STATE}\n")?;
    } else {
        let counts = &board.metrics.counts;
        let trend = Trend::from_counts(counts.positive, counts.negative, counts.total());
        writeln!(md, "## Metrics\n")?;
        writeln!(md, "| Metric | Value |")?;
        writeln!(md, "|---|---|")?;
        writeln!(md, "| Overall Sentiment | {:.2} |", board.metrics.overall_sentiment)?;
        writeln!(md, "| Positive Articles | {} |", counts.positive)?;
        writeln!(md, "| Negative Articles | {} |", counts.negative)?;
        writeln!(md, "| Neutral Articles | {} |", counts.neutral)?;
        writeln!(md, "| Trend | {} |\n", trend.describe())?;
    }

    writeln!(md, "## Summary\n")?;
    writeln!(md, "{}\n", board.summary)?;

    if board.is_empty() {
        return Ok(md);
    }

    write_headlines(&mut md, "Top Positive Headlines", &board.top_positive)?;
    write_headlines(&mut md, "Top Negative Headlines", &board.top_negative)?;

    writeln!(md, "## All Articles\n")?;
    writeln!(md, "| Title | Sentiment | Source | Published | Score |")?;
    writeln!(md, "|---|---|---|---|---|")?;
    for row in &board.articles {
        writeln!(
            md,
            "| [{}]({}) | {} | {} | {} | {:.2} |",
            escape_text(&row.title),
            escape_url(&row.url),
            row.sentiment,
            escape_text(&row.source),
            timestamp(row.published_at),
            row.compound_score
        )?;
    }
    Ok(md)
}

fn write_headlines(md: &mut String, heading: &str, headlines: &[Headline]) -> fmt::Result {
    writeln!(md, "## {heading}\n")?;
    if headlines.is_empty() {
        writeln!(md, "_None in this window._\n")?;
        return Ok(());
    }
    for headline in headlines {
        writeln!(
            md,
            "- [{}]({}) <small>{}</small>",
            escape_text(&headline.title),
            escape_url(&headline.url),
            escape_text(&headline.source)
        )?;
    }
    writeln!(md)
}

/// Backslash-escape characters that would open links, code spans, inline
/// HTML, or split a table column.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '|' | '`' | '<' | '>' | '*' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Percent-encode the few characters that end a Markdown link target early.
fn escape_url(url: &str) -> String {
    url.replace(' ', "%20")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace('|', "%7C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::fixtures::{dashboard, mixed_items};
    use crate::summary::NO_ARTICLES;

    #[test]
    fn test_markdown_sections() {
        let md = render_markdown(&dashboard(&mixed_items())).unwrap();
        assert!(md.starts_with("# News Sentiment Dashboard: Bitcoin\n"));
        assert!(md.contains("| Overall Sentiment | 0.1"));
        assert!(md.contains("| Positive Articles | 2 |"));
        assert!(md.contains("## Top Negative Headlines\n\n- [Sell-off deepens]"));
        assert!(md.contains("> **Warning:** No NEWS_API_KEY found. Using sample data."));
        let rows: Vec<&str> = md.lines().filter(|l| l.starts_with("| [")).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows[0].starts_with("| [Gains extend]"));
    }

    #[test]
    fn test_markdown_empty_state() {
        let md = render_markdown(&dashboard(&[])).unwrap();
        assert!(md.contains(EMPTY_STATE));
        assert!(md.contains(NO_ARTICLES));
        assert!(!md.contains("## Metrics"));
        assert!(!md.contains("## All Articles"));
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("A | B"), "A \\| B");
        assert_eq!(escape_text("[Live] `x` <b>"), "\\[Live\\] \\`x\\` \\<b\\>");
        assert_eq!(escape_text("plain words"), "plain words");
    }

    #[test]
    fn test_escape_url() {
        assert_eq!(
            escape_url("https://example.com/a (b)|c"),
            "https://example.com/a%20%28b%29%7Cc"
        );
    }

    #[test]
    fn test_brackets_in_headlines_stay_inside_the_link() {
        let mut items = mixed_items();
        items[1].article.title = "Sell-off [UPDATE] deepens | markets".to_string();
        items[1].article.source = "Wire `feed`".to_string();
        let md = render_markdown(&dashboard(&items)).unwrap();
        assert!(md.contains(
            "- [Sell-off \\[UPDATE\\] deepens \\| markets](https://example.com/Sell-off-deepens) <small>Wire \\`feed\\`</small>"
        ));
        assert!(md.contains("| [Sell-off \\[UPDATE\\] deepens \\| markets](https://example.com/Sell-off-deepens) | negative |"));
    }
}

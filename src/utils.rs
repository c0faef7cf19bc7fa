//! Utility functions for string shaping and file system checks.
//!
//! - Headline truncation for the summary bullets
//! - Log-friendly truncation of long response bodies
//! - Slugs for report file names
//! - HTML escaping for the dashboard
//! - Output directory validation

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

const WRITE_CHECK_FILE: &str = ".write_check";

/// Characters of a headline kept in a summary bullet.
pub const TITLE_CHARS: usize = 90;

/// Cut a headline to [`TITLE_CHARS`] characters and append `...`.
///
/// The suffix is appended whether or not anything was cut.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_title("Short"), "Short...");
/// ```
pub fn truncate_title(title: &str) -> String {
    let cut: String = title.chars().take(TITLE_CHARS).collect();
    format!("{cut}...")
}

/// Shorten a response body before it goes into a log line or error message.
///
/// Keeps the first `max` characters and notes how many bytes were cut:
/// `"aaaaaaaaaa…(+490 bytes)"`.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Convert a topic to a file-name-friendly slug.
///
/// Lowercases, keeps alphanumerics, and collapses every other run of
/// characters into a single hyphen.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "topic".to_string()
    } else {
        slug.to_string()
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Create `path` if needed and prove it accepts writes.
///
/// A marker file is created and removed again. Run before any network call so
/// a bad `--output-dir` fails fast instead of after the fetch and summary.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let marker = Path::new(path).join(WRITE_CHECK_FILE);
    fs::write(&marker, b"").await?;
    if let Err(e) = fs::remove_file(&marker).await {
        warn!(marker = %marker.display(), error = %e, "Could not remove write check file");
    }
    info!("Report directory accepts writes");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_short_still_gets_suffix() {
        assert_eq!(truncate_title("Bitcoin rallies"), "Bitcoin rallies...");
        assert_eq!(truncate_title(""), "...");
    }

    #[test]
    fn test_truncate_title_long() {
        let title = "b".repeat(91);
        assert_eq!(truncate_title(&title), format!("{}...", "b".repeat(90)));
        let exact = "c".repeat(90);
        assert_eq!(truncate_title(&exact), format!("{exact}..."));
    }

    #[test]
    fn test_truncate_title_counts_characters_not_bytes() {
        let title = "é".repeat(100);
        let cut = truncate_title(&title);
        assert_eq!(cut.chars().count(), 93);
    }

    #[test]
    fn test_truncate_for_log_keeps_short_bodies() {
        assert_eq!(truncate_for_log("{\"error\":\"bad\"}", 100), "{\"error\":\"bad\"}");
    }

    #[test]
    fn test_truncate_for_log_cuts_long_bodies() {
        let body = "x".repeat(320);
        assert_eq!(truncate_for_log(&body, 300), format!("{}…(+20 bytes)", "x".repeat(300)));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééé", 1);
        assert_eq!(result, "é…(+4 bytes)");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Bitcoin"), "bitcoin");
        assert_eq!(slugify("Nifty 50"), "nifty-50");
        assert_eq!(slugify("  India elections!! "), "india-elections");
        assert_eq!(slugify("S&P 500 / Futures"), "s-p-500-futures");
        assert_eq!(slugify("???"), "topic");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_directory() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("reports").join("today");
        let path = nested.to_str().unwrap();
        ensure_writable_dir(path).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join(WRITE_CHECK_FILE).exists());
    }
}

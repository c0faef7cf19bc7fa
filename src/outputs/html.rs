//! Self-contained HTML dashboard.
//!
//! No external assets: the charts are inline SVG and the table sorting is a
//! few lines of inline script, so the file can be opened from disk or mailed.

use crate::dashboard::{Dashboard, Headline, TrendPoint};
use crate::models::{NoticeLevel, Sentiment, Trend};
use crate::outputs::{EMPTY_STATE, timestamp};
use crate::sources::ArticleOrigin;
use crate::utils::html_escape;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use std::fmt::{self, Write};

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern"));

const CHART_WIDTH: f64 = 640.0;
const CHART_HEIGHT: f64 = 240.0;
const CHART_PAD: f64 = 32.0;

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #f5f6fa; color: #2f3542; }
main { max-width: 1100px; margin: 0 auto; padding: 24px; }
h1 { margin-bottom: 4px; }
.meta { color: #747d8c; margin-top: 0; }
.notice { padding: 10px 14px; border-radius: 6px; margin: 8px 0; }
.notice.info { background: #dff9fb; }
.notice.warning { background: #fff3cd; }
.notice.error { background: #ffe0e0; }
.cards { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; margin: 16px 0; }
.card { background: #fff; border-radius: 8px; padding: 14px; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.card .label { color: #747d8c; font-size: 0.85em; }
.card .value { font-size: 1.8em; font-weight: 600; }
.charts { display: grid; grid-template-columns: 1fr 2fr; gap: 12px; }
.panel { background: #fff; border-radius: 8px; padding: 14px; box-shadow: 0 1px 3px rgba(0,0,0,.08); margin-bottom: 12px; }
.legend span { margin-right: 12px; font-size: 0.9em; }
.swatch { display: inline-block; width: 10px; height: 10px; border-radius: 2px; margin-right: 4px; }
.columns { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
.summary p { margin: 4px 0; }
table { width: 100%; border-collapse: collapse; font-size: 0.92em; }
th { text-align: left; cursor: pointer; border-bottom: 2px solid #dfe4ea; padding: 6px; }
td { border-bottom: 1px solid #f1f2f6; padding: 6px; }
.empty { text-align: center; color: #747d8c; padding: 48px; }
"#;

const SORT_SCRIPT: &str = r#"
document.querySelectorAll("table.sortable th").forEach(function (th, idx) {
  th.addEventListener("click", function () {
    var body = th.closest("table").tBodies[0];
    var asc = th.dataset.dir !== "asc";
    th.dataset.dir = asc ? "asc" : "desc";
    Array.from(body.rows)
      .sort(function (a, b) {
        var x = a.cells[idx].dataset.sort, y = b.cells[idx].dataset.sort;
        var nx = parseFloat(x), ny = parseFloat(y);
        var c = (!isNaN(nx) && !isNaN(ny)) ? nx - ny : x.localeCompare(y);
        return asc ? c : -c;
      })
      .forEach(function (row) { body.appendChild(row); });
  });
});
"#;

/// Render the whole dashboard page.
pub fn render_html(board: &Dashboard) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let topic = html_escape(&board.topic);

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{topic} - News Sentiment Dashboard</title>")?;
    writeln!(out, "<style>{STYLE}</style>\n</head>\n<body>\n<main>")?;
    writeln!(out, "<h1>News Sentiment Dashboard: {topic}</h1>")?;
    writeln!(
        out,
        "<p class=\"meta\">Generated {} from {} articles</p>",
        timestamp(board.generated_at),
        match board.origin {
            ArticleOrigin::Live => "live",
            ArticleOrigin::Sample => "sample",
        }
    )?;

    for notice in &board.notices {
        let class = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        writeln!(
            out,
            "<div class=\"notice {class}\">{}</div>",
            html_escape(&notice.message)
        )?;
    }

    if board.is_empty() {
        writeln!(out, "<div class=\"panel empty\">{}</div>", html_escape(EMPTY_STATE))?;
    } else {
        write_cards(&mut out, board)?;
        writeln!(out, "<section class=\"charts\">")?;
        writeln!(out, "<div class=\"panel\"><h3>Sentiment Distribution</h3>")?;
        write_donut(&mut out, &board.distribution)?;
        writeln!(out, "</div>")?;
        writeln!(out, "<div class=\"panel\"><h3>Sentiment Trend Over Time</h3>")?;
        write_trend(&mut out, &board.trend)?;
        writeln!(out, "</div>\n</section>")?;
    }

    writeln!(out, "<section class=\"panel summary\"><h3>Summary</h3>")?;
    for line in board.summary.lines().filter(|l| !l.trim().is_empty()) {
        writeln!(out, "<p>{}</p>", render_inline(line))?;
    }
    writeln!(out, "</section>")?;

    if !board.is_empty() {
        writeln!(out, "<section class=\"columns\">")?;
        write_headlines(&mut out, "Top Positive Headlines", &board.top_positive)?;
        write_headlines(&mut out, "Top Negative Headlines", &board.top_negative)?;
        writeln!(out, "</section>")?;
        write_table(&mut out, board)?;
    }

    writeln!(out, "</main>\n<script>{SORT_SCRIPT}</script>\n</body>\n</html>")?;
    Ok(out)
}

/// Escape a line and turn `**bold**` markup into `<strong>`.
fn render_inline(line: &str) -> String {
    BOLD.replace_all(&html_escape(line), "<strong>$1</strong>").into_owned()
}

fn write_cards(out: &mut String, board: &Dashboard) -> fmt::Result {
    let counts = &board.metrics.counts;
    let trend = Trend::from_counts(counts.positive, counts.negative, counts.total());
    writeln!(out, "<section class=\"cards\">")?;
    writeln!(
        out,
        "<div class=\"card\"><div class=\"label\">Overall Sentiment</div><div class=\"value\">{:.2}</div><div class=\"label\">{}</div></div>",
        board.metrics.overall_sentiment,
        trend.describe()
    )?;
    for sentiment in Sentiment::ALL {
        writeln!(
            out,
            "<div class=\"card\"><div class=\"label\">{}</div><div class=\"value\" style=\"color:{}\">{}</div></div>",
            capitalized(sentiment),
            sentiment.color(),
            counts.get(sentiment)
        )?;
    }
    writeln!(out, "</section>")
}

fn capitalized(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Positive",
        Sentiment::Negative => "Negative",
        Sentiment::Neutral => "Neutral",
    }
}

/// Donut built from stroked circles: circumference 100, so dash lengths are percentages.
fn write_donut(out: &mut String, distribution: &[(Sentiment, usize)]) -> fmt::Result {
    let total: usize = distribution.iter().map(|(_, n)| n).sum();
    writeln!(out, "<svg viewBox=\"0 0 42 42\" width=\"220\" height=\"220\" role=\"img\">")?;
    writeln!(
        out,
        "<circle cx=\"21\" cy=\"21\" r=\"15.9155\" fill=\"transparent\" stroke=\"#f1f2f6\" stroke-width=\"6\"/>"
    )?;
    let mut offset = 25.0;
    for (sentiment, count) in distribution.iter().filter(|(_, n)| *n > 0) {
        let pct = *count as f64 * 100.0 / total.max(1) as f64;
        writeln!(
            out,
            "<circle cx=\"21\" cy=\"21\" r=\"15.9155\" fill=\"transparent\" stroke=\"{}\" stroke-width=\"6\" stroke-dasharray=\"{:.3} {:.3}\" stroke-dashoffset=\"{:.3}\"><title>{}: {}</title></circle>",
            sentiment.color(),
            pct,
            100.0 - pct,
            offset,
            sentiment,
            count
        )?;
        offset -= pct;
    }
    writeln!(out, "</svg>")?;
    write_legend(out)
}

fn write_legend(out: &mut String) -> fmt::Result {
    write!(out, "<div class=\"legend\">")?;
    for sentiment in Sentiment::ALL {
        write!(
            out,
            "<span><i class=\"swatch\" style=\"background:{}\"></i>{}</span>",
            sentiment.color(),
            sentiment
        )?;
    }
    writeln!(out, "</div>")
}

/// Map each point into chart coordinates: x by publication time, y by score in [-1, 1].
fn chart_coordinates(trend: &[TrendPoint]) -> Vec<(f64, f64)> {
    let (Some(first), Some(last)) = (trend.first(), trend.last()) else {
        return Vec::new();
    };
    let start = first.published_at.timestamp() as f64;
    let span = (last.published_at.timestamp() as f64 - start).max(0.0);
    let inner_w = CHART_WIDTH - 2.0 * CHART_PAD;
    let inner_h = CHART_HEIGHT - 2.0 * CHART_PAD;

    trend
        .iter()
        .map(|p| {
            let x = if span == 0.0 {
                CHART_PAD + inner_w / 2.0
            } else {
                CHART_PAD + (p.published_at.timestamp() as f64 - start) / span * inner_w
            };
            let y = CHART_PAD + (1.0 - p.compound_score.clamp(-1.0, 1.0)) / 2.0 * inner_h;
            (x, y)
        })
        .collect()
}

fn write_trend(out: &mut String, trend: &[TrendPoint]) -> fmt::Result {
    let coords = chart_coordinates(trend);
    writeln!(
        out,
        "<svg viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" width=\"100%\" role=\"img\">"
    )?;
    let zero = CHART_HEIGHT / 2.0;
    writeln!(
        out,
        "<line x1=\"{CHART_PAD}\" y1=\"{zero}\" x2=\"{}\" y2=\"{zero}\" stroke=\"#dfe4ea\" stroke-dasharray=\"4 4\"/>",
        CHART_WIDTH - CHART_PAD
    )?;
    for (label, y) in [("1.0", CHART_PAD), ("0.0", zero), ("-1.0", CHART_HEIGHT - CHART_PAD)] {
        writeln!(
            out,
            "<text x=\"4\" y=\"{:.1}\" font-size=\"10\" fill=\"#747d8c\">{label}</text>",
            y + 3.0
        )?;
    }

    for sentiment in Sentiment::ALL {
        let series: Vec<(&TrendPoint, &(f64, f64))> = trend
            .iter()
            .zip(coords.iter())
            .filter(|(p, _)| p.sentiment == sentiment)
            .collect();
        if series.is_empty() {
            continue;
        }
        if series.len() > 1 {
            let points = series
                .iter()
                .map(|(_, (x, y))| format!("{x:.1},{y:.1}"))
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(
                out,
                "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{points}\"/>",
                sentiment.color()
            )?;
        }
        for (point, (x, y)) in series {
            writeln!(
                out,
                "<circle cx=\"{x:.1}\" cy=\"{y:.1}\" r=\"4\" fill=\"{}\"><title>{} ({:.3})</title></circle>",
                sentiment.color(),
                timestamp(point.published_at),
                point.compound_score
            )?;
        }
    }
    writeln!(out, "</svg>")?;
    write_legend(out)
}

/// Anchor around already-escaped `label`, or the bare label when `url` is
/// not an absolute http(s) URL.
fn link(url: &str, label: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{label}</a>",
            html_escape(parsed.as_str())
        ),
        _ => label.to_string(),
    }
}

fn write_headlines(out: &mut String, heading: &str, headlines: &[Headline]) -> fmt::Result {
    writeln!(out, "<div class=\"panel\"><h3>{heading}</h3>")?;
    if headlines.is_empty() {
        writeln!(out, "<p class=\"meta\">None in this window.</p>")?;
    } else {
        writeln!(out, "<ul>")?;
        for headline in headlines {
            writeln!(
                out,
                "<li>{} <small>{}</small></li>",
                link(&headline.url, &html_escape(&headline.title)),
                html_escape(&headline.source)
            )?;
        }
        writeln!(out, "</ul>")?;
    }
    writeln!(out, "</div>")
}

fn write_table(out: &mut String, board: &Dashboard) -> fmt::Result {
    writeln!(out, "<section class=\"panel\"><h3>All Articles</h3>")?;
    writeln!(out, "<table class=\"sortable\">\n<thead><tr>")?;
    writeln!(
        out,
        "<th>Title</th><th>Sentiment</th><th>Source</th><th>Published</th><th>Score</th>"
    )?;
    writeln!(out, "</tr></thead>\n<tbody>")?;
    for row in &board.articles {
        let title = html_escape(&row.title);
        let source = html_escape(&row.source);
        writeln!(
            out,
            "<tr><td data-sort=\"{title}\">{}</td><td data-sort=\"{}\" style=\"color:{}\">{}</td><td data-sort=\"{source}\">{source}</td><td data-sort=\"{}\">{}</td><td data-sort=\"{:.4}\">{:.2}</td></tr>",
            link(&row.url, &title),
            row.sentiment,
            row.sentiment.color(),
            row.sentiment,
            row.published_at.timestamp(),
            timestamp(row.published_at),
            row.compound_score,
            row.compound_score
        )?;
    }
    writeln!(out, "</tbody>\n</table>\n</section>")
}

//! Bordered tables for top posts, platform comparison and column statistics.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use dashboard_core::formatting::{format_count, format_number, format_percent};
use dashboard_data::aggregator::{ColumnStats, PlatformSummary, TopPost};

use crate::themes::Theme;

fn header_row<'a>(titles: &[&'a str], theme: &Theme) -> Row<'a> {
    Row::new(
        titles
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header))
            .collect::<Vec<_>>(),
    )
    .height(1)
}

fn stripe(i: usize, theme: &Theme) -> Style {
    if i % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

fn total(summary: &[PlatformSummary], field: impl Fn(&PlatformSummary) -> u64) -> u64 {
    summary.iter().map(field).fold(0, u64::saturating_add)
}

fn bordered(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", title))
}

// ── Top posts ─────────────────────────────────────────────────────────────────

/// Render the most-engaging posts, one row each.
pub fn render_top_posts_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    posts: &[TopPost],
    theme: &Theme,
) {
    let header = header_row(
        &[
            "Platform",
            "Content_Type",
            "Views",
            "Likes",
            "Shares",
            "Comments",
            "Engagement",
        ],
        theme,
    );

    let rows: Vec<Row> = posts
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from(p.platform.clone()),
                Cell::from(p.content_type.clone()),
                Cell::from(format_count(p.views)),
                Cell::from(format_count(p.likes)),
                Cell::from(format_count(p.shares)),
                Cell::from(format_count(p.comments)),
                Cell::from(format_count(p.engagement)),
            ])
            .style(stripe(i, theme))
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(11),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(title, theme))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Platform comparison ───────────────────────────────────────────────────────

/// Render one row per platform followed by a highlighted totals row.
pub fn render_platform_summary_table(
    frame: &mut Frame,
    area: Rect,
    summary: &[PlatformSummary],
    theme: &Theme,
) {
    let header = header_row(
        &[
            "Platform",
            "Posts",
            "Views",
            "Likes",
            "Shares",
            "Comments",
            "Engagement",
            "Avg Rate",
        ],
        theme,
    );

    let mut rows: Vec<Row> = summary
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Row::new(vec![
                Cell::from(s.platform.clone()),
                Cell::from(format_count(s.posts as u64)),
                Cell::from(format_count(s.views)),
                Cell::from(format_count(s.likes)),
                Cell::from(format_count(s.shares)),
                Cell::from(format_count(s.comments)),
                Cell::from(format_count(s.engagement)),
                Cell::from(format_percent(s.avg_engagement_rate, 2))
                    .style(theme.rate_style(s.avg_engagement_rate)),
            ])
            .style(stripe(i, theme))
        })
        .collect();

    // Post-weighted mean of the per-platform rates.
    let posts: usize = summary.iter().map(|s| s.posts).sum();
    let rate_sum: f64 = summary
        .iter()
        .map(|s| s.avg_engagement_rate * s.posts as f64)
        .sum();
    let overall_rate = if posts > 0 {
        rate_sum / posts as f64
    } else {
        0.0
    };
    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            Cell::from(format_count(posts as u64)),
            Cell::from(format_count(total(summary, |s| s.views))),
            Cell::from(format_count(total(summary, |s| s.likes))),
            Cell::from(format_count(total(summary, |s| s.shares))),
            Cell::from(format_count(total(summary, |s| s.comments))),
            Cell::from(format_count(total(summary, |s| s.engagement))),
            Cell::from(format_percent(overall_rate, 2)),
        ])
        .style(theme.table_total),
    );

    let widths = [
        Constraint::Length(11),
        Constraint::Length(7),
        Constraint::Length(13),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered("Platform Comparison", theme))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Column statistics ─────────────────────────────────────────────────────────

/// Render the count/mean/std/min/quartiles/max table, one row per column.
pub fn render_stats_table(frame: &mut Frame, area: Rect, stats: &[ColumnStats], theme: &Theme) {
    let header = header_row(
        &["Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"],
        theme,
    );

    let rows: Vec<Row> = stats
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Row::new(vec![
                Cell::from(s.column.label()).style(theme.label),
                Cell::from(format_count(s.count as u64)),
                Cell::from(format_number(s.mean, 2)),
                Cell::from(s.std.map_or_else(|| "-".to_string(), |v| format_number(v, 2))),
                Cell::from(format_number(s.min, 2)),
                Cell::from(format_number(s.p25, 2)),
                Cell::from(format_number(s.p50, 2)),
                Cell::from(format_number(s.p75, 2)),
                Cell::from(format_number(s.max, 2)),
            ])
            .style(stripe(i, theme))
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(7),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(13),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered("Statistical Summary", theme))
        .style(theme.text);
    frame.render_widget(table, area);
}

// ── Placeholders ──────────────────────────────────────────────────────────────

/// Shown in place of KPIs and charts when the filters match no posts.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No data available for the selected filters.",
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Select more platforms or content types, widen the date range, or press 'r' to reset.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(bordered("Social Media Dashboard", theme)),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

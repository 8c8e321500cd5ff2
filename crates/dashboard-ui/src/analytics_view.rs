//! The analytics tab: platform comparison and descriptive statistics over
//! the whole dataset.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::formatting::{format_compact, format_percent};
use dashboard_data::aggregator::PlatformMetrics;
use dashboard_data::analysis::AnalyticsReport;

use crate::components::bars::{BarConfig, HorizontalBar};
use crate::dashboard_view::category_bar_lines;
use crate::table_view;
use crate::themes::Theme;

pub fn render_analytics(frame: &mut Frame, area: Rect, report: &AnalyticsReport, theme: &Theme) {
    let Some(stats) = report.stats.as_deref() else {
        table_view::render_no_data(frame, area, theme);
        return;
    };

    let metrics_height = report.platform_metrics.len() as u16 + 2;
    let [metrics_row, stats_area, summary_area, bottom_row] = Layout::vertical([
        Constraint::Length(metrics_height.max(4)),
        Constraint::Length(stats.len() as u16 + 3),
        Constraint::Length(report.platform_summary.len() as u16 + 4),
        Constraint::Min(6),
    ])
    .areas(area);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(metrics_row);
    render_lines(
        frame,
        left,
        "Total Views by Platform",
        views_lines(&report.platform_metrics, left.width.saturating_sub(2), theme),
        theme,
    );
    render_lines(
        frame,
        right,
        "Avg Engagement Rate by Platform",
        rate_lines(&report.platform_metrics, right.width.saturating_sub(2), theme),
        theme,
    );

    table_view::render_stats_table(frame, stats_area, stats, theme);
    table_view::render_platform_summary_table(frame, summary_area, &report.platform_summary, theme);

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(bottom_row);
    render_lines(
        frame,
        left,
        "Top 10 Content Types",
        category_bar_lines(&report.top_content_types, left.width.saturating_sub(2), theme),
        theme,
    );
    table_view::render_top_posts_table(frame, right, "Top 10 Posts (all data)", &report.top_posts, theme);
}

fn render_lines(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {} ", title), theme.header));
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn bar_config(width: u16) -> BarConfig {
    let label_width = 12usize;
    BarConfig {
        label_width,
        width: width.saturating_sub(label_width as u16 + 9).max(1),
        ..BarConfig::default()
    }
}

/// One bar per platform, scaled to the platform with the most views.
pub fn views_lines<'a>(metrics: &'a [PlatformMetrics], width: u16, theme: &'a Theme) -> Vec<Line<'a>> {
    let max = metrics.iter().map(|m| m.total_views).max().unwrap_or(0) as f64;
    metrics
        .iter()
        .enumerate()
        .map(|(i, m)| {
            HorizontalBar::new(
                &m.platform,
                m.total_views as f64,
                max,
                format_compact(m.total_views as f64),
                theme,
            )
            .with_style(Style::default().fg(theme.series_color(i)))
            .with_config(bar_config(width))
            .to_line()
        })
        .collect()
}

/// One bar per platform, colored by engagement-rate band.
pub fn rate_lines<'a>(metrics: &'a [PlatformMetrics], width: u16, theme: &'a Theme) -> Vec<Line<'a>> {
    let max = metrics
        .iter()
        .map(|m| m.avg_engagement_rate)
        .fold(0.0_f64, f64::max);
    metrics
        .iter()
        .map(|m| {
            HorizontalBar::new(
                &m.platform,
                m.avg_engagement_rate,
                max,
                format_percent(m.avg_engagement_rate, 2),
                theme,
            )
            .with_style(theme.rate_style(m.avg_engagement_rate))
            .with_config(bar_config(width))
            .to_line()
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::{DataView, Dataset, PostRecord};
    use dashboard_data::analysis::build_analytics_report;
    use dashboard_data::deriver::derive_metrics;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn metrics() -> Vec<PlatformMetrics> {
        vec![
            PlatformMetrics {
                platform: "Instagram".into(),
                total_views: 50,
                total_engagement: 3,
                avg_engagement_rate: 4.0,
            },
            PlatformMetrics {
                platform: "TikTok".into(),
                total_views: 150,
                total_engagement: 23,
                avg_engagement_rate: 13.0,
            },
        ]
    }

    fn dataset() -> Dataset {
        let day = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let post = |row: usize, platform: &str, views: u64, likes: u64| PostRecord {
            row,
            platform: platform.to_string(),
            content_type: "Video".to_string(),
            post_date: day,
            views,
            likes,
            shares: 1,
            comments: 1,
            engagement: 0,
            engagement_rate: 0.0,
        };
        derive_metrics(Dataset::new(vec![
            post(0, "TikTok", 100, 18),
            post(1, "Instagram", 40, 2),
            post(2, "YouTube", 900, 70),
        ]))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_views_lines_scaled_to_largest_platform() {
        let theme = Theme::dark();
        let data = metrics();
        // 41 - 12 label - 9 value = 20 bar columns.
        let lines = views_lines(&data, 41, &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[1].content.chars().count(), 20);
        assert_eq!(lines[0].spans[1].content.chars().count(), 7);
    }

    #[test]
    fn test_rate_lines_use_rate_bands() {
        let theme = Theme::dark();
        let data = metrics();
        let lines = rate_lines(&data, 41, &theme);
        assert_eq!(lines[0].spans[1].style, theme.rate_low);
        assert_eq!(lines[1].spans[1].style, theme.rate_high);
        assert!(lines[1].spans[3].content.contains("13.00%"));
    }

    #[test]
    fn test_render_analytics() {
        let ds = dataset();
        let report = build_analytics_report(&ds.view());
        let backend = TestBackend::new(140, 50);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_analytics(frame, area, &report, &theme);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Statistical Summary"));
        assert!(text.contains("Platform Comparison"));
        assert!(text.contains("TOTAL"));
        assert!(text.contains("YouTube"));
    }

    #[test]
    fn test_render_analytics_empty_report_shows_warning() {
        let report = build_analytics_report(&DataView::default());
        let backend = TestBackend::new(100, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_analytics(frame, area, &report, &theme);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("No data available"));
    }
}

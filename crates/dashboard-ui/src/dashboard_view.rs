//! The dashboard tab: KPIs and charts for the current filter selection.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use dashboard_core::formatting::{format_compact, format_count, format_percent};
use dashboard_data::aggregator::{CategoryTotal, Histogram, KpiSummary, MonthlyPoint, ScatterSeries};
use dashboard_data::analysis::DashboardSnapshot;

use crate::components::bars::{BarConfig, HorizontalBar};
use crate::table_view;
use crate::themes::Theme;

/// Render the dashboard tab into `area`, or the no-data warning when the
/// filters match nothing.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&DashboardSnapshot>,
    theme: &Theme,
) {
    let Some(snap) = snapshot else {
        table_view::render_no_data(frame, area, theme);
        return;
    };

    let [kpi_area, row1, row2, row3] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Percentage(32),
        Constraint::Percentage(32),
        Constraint::Min(6),
    ])
    .areas(area);

    render_kpis(frame, kpi_area, &snap.kpis, theme);

    let [left, right] = halves(row1);
    render_platform_engagement(frame, left, &snap.platform_engagement, theme);
    render_content_types(frame, right, &snap.top_content_types, theme);

    let [left, right] = halves(row2);
    render_monthly(frame, left, &snap.monthly, theme);
    render_scatter(frame, right, &snap.scatter, theme);

    let [left, right] = halves(row3);
    render_histogram(frame, left, &snap.rate_histogram, theme);
    table_view::render_top_posts_table(frame, right, "Top 10 Posts by Engagement", &snap.top_posts, theme);
}

fn halves(area: Rect) -> [Rect; 2] {
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
}

fn titled(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(Span::styled(format!(" {} ", title), theme.header))
}

// ── KPIs ──────────────────────────────────────────────────────────────────────

/// `(label, value, value style)` for each KPI card.
pub fn kpi_cards(kpis: &KpiSummary, theme: &Theme) -> Vec<(&'static str, String, Style)> {
    vec![
        ("Total Posts", format_count(kpis.total_posts as u64), theme.value),
        ("Total Views", format_count(kpis.total_views), theme.value),
        (
            "Total Engagement",
            format_count(kpis.total_engagement),
            theme.value,
        ),
        (
            "Avg Engagement Rate",
            format_percent(kpis.avg_engagement_rate, 2),
            theme.rate_style(kpis.avg_engagement_rate),
        ),
    ]
}

fn render_kpis(frame: &mut Frame, area: Rect, kpis: &KpiSummary, theme: &Theme) {
    let cards = kpi_cards(kpis, theme);
    let areas = Layout::horizontal(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(area);

    for ((label, value, style), card_area) in cards.into_iter().zip(areas.iter()) {
        let text = Text::from(vec![
            Line::from(Span::styled(label, theme.label)),
            Line::from(Span::styled(value, style)),
        ]);
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.table_border),
            ),
            *card_area,
        );
    }
}

// ── Category charts ───────────────────────────────────────────────────────────

fn render_platform_engagement(
    frame: &mut Frame,
    area: Rect,
    totals: &[CategoryTotal],
    theme: &Theme,
) {
    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Bar::default()
                .value(t.engagement)
                .label(Line::from(t.label.clone()))
                .text_value(format_compact(t.engagement as f64))
                .style(Style::default().fg(theme.series_color(i)))
        })
        .collect();

    let inner_width = area.width.saturating_sub(2);
    let slots = totals.len().max(1) as u16;
    let bar_width = (inner_width / slots).saturating_sub(1).clamp(1, 12);

    let chart = BarChart::default()
        .block(titled("Total Engagement by Platform", theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .value_style(theme.bold)
        .label_style(theme.label);
    frame.render_widget(chart, area);
}

fn render_content_types(frame: &mut Frame, area: Rect, totals: &[CategoryTotal], theme: &Theme) {
    let lines = category_bar_lines(totals, area.width.saturating_sub(2), theme);
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(titled("Top Content Types by Engagement", theme)),
        area,
    );
}

/// Horizontal bar lines for `totals`, sized to fit `width` columns.
pub fn category_bar_lines<'a>(totals: &'a [CategoryTotal], width: u16, theme: &'a Theme) -> Vec<Line<'a>> {
    let max = totals.iter().map(|t| t.engagement).max().unwrap_or(0) as f64;
    let label_width = 14usize;
    let value_width = 8u16;
    let bar_width = width
        .saturating_sub(label_width as u16 + value_width)
        .max(1);

    totals
        .iter()
        .map(|t| {
            HorizontalBar::new(
                &t.label,
                t.engagement as f64,
                max,
                format_compact(t.engagement as f64),
                theme,
            )
            .with_config(BarConfig {
                label_width,
                width: bar_width,
                ..BarConfig::default()
            })
            .to_line()
        })
        .collect()
}

// ── Time series and scatter ───────────────────────────────────────────────────

fn render_monthly(frame: &mut Frame, area: Rect, monthly: &[MonthlyPoint], theme: &Theme) {
    let points: Vec<(f64, f64)> = monthly
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.engagement as f64))
        .collect();
    let y_max = monthly.iter().map(|p| p.engagement).max().unwrap_or(0) as f64;
    let x_max = (monthly.len().saturating_sub(1)).max(1) as f64;

    let x_labels: Vec<String> = match (monthly.first(), monthly.last()) {
        (Some(first), Some(last)) if monthly.len() > 1 => vec![
            first.month.format("%Y-%m").to_string(),
            monthly[monthly.len() / 2].month.format("%Y-%m").to_string(),
            last.month.format("%Y-%m").to_string(),
        ],
        (Some(only), _) => vec![only.month.format("%Y-%m").to_string()],
        _ => Vec::new(),
    };

    let datasets = vec![Dataset::default()
        .name("Engagement")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.series_color(0)))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(titled("Monthly Engagement Trend", theme))
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, nice_upper(y_max)])
                .labels(vec![
                    "0".to_string(),
                    format_compact(nice_upper(y_max) / 2.0),
                    format_compact(nice_upper(y_max)),
                ]),
        );
    frame.render_widget(chart, area);
}

fn render_scatter(frame: &mut Frame, area: Rect, series: &[ScatterSeries], theme: &Theme) {
    let (x_bounds, y_bounds) = scatter_bounds(series);

    let datasets: Vec<Dataset> = series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Dataset::default()
                .name(s.platform.clone())
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(theme.series_color(i)))
                .data(&s.points)
        })
        .collect();

    let log_labels = |[lo, hi]: [f64; 2]| -> Vec<String> {
        vec![
            format_compact(10f64.powf(lo)),
            format_compact(10f64.powf(hi)),
        ]
    };

    let chart = Chart::new(datasets)
        .block(titled("Views vs Engagement (log scale)", theme))
        .x_axis(
            Axis::default()
                .title("Views")
                .style(theme.axis)
                .bounds(x_bounds)
                .labels(log_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Engagement")
                .style(theme.axis)
                .bounds(y_bounds)
                .labels(log_labels(y_bounds)),
        );
    frame.render_widget(chart, area);
}

/// Axis bounds covering every point, padded when all points share a value.
pub fn scatter_bounds(series: &[ScatterSeries]) -> ([f64; 2], [f64; 2]) {
    let points = series.iter().flat_map(|s| s.points.iter());
    let mut x = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y = [f64::INFINITY, f64::NEG_INFINITY];
    for &(px, py) in points {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }
    (pad_bounds(x), pad_bounds(y))
}

fn pad_bounds([lo, hi]: [f64; 2]) -> [f64; 2] {
    if !lo.is_finite() || !hi.is_finite() {
        [0.0, 1.0]
    } else if hi - lo < f64::EPSILON {
        [lo - 0.5, hi + 0.5]
    } else {
        [lo, hi]
    }
}

/// Smallest "round" number ≥ `value` (1, 2 or 5 times a power of ten).
pub fn nice_upper(value: f64) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    for step in [1.0, 2.0, 5.0, 10.0] {
        if step * magnitude >= value {
            return step * magnitude;
        }
    }
    10.0 * magnitude
}

// ── Histogram ─────────────────────────────────────────────────────────────────

/// Histogram columns as `(bin centre, count)` and the vertical mean line as
/// two points from the axis to the tallest column.
pub fn histogram_series(histogram: &Histogram) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let columns = histogram
        .bins
        .iter()
        .map(|b| ((b.lower + b.upper) / 2.0, b.count as f64))
        .collect();
    let top = histogram.max_count() as f64;
    let mean_line = vec![(histogram.mean, 0.0), (histogram.mean, top)];
    (columns, mean_line)
}

fn render_histogram(frame: &mut Frame, area: Rect, histogram: &Histogram, theme: &Theme) {
    let (columns, mean_line) = histogram_series(histogram);

    let first = histogram.bins.first().map_or(0.0, |b| b.lower);
    let last = histogram.bins.last().map_or(1.0, |b| b.upper);
    let x_bounds = pad_bounds([first, last]);
    let y_top = nice_upper(histogram.max_count() as f64);

    let datasets = vec![
        Dataset::default()
            .name("Posts")
            .marker(Marker::Braille)
            .graph_type(GraphType::Bar)
            .style(theme.bar_fill)
            .data(&columns),
        Dataset::default()
            .name(format!("Mean {}", format_percent(histogram.mean, 2)))
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.reference_line)
            .data(&mean_line),
    ];

    let chart = Chart::new(datasets)
        .block(titled("Engagement Rate Distribution", theme))
        .x_axis(
            Axis::default()
                .title("Rate")
                .style(theme.axis)
                .bounds(x_bounds)
                .labels(vec![
                    format_percent(x_bounds[0], 1),
                    format_percent(x_bounds[1], 1),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_top])
                .labels(vec!["0".to_string(), format_compact(y_top)]),
        );
    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Read-only aggregations over a [`DataView`].
//!
//! Every function here is pure: it walks the view once (or sorts a copy of
//! it) and returns plain structs. Grouped results keep first-encountered
//! group order before any stable sort, so ties fall back to the order in
//! which the groups first appear in the source file.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use dashboard_core::models::{DataView, PostRecord};
use dashboard_core::time_utils::month_start;
use serde::Serialize;

// ── Result types ──────────────────────────────────────────────────────────────

/// Headline numbers for the filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_posts: usize,
    pub total_views: u64,
    pub total_engagement: u64,
    pub avg_engagement_rate: f64,
}

/// Summed engagement for one platform or content type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub engagement: u64,
}

/// Engagement summed over one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyPoint {
    /// First day of the month.
    pub month: NaiveDate,
    pub engagement: u64,
}

/// A post projected to the columns shown in the top-posts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPost {
    pub row: usize,
    pub platform: String,
    pub content_type: String,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub engagement: u64,
}

impl From<&PostRecord> for TopPost {
    fn from(r: &PostRecord) -> Self {
        Self {
            row: r.row,
            platform: r.platform.clone(),
            content_type: r.content_type.clone(),
            views: r.views,
            likes: r.likes,
            shares: r.shares,
            comments: r.comments,
            engagement: r.engagement,
        }
    }
}

/// Views, engagement and mean rate for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformMetrics {
    pub platform: String,
    pub total_views: u64,
    pub total_engagement: u64,
    pub avg_engagement_rate: f64,
}

/// One row of the platform comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformSummary {
    pub platform: String,
    pub posts: usize,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    pub engagement: u64,
    pub avg_engagement_rate: f64,
}

/// Numeric columns covered by [`describe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatColumn {
    Views,
    Likes,
    Shares,
    Comments,
    Engagement,
    EngagementRate,
}

impl StatColumn {
    pub const ALL: [StatColumn; 6] = [
        StatColumn::Views,
        StatColumn::Likes,
        StatColumn::Shares,
        StatColumn::Comments,
        StatColumn::Engagement,
        StatColumn::EngagementRate,
    ];

    /// Column header as it appears in the source table.
    pub fn label(self) -> &'static str {
        match self {
            StatColumn::Views => "Views",
            StatColumn::Likes => "Likes",
            StatColumn::Shares => "Shares",
            StatColumn::Comments => "Comments",
            StatColumn::Engagement => "Engagement",
            StatColumn::EngagementRate => "Engagement_Rate",
        }
    }

    fn value(self, r: &PostRecord) -> f64 {
        match self {
            StatColumn::Views => r.views as f64,
            StatColumn::Likes => r.likes as f64,
            StatColumn::Shares => r.shares as f64,
            StatColumn::Comments => r.comments as f64,
            StatColumn::Engagement => r.engagement as f64,
            StatColumn::EngagementRate => r.engagement_rate,
        }
    }
}

/// Summary statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: StatColumn,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of engagement rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Mean of the binned values, drawn as a reference line.
    pub mean: f64,
}

impl Histogram {
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// `(log10 views, log10 engagement)` points for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub platform: String,
    pub points: Vec<(f64, f64)>,
}

// ── Core aggregations ─────────────────────────────────────────────────────────

/// Post count, total views and mean engagement rate.
///
/// `None` for an empty view: there is no mean of nothing.
pub fn kpi_summary(view: &DataView<'_>) -> Option<KpiSummary> {
    if view.is_empty() {
        return None;
    }
    let total_views = view.iter().map(|r| r.views).fold(0, u64::saturating_add);
    let total_engagement = view
        .iter()
        .map(|r| r.engagement)
        .fold(0, u64::saturating_add);
    let rate_sum: f64 = view.iter().map(|r| r.engagement_rate).sum();

    Some(KpiSummary {
        total_posts: view.len(),
        total_views,
        total_engagement,
        avg_engagement_rate: rate_sum / view.len() as f64,
    })
}

/// Total engagement per platform, largest first.
pub fn engagement_by_platform(view: &DataView<'_>) -> Vec<CategoryTotal> {
    let mut totals = group_engagement(view, |r| r.platform.as_str());
    sort_desc(&mut totals);
    totals
}

/// The `k` content types with the most engagement, largest first.
pub fn top_content_types(view: &DataView<'_>, k: usize) -> Vec<CategoryTotal> {
    let mut totals = group_engagement(view, |r| r.content_type.as_str());
    sort_desc(&mut totals);
    totals.truncate(k);
    totals
}

/// Engagement per calendar month, oldest first. Months without posts are
/// left out.
pub fn monthly_engagement(view: &DataView<'_>) -> Vec<MonthlyPoint> {
    let mut map: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for r in view.iter() {
        let total = map.entry(month_start(r.post_date)).or_default();
        *total = total.saturating_add(r.engagement);
    }
    map.into_iter()
        .map(|(month, engagement)| MonthlyPoint { month, engagement })
        .collect()
}

/// The `n` most engaging posts. Ties keep source row order.
pub fn top_posts(view: &DataView<'_>, n: usize) -> Vec<TopPost> {
    let mut records: Vec<&PostRecord> = view.records().to_vec();
    records.sort_by(|a, b| b.engagement.cmp(&a.engagement));
    records.into_iter().take(n).map(TopPost::from).collect()
}

// ── Platform breakdowns ───────────────────────────────────────────────────────

/// Views, engagement and mean rate per platform, ordered by platform name.
pub fn platform_metrics(view: &DataView<'_>) -> Vec<PlatformMetrics> {
    platform_summary(view)
        .into_iter()
        .map(|s| PlatformMetrics {
            platform: s.platform,
            total_views: s.views,
            total_engagement: s.engagement,
            avg_engagement_rate: s.avg_engagement_rate,
        })
        .collect()
}

/// Full per-platform comparison, ordered by platform name.
pub fn platform_summary(view: &DataView<'_>) -> Vec<PlatformSummary> {
    #[derive(Default)]
    struct Acc {
        posts: usize,
        views: u64,
        likes: u64,
        shares: u64,
        comments: u64,
        engagement: u64,
        rate_sum: f64,
    }

    let mut map: BTreeMap<&str, Acc> = BTreeMap::new();
    for r in view.iter() {
        let acc = map.entry(r.platform.as_str()).or_default();
        acc.posts += 1;
        acc.views = acc.views.saturating_add(r.views);
        acc.likes = acc.likes.saturating_add(r.likes);
        acc.shares = acc.shares.saturating_add(r.shares);
        acc.comments = acc.comments.saturating_add(r.comments);
        acc.engagement = acc.engagement.saturating_add(r.engagement);
        acc.rate_sum += r.engagement_rate;
    }

    map.into_iter()
        .map(|(platform, acc)| PlatformSummary {
            platform: platform.to_string(),
            posts: acc.posts,
            views: acc.views,
            likes: acc.likes,
            shares: acc.shares,
            comments: acc.comments,
            engagement: acc.engagement,
            avg_engagement_rate: acc.rate_sum / acc.posts as f64,
        })
        .collect()
}

// ── Distributions ─────────────────────────────────────────────────────────────

/// Count, mean, sample std, min, quartiles and max for each numeric column.
///
/// Quartiles use linear interpolation between closest ranks. `None` for an
/// empty view.
pub fn describe(view: &DataView<'_>) -> Option<Vec<ColumnStats>> {
    if view.is_empty() {
        return None;
    }
    let stats = StatColumn::ALL
        .iter()
        .map(|&column| {
            let values: Vec<f64> = view.iter().map(|r| column.value(r)).collect();
            column_stats(column, values)
        })
        .collect();
    Some(stats)
}

/// Equal-width histogram of engagement rates over `bins` buckets.
///
/// A range with no spread is widened by 0.5 on each side. The maximum value
/// is counted in the last bin. `None` for an empty view.
pub fn engagement_rate_histogram(view: &DataView<'_>, bins: usize) -> Option<Histogram> {
    if view.is_empty() {
        return None;
    }
    let bins = bins.max(1);
    let rates: Vec<f64> = view.iter().map(|r| r.engagement_rate).collect();

    let mut lo = rates.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = rates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo <= f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for rate in &rates {
        let idx = (((rate - lo) / width).floor() as usize).min(bins - 1);
        out[idx].count += 1;
    }

    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    Some(Histogram { bins: out, mean })
}

/// Log-scaled views vs. engagement, one series per platform in
/// first-encountered order. Posts with zero views or zero engagement have
/// no place on a log axis and are skipped.
pub fn views_engagement_scatter(view: &DataView<'_>) -> Vec<ScatterSeries> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<ScatterSeries> = Vec::new();

    for r in view.iter() {
        if r.views == 0 || r.engagement == 0 {
            continue;
        }
        let point = ((r.views as f64).log10(), (r.engagement as f64).log10());
        match index.get(r.platform.as_str()) {
            Some(&i) => series[i].points.push(point),
            None => {
                index.insert(r.platform.as_str(), series.len());
                series.push(ScatterSeries {
                    platform: r.platform.clone(),
                    points: vec![point],
                });
            }
        }
    }
    series
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Sum engagement by `key`, groups in first-encountered order.
fn group_engagement<'a>(
    view: &DataView<'a>,
    key: impl Fn(&'a PostRecord) -> &'a str,
) -> Vec<CategoryTotal> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<CategoryTotal> = Vec::new();

    for r in view.iter() {
        let k = key(r);
        match index.get(k) {
            Some(&i) => {
                groups[i].engagement = groups[i].engagement.saturating_add(r.engagement)
            }
            None => {
                index.insert(k, groups.len());
                groups.push(CategoryTotal {
                    label: k.to_string(),
                    engagement: r.engagement,
                });
            }
        }
    }
    groups
}

/// Stable descending sort, so equal totals stay in first-seen order.
fn sort_desc(totals: &mut [CategoryTotal]) {
    totals.sort_by(|a, b| b.engagement.cmp(&a.engagement));
}

fn column_stats(column: StatColumn, mut values: Vec<f64>) -> ColumnStats {
    values.sort_by(|a, b| a.total_cmp(b));
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count >= 2).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    });

    ColumnStats {
        column,
        count,
        mean,
        std,
        min: values[0],
        p25: quantile(&values, 0.25),
        p50: quantile(&values, 0.50),
        p75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

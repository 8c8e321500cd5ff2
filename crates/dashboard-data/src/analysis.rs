//! Load pipeline and the bundles handed to the UI layer.
//!
//! [`load_and_prepare`] runs Loader → Metric Deriver once at startup;
//! [`build_snapshot`] and [`build_analytics_report`] collect the aggregations
//! each tab renders.

use std::path::Path;
use std::time::Instant;

use chrono_tz::Tz;
use dashboard_core::error::Result;
use dashboard_core::models::{DataView, Dataset};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::{
    describe, engagement_by_platform, engagement_rate_histogram, kpi_summary, monthly_engagement,
    platform_metrics, platform_summary, top_content_types, top_posts, views_engagement_scatter,
    CategoryTotal, ColumnStats, Histogram, KpiSummary, MonthlyPoint, PlatformMetrics,
    PlatformSummary, ScatterSeries, TopPost,
};
use crate::deriver::derive_metrics;
use crate::reader::load_posts;

/// Content types shown on the dashboard tab.
pub const DASHBOARD_TOP_CONTENT_TYPES: usize = 8;
/// Content types shown on the analytics tab.
pub const ANALYTICS_TOP_CONTENT_TYPES: usize = 10;
pub const TOP_POSTS: usize = 10;
pub const HISTOGRAM_BINS: usize = 30;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the dashboard tab draws for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub kpis: KpiSummary,
    pub platform_engagement: Vec<CategoryTotal>,
    pub top_content_types: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyPoint>,
    pub top_posts: Vec<TopPost>,
    pub rate_histogram: Histogram,
    pub scatter: Vec<ScatterSeries>,
}

/// Tables and charts of the analytics tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub platform_metrics: Vec<PlatformMetrics>,
    pub platform_summary: Vec<PlatformSummary>,
    /// `None` when the dataset is empty.
    pub stats: Option<Vec<ColumnStats>>,
    pub top_content_types: Vec<CategoryTotal>,
    pub top_posts: Vec<TopPost>,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Load the posts table at `path` and derive engagement metrics.
pub fn load_and_prepare(path: &Path, tz: Tz) -> Result<Dataset> {
    let start = Instant::now();
    let dataset = derive_metrics(load_posts(path, tz)?);
    info!(
        "Prepared {} posts in {:.3}s (timezone {})",
        dataset.len(),
        start.elapsed().as_secs_f64(),
        tz
    );
    Ok(dataset)
}

/// Aggregate a filtered view for the dashboard tab.
///
/// Returns `None` for an empty view; the UI shows a warning instead of KPIs
/// and charts.
pub fn build_snapshot(view: &DataView<'_>) -> Option<DashboardSnapshot> {
    let kpis = kpi_summary(view)?;
    let rate_histogram = engagement_rate_histogram(view, HISTOGRAM_BINS)?;

    let snapshot = DashboardSnapshot {
        kpis,
        platform_engagement: engagement_by_platform(view),
        top_content_types: top_content_types(view, DASHBOARD_TOP_CONTENT_TYPES),
        monthly: monthly_engagement(view),
        top_posts: top_posts(view, TOP_POSTS),
        rate_histogram,
        scatter: views_engagement_scatter(view),
    };
    debug!(
        "Snapshot: {} posts, {} platforms, {} months",
        snapshot.kpis.total_posts,
        snapshot.platform_engagement.len(),
        snapshot.monthly.len()
    );
    Some(snapshot)
}

/// Aggregate a view (normally the whole dataset) for the analytics tab.
pub fn build_analytics_report(view: &DataView<'_>) -> AnalyticsReport {
    AnalyticsReport {
        platform_metrics: platform_metrics(view),
        platform_summary: platform_summary(view),
        stats: describe(view),
        top_content_types: top_content_types(view, ANALYTICS_TOP_CONTENT_TYPES),
        top_posts: top_posts(view, TOP_POSTS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const CSV: &str = "Platform,Content_Type,Post_Date,Views,Likes,Shares,Comments\n\
                       TikTok,video,2024-01-05,100,10,5,5\n\
                       Instagram,image,2024-01-20,0,2,0,1\n\
                       TikTok,video,2024-02-01,50,1,1,1\n";

    fn prepared(tmp: &TempDir) -> Dataset {
        let path = tmp.path().join("posts.csv");
        std::fs::File::create(&path)
            .and_then(|mut f| f.write_all(CSV.as_bytes()))
            .expect("write");
        load_and_prepare(&path, Tz::UTC).expect("load")
    }

    // ── load_and_prepare ──────────────────────────────────────────────────────

    #[test]
    fn test_load_and_prepare_derives_metrics() {
        let tmp = TempDir::new().expect("tempdir");
        let ds = prepared(&tmp);
        let engagement: Vec<u64> = ds.records().iter().map(|r| r.engagement).collect();
        assert_eq!(engagement, vec![20, 3, 3]);
        for (r, want) in ds.records().iter().zip([20.0, 0.0, 6.0]) {
            assert!((r.engagement_rate - want).abs() < 1e-9);
        }
    }

    // ── build_snapshot ────────────────────────────────────────────────────────

    #[test]
    fn test_build_snapshot_bundles_aggregations() {
        let tmp = TempDir::new().expect("tempdir");
        let ds = prepared(&tmp);
        let snap = build_snapshot(&ds.view()).unwrap();
        assert_eq!(snap.kpis.total_posts, 3);
        assert_eq!(snap.platform_engagement[0].label, "TikTok");
        assert_eq!(snap.monthly.len(), 2);
        assert_eq!(snap.top_posts.len(), 3);
        assert_eq!(snap.rate_histogram.bins.len(), HISTOGRAM_BINS);
        assert_eq!(snap.scatter.len(), 1);
    }

    #[test]
    fn test_build_snapshot_empty_view_is_none() {
        assert!(build_snapshot(&DataView::default()).is_none());
    }

    // ── build_analytics_report ────────────────────────────────────────────────

    #[test]
    fn test_build_analytics_report() {
        let tmp = TempDir::new().expect("tempdir");
        let ds = prepared(&tmp);
        let report = build_analytics_report(&ds.view());
        assert_eq!(report.platform_metrics.len(), 2);
        assert_eq!(report.platform_summary[0].platform, "Instagram");
        assert_eq!(report.stats.as_ref().map(Vec::len), Some(6));
        assert_eq!(report.top_content_types.len(), 2);
        assert_eq!(report.top_posts[0].engagement, 20);
    }

    #[test]
    fn test_analytics_report_on_empty_view() {
        let report = build_analytics_report(&DataView::default());
        assert!(report.platform_metrics.is_empty());
        assert!(report.stats.is_none());
        assert!(report.top_posts.is_empty());
    }
}

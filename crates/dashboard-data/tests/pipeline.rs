//! End-to-end checks: CSV on disk → prepared dataset → filters → aggregates.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;
use dashboard_data::aggregator::{
    engagement_by_platform, kpi_summary, monthly_engagement, top_content_types, top_posts,
};
use dashboard_data::analysis::{build_snapshot, load_and_prepare};
use dashboard_data::core::models::{Dataset, DateRange, FilterSelection};
use dashboard_data::filter::{apply_filters, filter_options};
use tempfile::TempDir;

const HEADER: &str = "Post_ID,Post_Date,Platform,Hashtag,Content_Type,Region,Views,Likes,Shares,Comments,Engagement_Level";

fn write_csv(tmp: &TempDir, body: &str) -> PathBuf {
    let path = tmp.path().join("Viral_Social_Media_Trends.csv");
    let mut f = std::fs::File::create(&path).expect("create");
    writeln!(f, "{HEADER}").expect("header");
    f.write_all(body.as_bytes()).expect("body");
    path
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A mixed fixture: several platforms and content types across five months.
fn fixture(tmp: &TempDir) -> Dataset {
    let body = "\
Post_1,2024-01-03,TikTok,#Challenge,Video,USA,120000,9000,1500,700,High
Post_2,2024-01-17,Instagram,#Fashion,Reel,UK,80000,6400,300,410,Medium
Post_3,2024-02-02,YouTube,#Gaming,Shorts,Canada,0,12,3,4,Low
Post_4,2024-02-28 23:45:00,Twitter,#Tech,Post,India,15000,220,90,35,Low
Post_5,2024-03-09,TikTok,#Dance,Live Stream,Brazil,240000,21000,5200,1800,High
Post_6,2024-03-21,Instagram,#Food,Video,USA,56000,3100,120,260,Medium
Post_7,2024-05-11,YouTube,#Music,Video,UK,310000,14000,2100,3300,High
Post_8,2024-05-30,Twitter,#Viral,Tweet,Australia,9000,400,130,45,Low
";
    let path = write_csv(tmp, body);
    load_and_prepare(&path, Tz::UTC).expect("load")
}

fn full_selection(ds: &Dataset) -> FilterSelection {
    FilterSelection::all(&filter_options(ds))
}

// ── Derived metrics ───────────────────────────────────────────────────────────

#[test]
fn engagement_rate_is_zero_exactly_when_views_are_zero() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    for r in ds.records() {
        assert_eq!(r.engagement, r.likes + r.shares + r.comments);
        if r.views == 0 {
            assert_eq!(r.engagement_rate, 0.0);
        } else {
            let expected = r.engagement as f64 / r.views as f64 * 100.0;
            assert!((r.engagement_rate - expected).abs() < 1e-9);
        }
    }
}

// ── Filter engine ─────────────────────────────────────────────────────────────

#[test]
fn full_selection_returns_whole_dataset() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let view = apply_filters(&ds, &full_selection(&ds));
    assert_eq!(view.len(), ds.len());
    assert_eq!(view.rows(), (0..ds.len()).collect::<Vec<_>>());
}

#[test]
fn filtered_view_is_an_idempotent_subset() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let mut sel = full_selection(&ds);
    sel.platforms = ["TikTok", "YouTube"].iter().map(|s| s.to_string()).collect();
    sel.content_types.remove("Shorts");
    sel.date_range = DateRange::new(day("2024-01-01"), day("2024-04-30"));

    let first = apply_filters(&ds, &sel);
    for r in first.iter() {
        assert!(sel.platforms.contains(&r.platform));
        assert!(sel.content_types.contains(&r.content_type));
        assert!(sel.date_range.contains(r.post_date));
    }
    assert_eq!(first.rows(), vec![0, 4]);
    assert_eq!(apply_filters(&ds, &sel).rows(), first.rows());
}

#[test]
fn post_late_on_end_date_is_included() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let mut sel = full_selection(&ds);
    sel.date_range = DateRange::new(day("2024-02-01"), day("2024-02-28"));
    assert_eq!(apply_filters(&ds, &sel).rows(), vec![2, 3]);
}

#[test]
fn absent_platform_gives_empty_view_and_no_kpis() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let mut sel = full_selection(&ds);
    sel.platforms = BTreeSet::from(["LinkedIn".to_string()]);
    let view = apply_filters(&ds, &sel);
    assert!(view.is_empty());
    assert!(kpi_summary(&view).is_none());
    assert!(build_snapshot(&view).is_none());
}

// ── Aggregator ────────────────────────────────────────────────────────────────

#[test]
fn platform_totals_sum_to_view_total() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let view = ds.view();
    let grouped: u64 = engagement_by_platform(&view).iter().map(|t| t.engagement).sum();
    let direct: u64 = view.iter().map(|r| r.engagement).sum();
    assert_eq!(grouped, direct);
}

#[test]
fn top_n_bounded_and_sorted() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let view = ds.view();

    let types = top_content_types(&view, 8);
    assert!(types.len() <= 8);
    assert_eq!(types.len(), 6);
    assert!(types.windows(2).all(|w| w[0].engagement >= w[1].engagement));

    let posts = top_posts(&view, 10);
    assert_eq!(posts.len(), 8);
    assert!(posts.windows(2).all(|w| w[0].engagement >= w[1].engagement));
    assert_eq!(posts[0].platform, "TikTok");
}

#[test]
fn monthly_series_skips_empty_months() {
    let tmp = TempDir::new().expect("tempdir");
    let ds = fixture(&tmp);
    let months: Vec<NaiveDate> = monthly_engagement(&ds.view()).iter().map(|p| p.month).collect();
    assert_eq!(
        months,
        vec![day("2024-01-01"), day("2024-02-01"), day("2024-03-01"), day("2024-05-01")]
    );
}

// ── Worked example ────────────────────────────────────────────────────────────

#[test]
fn three_row_example() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("small.csv");
    std::fs::write(
        &path,
        "Platform,Content_Type,Post_Date,Views,Likes,Shares,Comments\n\
         TikTok,video,2024-01-05,100,10,5,5\n\
         Instagram,image,2024-01-20,0,2,0,1\n\
         TikTok,video,2024-02-01,50,1,1,1\n",
    )
    .expect("write");
    let ds = load_and_prepare(&path, Tz::UTC).expect("load");

    let engagement: Vec<u64> = ds.records().iter().map(|r| r.engagement).collect();
    assert_eq!(engagement, vec![20, 3, 3]);
    let rates: Vec<f64> = ds.records().iter().map(|r| r.engagement_rate).collect();
    for (got, want) in rates.iter().zip([20.0, 0.0, 6.0]) {
        assert!((got - want).abs() < 1e-9);
    }

    let mut sel = full_selection(&ds);
    sel.platforms = BTreeSet::from(["TikTok".to_string()]);
    let tiktok = apply_filters(&ds, &sel);
    assert_eq!(tiktok.rows(), vec![0, 2]);

    let monthly: Vec<(NaiveDate, u64)> = monthly_engagement(&tiktok)
        .into_iter()
        .map(|p| (p.month, p.engagement))
        .collect();
    assert_eq!(monthly, vec![(day("2024-01-01"), 20), (day("2024-02-01"), 3)]);
}

// ── Large counters ────────────────────────────────────────────────────────────

#[test]
fn counts_near_u64_max_load_and_aggregate_without_panicking() {
    let tmp = TempDir::new().expect("tempdir");
    let body = "\
Post_1,2024-01-03,TikTok,#Challenge,Video,USA,18446744073709551615,18446744073709551615,1,1,High
Post_2,2024-01-04,TikTok,#Challenge,Video,USA,1,1,1,1,Low
";
    let path = write_csv(&tmp, body);
    let ds = load_and_prepare(&path, Tz::UTC).expect("load");

    let kpis = kpi_summary(&ds.view()).expect("kpis");
    assert_eq!(kpis.total_posts, 2);
    assert_eq!(kpis.total_views, u64::MAX);
    assert_eq!(kpis.total_engagement, u64::MAX);
    assert_eq!(engagement_by_platform(&ds.view())[0].engagement, u64::MAX);
    assert_eq!(monthly_engagement(&ds.view())[0].engagement, u64::MAX);

    let snap = build_snapshot(&ds.view()).expect("snapshot");
    assert_eq!(snap.top_posts[0].engagement, u64::MAX);
}

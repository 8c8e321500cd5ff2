//! CSV loading for the posts table.
//!
//! Reads the source file into [`PostRecord`]s in file order. Every row must
//! parse; the first bad date or number aborts the load with
//! [`DashboardError::MalformedData`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono_tz::Tz;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Dataset, PostRecord};
use dashboard_core::time_utils::PostDateParser;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Column headers that must be present in the source file.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Platform",
    "Content_Type",
    "Post_Date",
    "Views",
    "Likes",
    "Shares",
    "Comments",
];

/// One CSV row before validation. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawPostRow {
    #[serde(rename = "Platform")]
    platform: String,
    #[serde(rename = "Content_Type")]
    content_type: String,
    #[serde(rename = "Post_Date")]
    post_date: String,
    #[serde(rename = "Views")]
    views: String,
    #[serde(rename = "Likes")]
    likes: String,
    #[serde(rename = "Shares")]
    shares: String,
    #[serde(rename = "Comments")]
    comments: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the posts table at `path`, interpreting offset-bearing dates in `tz`.
///
/// Derived metrics are left at zero; run the result through
/// [`derive_metrics`](crate::deriver::derive_metrics).
pub fn load_posts(path: &Path, tz: Tz) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| DashboardError::DataUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_posts(file, path, &PostDateParser::new(tz))?;
    info!("Loaded {} posts from {}", dataset.len(), path.display());
    if dataset.is_empty() {
        warn!("{} has a header row but no posts", path.display());
    }
    Ok(dataset)
}

/// Read posts from any byte source. `origin` is only used in error messages.
pub fn read_posts<R: Read>(source: R, origin: &Path, parser: &PostDateParser) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = rdr
        .headers()
        .map_err(|e| map_csv_error(e, origin, None))?
        .clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<RawPostRow>().enumerate() {
        let row_number = index + 1;
        let raw = result.map_err(|e| map_csv_error(e, origin, Some(row_number)))?;
        records.push(convert_row(index, raw, parser)?);
    }

    debug!("Parsed {} rows from {}", records.len(), origin.display());
    Ok(Dataset::new(records))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DashboardError::MalformedData(format!(
            "missing column(s): {}",
            missing.join(", ")
        )))
    }
}

/// Validate one raw row. `index` is zero-based; messages use the 1-based
/// data row number.
fn convert_row(index: usize, raw: RawPostRow, parser: &PostDateParser) -> Result<PostRecord> {
    let row_number = index + 1;
    let post_date = parser.parse(&raw.post_date).ok_or_else(|| {
        DashboardError::MalformedData(format!(
            "row {}: column Post_Date: cannot parse date \"{}\"",
            row_number, raw.post_date
        ))
    })?;

    Ok(PostRecord {
        row: index,
        platform: raw.platform,
        content_type: raw.content_type,
        post_date,
        views: parse_count(row_number, "Views", &raw.views)?,
        likes: parse_count(row_number, "Likes", &raw.likes)?,
        shares: parse_count(row_number, "Shares", &raw.shares)?,
        comments: parse_count(row_number, "Comments", &raw.comments)?,
        engagement: 0,
        engagement_rate: 0.0,
    })
}

/// Parse a non-negative integer counter. Whole-valued decimals such as
/// `"1200.0"` are accepted.
fn parse_count(row_number: usize, column: &str, value: &str) -> Result<u64> {
    if let Ok(n) = value.parse::<u64>() {
        return Ok(n);
    }
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => {
            Ok(f as u64)
        }
        _ => Err(DashboardError::MalformedData(format!(
            "row {}: column {}: expected a non-negative integer, got \"{}\"",
            row_number, column, value
        ))),
    }
}

fn map_csv_error(err: csv::Error, origin: &Path, row_number: Option<usize>) -> DashboardError {
    let location = match row_number {
        Some(n) => format!("row {}", n),
        None => "header".to_string(),
    };
    match err.into_kind() {
        csv::ErrorKind::Io(source) => DashboardError::DataUnavailable {
            path: origin.to_path_buf(),
            source,
        },
        csv::ErrorKind::Utf8 { err, .. } => {
            DashboardError::MalformedData(format!("{}: invalid UTF-8 ({})", location, err))
        }
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => DashboardError::MalformedData(format!(
            "{}: expected {} fields, found {}",
            location, expected_len, len
        )),
        csv::ErrorKind::Deserialize { err, .. } => {
            DashboardError::MalformedData(format!("{}: {}", location, err))
        }
        other => DashboardError::MalformedData(format!("{}: {:?}", location, other)),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

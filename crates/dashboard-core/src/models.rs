use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;

use crate::time_utils::{end_of_day, start_of_day};

/// A single social-media post read from the source table, extended with the
/// two derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    /// Zero-based position of the row in the source file.
    pub row: usize,
    /// Platform label, e.g. `"TikTok"`.
    pub platform: String,
    /// Content type label, e.g. `"Video"`.
    pub content_type: String,
    /// Wall-clock timestamp of the post.
    pub post_date: NaiveDateTime,
    pub views: u64,
    pub likes: u64,
    pub shares: u64,
    pub comments: u64,
    /// `likes + shares + comments`, filled in by the metric deriver.
    pub engagement: u64,
    /// Engagement as a percentage of views (zero when views is zero).
    pub engagement_rate: f64,
}

impl PostRecord {
    /// Sum of the three interaction counters, computed from the raw columns.
    pub fn interactions(&self) -> u64 {
        self.likes
            .saturating_add(self.shares)
            .saturating_add(self.comments)
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The full, ordered collection of posts loaded at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PostRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PostRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    /// Consume the dataset, returning its records in source order.
    pub fn into_records(self) -> Vec<PostRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identity view over every record.
    pub fn view(&self) -> DataView<'_> {
        DataView::new(self.records.iter().collect())
    }

    /// Earliest and latest post timestamps, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.records.iter().map(|r| r.post_date).min()?;
        let max = self.records.iter().map(|r| r.post_date).max()?;
        Some((min, max))
    }
}

// ── DataView ──────────────────────────────────────────────────────────────────

/// A borrowed, order-preserving subset of a [`Dataset`].
///
/// Produced by the filter engine and consumed by every aggregation; never
/// owns or mutates the records it points at.
#[derive(Debug, Clone, Default)]
pub struct DataView<'a> {
    records: Vec<&'a PostRecord>,
}

impl<'a> DataView<'a> {
    pub fn new(records: Vec<&'a PostRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a PostRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PostRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Source row indices of the records in this view.
    pub fn rows(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.row).collect()
    }
}

// ── Filtering inputs ──────────────────────────────────────────────────────────

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// A range that admits every representable date.
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    /// `true` when `ts` falls between the start of `start` and the last
    /// instant of `end`.
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        start_of_day(self.start) <= ts && ts <= end_of_day(self.end)
    }
}

/// The user's current choice of platforms, content types and dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub platforms: BTreeSet<String>,
    pub content_types: BTreeSet<String>,
    pub date_range: DateRange,
}

impl FilterSelection {
    /// Everything the options offer: all platforms, all content types and
    /// the dataset's full date range.
    pub fn all(options: &FilterOptions) -> Self {
        Self {
            platforms: options.platforms.iter().cloned().collect(),
            content_types: options.content_types.iter().cloned().collect(),
            date_range: options.date_bounds.unwrap_or_else(DateRange::unbounded),
        }
    }
}

/// The values a filter selection may draw from, derived from a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Distinct platforms in first-encountered order.
    pub platforms: Vec<String>,
    /// Distinct content types in first-encountered order.
    pub content_types: Vec<String>,
    /// Calendar days of the earliest and latest posts.
    pub date_bounds: Option<DateRange>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

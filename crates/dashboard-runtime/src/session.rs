//! Filter state and recomputation for one dashboard session.
//!
//! [`DashboardSession`] owns the prepared dataset and the user's
//! [`FilterSelection`]. Every mutator edits the selection and then re-runs
//! filter → aggregate synchronously, so [`DashboardSession::snapshot`] always
//! reflects the current selection.

use chrono::{Duration, NaiveDate};
use dashboard_core::models::{Dataset, DateRange, FilterOptions, FilterSelection};
use dashboard_data::analysis::{build_analytics_report, build_snapshot, AnalyticsReport, DashboardSnapshot};
use dashboard_data::filter::{apply_filters, filter_options};
use tracing::{debug, info};

/// Which side of the date range a shift applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    Start,
    End,
}

/// The dataset plus the derived state the UI renders.
pub struct DashboardSession {
    dataset: Dataset,
    options: FilterOptions,
    selection: FilterSelection,
    /// `None` when the current selection matches no posts.
    snapshot: Option<DashboardSnapshot>,
    filtered_count: usize,
    /// Computed once from the whole dataset.
    analytics: AnalyticsReport,
}

impl DashboardSession {
    /// Start a session with every filter fully open.
    pub fn new(dataset: Dataset) -> Self {
        let options = filter_options(&dataset);
        let selection = FilterSelection::all(&options);
        let analytics = build_analytics_report(&dataset.view());
        info!(
            "Session started: {} posts, {} platforms, {} content types",
            dataset.len(),
            options.platforms.len(),
            options.content_types.len()
        );

        let mut session = Self {
            dataset,
            options,
            selection,
            snapshot: None,
            filtered_count: 0,
            analytics,
        };
        session.recompute();
        session
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn analytics(&self) -> &AnalyticsReport {
        &self.analytics
    }

    /// Number of posts passing the current filters.
    pub fn filtered_count(&self) -> usize {
        self.filtered_count
    }

    pub fn is_platform_selected(&self, platform: &str) -> bool {
        self.selection.platforms.contains(platform)
    }

    pub fn is_content_type_selected(&self, content_type: &str) -> bool {
        self.selection.content_types.contains(content_type)
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Flip `platform` in or out of the selection. Unknown labels are ignored.
    pub fn toggle_platform(&mut self, platform: &str) {
        if !self.options.platforms.iter().any(|p| p == platform) {
            return;
        }
        if !self.selection.platforms.remove(platform) {
            self.selection.platforms.insert(platform.to_string());
        }
        self.recompute();
    }

    /// Flip `content_type` in or out of the selection. Unknown labels are
    /// ignored.
    pub fn toggle_content_type(&mut self, content_type: &str) {
        if !self.options.content_types.iter().any(|c| c == content_type) {
            return;
        }
        if !self.selection.content_types.remove(content_type) {
            self.selection.content_types.insert(content_type.to_string());
        }
        self.recompute();
    }

    /// Select every platform (`true`) or none (`false`).
    pub fn select_all_platforms(&mut self, selected: bool) {
        self.selection.platforms = if selected {
            self.options.platforms.iter().cloned().collect()
        } else {
            Default::default()
        };
        self.recompute();
    }

    /// Select every content type (`true`) or none (`false`).
    pub fn select_all_content_types(&mut self, selected: bool) {
        self.selection.content_types = if selected {
            self.options.content_types.iter().cloned().collect()
        } else {
            Default::default()
        };
        self.recompute();
    }

    /// Replace the date range. Both ends are clamped to the dataset's span
    /// and reversed bounds are swapped.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let range = DateRange::new(start, end);
        self.selection.date_range = match self.options.date_bounds {
            Some(bounds) => DateRange::new(
                clamp(range.start, bounds.start, bounds.end),
                clamp(range.end, bounds.start, bounds.end),
            ),
            None => range,
        };
        self.recompute();
    }

    /// Move one end of the date range by `days`, keeping it inside the
    /// dataset's span and never past the other end.
    pub fn shift_date(&mut self, bound: DateBound, days: i64) {
        let Some(bounds) = self.options.date_bounds else {
            return;
        };
        let current = self.selection.date_range;
        match bound {
            DateBound::Start => {
                let moved = add_days(current.start, days);
                self.selection.date_range.start = clamp(moved, bounds.start, current.end);
            }
            DateBound::End => {
                let moved = add_days(current.end, days);
                self.selection.date_range.end = clamp(moved, current.start, bounds.end);
            }
        }
        if self.selection.date_range != current {
            self.recompute();
        }
    }

    /// Back to everything selected over the full date range.
    pub fn reset_filters(&mut self) {
        self.selection = FilterSelection::all(&self.options);
        self.recompute();
    }

    // ── Private ───────────────────────────────────────────────────────────

    fn recompute(&mut self) {
        let view = apply_filters(&self.dataset, &self.selection);
        self.filtered_count = view.len();
        self.snapshot = build_snapshot(&view);
        debug!(
            "Recomputed: {} platforms, {} content types, {}..={} → {} posts",
            self.selection.platforms.len(),
            self.selection.content_types.len(),
            self.selection.date_range.start,
            self.selection.date_range.end,
            self.filtered_count
        );
    }
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

fn clamp(date: NaiveDate, lo: NaiveDate, hi: NaiveDate) -> NaiveDate {
    date.max(lo).min(hi)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Platform / content-type / date-range filtering.

use std::collections::HashSet;

use dashboard_core::models::{DataView, Dataset, DateRange, FilterOptions, FilterSelection, PostRecord};
use tracing::debug;

/// `true` when `record` passes all three predicates of `selection`.
pub fn matches(record: &PostRecord, selection: &FilterSelection) -> bool {
    selection.platforms.contains(&record.platform)
        && selection.content_types.contains(&record.content_type)
        && selection.date_range.contains(record.post_date)
}

/// Records of `dataset` that satisfy `selection`, in source order.
///
/// An empty result is a normal outcome, not an error.
pub fn apply_filters<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> DataView<'a> {
    let records: Vec<&PostRecord> = dataset
        .records()
        .iter()
        .filter(|r| matches(r, selection))
        .collect();
    debug!("Filter kept {} of {} posts", records.len(), dataset.len());
    DataView::new(records)
}

/// Distinct platforms, content types and the calendar-day span of `dataset`.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let mut platforms = Vec::new();
    let mut content_types = Vec::new();
    let mut seen_platforms = HashSet::new();
    let mut seen_types = HashSet::new();

    for r in dataset.records() {
        if seen_platforms.insert(r.platform.as_str()) {
            platforms.push(r.platform.clone());
        }
        if seen_types.insert(r.content_type.as_str()) {
            content_types.push(r.content_type.clone());
        }
    }

    let date_bounds = dataset
        .date_bounds()
        .map(|(min, max)| DateRange::new(min.date(), max.date()));

    FilterOptions {
        platforms,
        content_types,
        date_bounds,
    }
}

//! Engagement metrics computed once after load.

use dashboard_core::models::{Dataset, PostRecord};

/// Engagement as a percentage of views; zero when there are no views.
pub fn engagement_rate(engagement: u64, views: u64) -> f64 {
    if views == 0 {
        0.0
    } else {
        engagement as f64 / views as f64 * 100.0
    }
}

/// Fill in `engagement` and `engagement_rate` from the raw counters.
///
/// Both fields are recomputed from scratch, so applying this twice gives the
/// same record as applying it once.
pub fn derive_record(mut record: PostRecord) -> PostRecord {
    record.engagement = record.interactions();
    record.engagement_rate = engagement_rate(record.engagement, record.views);
    record
}

/// Derive metrics for every record, keeping source order.
pub fn derive_metrics(dataset: Dataset) -> Dataset {
    Dataset::new(dataset.into_records().into_iter().map(derive_record).collect())
}

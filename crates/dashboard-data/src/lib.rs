//! Data layer for the social dashboard.
//!
//! Loads the posts CSV, derives engagement metrics, filters by the user's
//! selection and computes the aggregations each tab renders.

pub mod aggregator;
pub mod analysis;
pub mod deriver;
pub mod filter;
pub mod reader;

pub use dashboard_core as core;

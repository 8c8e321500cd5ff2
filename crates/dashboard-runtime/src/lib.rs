//! Session layer for the social dashboard.
//!
//! Holds the loaded dataset together with the current filter selection and
//! recomputes the dashboard snapshot whenever the selection changes.

pub mod session;

pub use dashboard_core as core;
pub use dashboard_data as data;

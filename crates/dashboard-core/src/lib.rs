//! Shared types for the social dashboard: post records, filter inputs,
//! settings, errors and formatting helpers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
pub use models::{DataView, Dataset, DateRange, FilterOptions, FilterSelection, PostRecord};

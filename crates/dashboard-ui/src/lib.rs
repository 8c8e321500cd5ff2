//! Terminal UI layer for the social media dashboard.
//!
//! Provides themes, bar and filter components, the dashboard and analytics
//! views, and the main application event loop built on top of [`ratatui`].

pub mod analytics_view;
pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the social dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The source file is missing or could not be read from disk.
    #[error("Data unavailable at {path}: {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source file was read but its contents are not a valid posts table
    /// (missing column, unparsable date or number, broken record).
    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// `true` for the two load-time failures that end the session before
    /// anything is rendered.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            DashboardError::DataUnavailable { .. } | DashboardError::MalformedData(_)
        )
    }
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dashboard_core::error::DashboardError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name looked for when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "Viral_Social_Media_Trends.csv";

const APP_DIR: &str = ".social-dashboard";

// ── Directory bootstrap ────────────────────────────────────────────────────────

fn home_or_cwd() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Ensure `~/.social-dashboard/logs/` exists.
pub fn ensure_directories() -> anyhow::Result<()> {
    ensure_directories_in(&home_or_cwd())
}

/// Create `<home>/.social-dashboard/` and its `logs/` subdirectory.
pub fn ensure_directories_in(home: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(home.join(APP_DIR).join("logs"))?;
    Ok(())
}

/// `~/.social-dashboard/logs/dashboard.log`
pub fn default_log_file() -> PathBuf {
    home_or_cwd().join(APP_DIR).join("logs").join("dashboard.log")
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` value to a tracing filter directive.
pub fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        // tracing has nothing above error.
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber, appending to `log_file`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout or
/// stderr. Unrecognised level strings fall back to `"info"`.
pub fn setup_logging(log_level: &str, log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter =
        EnvFilter::try_new(normalise_level(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

// ── Data-path discovery ────────────────────────────────────────────────────────

/// Places searched for the posts file, in order.
pub fn candidate_paths(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![
        cwd.join(DEFAULT_DATA_FILE),
        cwd.join("data").join(DEFAULT_DATA_FILE),
    ];
    if let Some(home) = home {
        candidates.push(home.join(DEFAULT_DATA_FILE));
    }
    candidates
}

/// Pick the posts file: `explicit` when given, otherwise the first existing
/// candidate. Reports [`DashboardError::DataUnavailable`] when nothing is
/// found.
pub fn discover_data_path(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> dashboard_core::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let candidates = candidate_paths(cwd, home);
    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }
    let searched = candidates
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(DashboardError::DataUnavailable {
        path: PathBuf::from(DEFAULT_DATA_FILE),
        source: io::Error::new(
            io::ErrorKind::NotFound,
            format!("no data file found (searched {searched}); pass --data <PATH>"),
        ),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::time_utils::{get_system_timezone, validate_timezone};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive terminal dashboard for social-media post engagement
#[derive(Parser, Debug, Clone)]
#[command(
    name = "social-dashboard",
    about = "Interactive terminal dashboard for social-media post engagement",
    version
)]
pub struct Settings {
    /// Path to the posts CSV (searched in the usual places if omitted)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Timezone used to interpret offset-carrying post dates (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Tab shown at startup
    #[arg(long, default_value = "dashboard", value_parser = ["dashboard", "analytics"])]
    pub tab: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve `"auto"` values.
    pub fn load() -> Result<Self> {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`load`](Self::load) but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<OsString>) -> Result<Self> {
        let settings = Settings::parse_from(args);
        Self::resolve_auto_values(settings)
    }

    /// Resolve `"auto"` sentinel values, check the timezone and apply the
    /// `--debug` flag.
    fn resolve_auto_values(mut settings: Settings) -> Result<Settings> {
        if settings.timezone.eq_ignore_ascii_case("auto") {
            let system = get_system_timezone();
            settings.timezone = if validate_timezone(&system) {
                system
            } else {
                "UTC".to_string()
            };
        } else if !validate_timezone(&settings.timezone) {
            return Err(DashboardError::Config(format!(
                "unknown timezone \"{}\"",
                settings.timezone
            )));
        }

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        Ok(settings)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

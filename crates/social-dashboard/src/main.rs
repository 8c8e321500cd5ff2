mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_core::time_utils::resolve_timezone;
use dashboard_data::analysis::load_and_prepare;
use dashboard_runtime::session::DashboardSession;
use dashboard_ui::app::{App, Tab};

fn main() -> Result<()> {
    let settings = Settings::load()?;

    bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(bootstrap::default_log_file);
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("Social Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Timezone: {}, Theme: {}, Tab: {}",
        settings.timezone,
        settings.theme,
        settings.tab
    );

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let home = dirs::home_dir();
    let tz = resolve_timezone(&settings.timezone)?;

    let loaded = bootstrap::discover_data_path(settings.data.as_deref(), &cwd, home.as_deref())
        .and_then(|path| load_and_prepare(&path, tz).map(|ds| (path, ds)));

    let (path, dataset) = match loaded {
        Ok(loaded) => loaded,
        Err(e) if e.is_load_failure() => {
            tracing::error!("{}", e);
            eprintln!("social-dashboard: {}", e);
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let app = App::new(
        &settings.theme,
        Tab::from_name(&settings.tab),
        source,
        settings.timezone.clone(),
        DashboardSession::new(dataset),
    );
    app.run()?;

    tracing::info!("Social Dashboard exiting");
    Ok(())
}

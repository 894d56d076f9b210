mod bootstrap;

use std::io::IsTerminal;

use anyhow::{Context, Result};
use bikeshare_core::models::City;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::console::Console;
use bikeshare_runtime::session::Session;
use bikeshare_ui::themes::{ColorMode, Theme};

fn main() -> Result<()> {
    let settings = Settings::load().context("invalid configuration")?;

    bootstrap::setup_logging(&settings.log_directive(), settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, Color: {}",
        settings.data_dir.display(),
        settings.color
    );

    let missing = bootstrap::missing_datasets(&settings);
    tracing::info!(
        "{} of {} datasets present",
        City::ALL.len() - missing.len(),
        City::ALL.len()
    );

    let stdout = std::io::stdout();
    let theme = Theme::for_mode(
        ColorMode::from_setting(&settings.color),
        stdout.is_terminal(),
    );

    let console = Console::new(std::io::stdin().lock(), stdout.lock(), theme);
    let mut session = Session::new(console, &settings.data_dir);
    session.run().context("session failed")?;

    tracing::info!("Goodbye after {} iteration(s)", session.iterations());
    Ok(())
}

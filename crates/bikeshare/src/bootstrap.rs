use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use bikeshare_core::models::City;
use bikeshare_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Open `path` for appending, creating it and any missing parents.
pub fn open_log_file(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    Ok(file)
}

/// Initialise the global `tracing` subscriber.
///
/// `directive` is an `EnvFilter` directive, already validated by
/// [`Settings::resolve`]. Logs go to `log_file` when given (without ANSI
/// colours), otherwise to stderr. `RUST_LOG` is not consulted.
pub fn setup_logging(directive: &str, log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter {:?}", directive))?;

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let stderr_layer = log_file.is_none().then(|| {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("installing tracing subscriber")?;

    Ok(())
}

// ── Data directory check ───────────────────────────────────────────────────────

/// Cities whose dataset file is absent from the configured data directory.
///
/// Only logged at startup. The session still offers every city and reports
/// a missing file when it is selected.
pub fn missing_datasets(settings: &Settings) -> Vec<City> {
    let missing: Vec<City> = City::ALL
        .into_iter()
        .filter(|city| !settings.dataset_path(city.file_name()).is_file())
        .collect();

    if !settings.data_dir.is_dir() {
        tracing::warn!("Data directory {} does not exist", settings.data_dir.display());
    } else {
        for city in &missing {
            tracing::warn!(
                "No dataset for {} in {}",
                city.display_name(),
                settings.data_dir.display()
            );
        }
    }

    missing
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn settings_for(dir: &Path) -> Settings {
        Settings::load_from_args(["bikeshare", "--data-dir", dir.to_str().unwrap()]).unwrap()
    }

    // ── open_log_file ─────────────────────────────────────────────────────────

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("logs").join("bikeshare.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    // ── setup_logging ─────────────────────────────────────────────────────────

    #[test]
    fn test_setup_logging_rejects_bad_directive() {
        // Fails while building the filter, before any global subscriber is set.
        assert!(setup_logging("bikeshare_data=loud", None).is_err());
    }

    // ── missing_datasets ──────────────────────────────────────────────────────

    #[test]
    fn test_missing_datasets_lists_absent_cities() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("washington.csv"), "Start Time\n").unwrap();

        let missing = missing_datasets(&settings_for(tmp.path()));
        assert_eq!(missing, vec![City::Chicago, City::NewYorkCity]);
    }

    #[test]
    fn test_missing_datasets_all_present() {
        let tmp = TempDir::new().expect("tempdir");
        for city in City::ALL {
            std::fs::write(tmp.path().join(city.file_name()), "Start Time\n").unwrap();
        }
        assert!(missing_datasets(&settings_for(tmp.path())).is_empty());
    }

    #[test]
    fn test_missing_datasets_absent_directory() {
        let tmp = TempDir::new().expect("tempdir");
        let gone = tmp.path().join("nowhere");
        assert_eq!(missing_datasets(&settings_for(&gone)).len(), 3);
    }
}

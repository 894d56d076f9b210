use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::error::{BikeshareError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data interactively
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data interactively",
    version
)]
pub struct Settings {
    /// Directory containing chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: PathBuf,

    /// Console colours
    #[arg(long, default_value = "auto", value_parser = ["auto", "always", "never"])]
    pub color: String,

    /// Logging level (DEBUG, INFO, WARNING, ERROR, CRITICAL) or a tracing
    /// filter directive such as `bikeshare_data=debug`
    #[arg(long, default_value = "WARNING")]
    pub log_level: String,

    /// Log file path (logs go to stderr when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Result<Self> {
        Self::parse().resolve()
    }

    /// Same as [`Settings::load`] but with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
            .map_err(|e| BikeshareError::Config(e.to_string()))?
            .resolve()
    }

    /// Apply `--debug`, then validate the log level and the data directory.
    ///
    /// A missing directory is accepted here: each session iteration reports
    /// the missing dataset itself. A path that names a regular file is a
    /// configuration mistake.
    pub fn resolve(mut self) -> Result<Self> {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }

        EnvFilter::try_new(self.log_directive()).map_err(|e| {
            BikeshareError::Config(format!("--log-level {:?}: {}", self.log_level, e))
        })?;

        if self.data_dir.is_file() {
            return Err(BikeshareError::Config(format!(
                "--data-dir {} is a file, expected a directory",
                self.data_dir.display()
            )));
        }

        Ok(self)
    }

    /// The `--log-level` value as a tracing filter directive.
    pub fn log_directive(&self) -> String {
        level_directive(&self.log_level)
    }

    /// Path of a dataset file inside the configured data directory.
    pub fn dataset_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}

/// Map a level name to a tracing filter directive.
///
/// `CRITICAL` has no tracing equivalent and is treated like `DEBUG`.
/// Anything that is not a level name is passed through as a directive.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["bikeshare"]);

        assert_eq!(settings.data_dir, PathBuf::from("."));
        assert_eq!(settings.color, "auto");
        assert_eq!(settings.log_level, "WARNING");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
    }

    #[test]
    fn test_settings_cli_data_dir() {
        let settings = Settings::parse_from(["bikeshare", "--data-dir", "/srv/bikeshare"]);
        assert_eq!(settings.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(
            settings.dataset_path("chicago.csv"),
            PathBuf::from("/srv/bikeshare/chicago.csv")
        );
    }

    #[test]
    fn test_settings_cli_log_file() {
        let settings = Settings::parse_from(["bikeshare", "--log-file", "/tmp/bikeshare.log"]);
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/bikeshare.log")));
    }

    #[test]
    fn test_settings_rejects_unknown_color() {
        let result = Settings::load_from_args(["bikeshare", "--color", "rainbow"]);
        assert!(matches!(result, Err(BikeshareError::Config(_))));
    }

    // ── level_directive ───────────────────────────────────────────────────────

    #[test]
    fn test_level_directive_maps_names() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("CRITICAL"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(
            level_directive("bikeshare_data=debug"),
            "bikeshare_data=debug"
        );
    }

    // ── resolve ───────────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_accepts_lowercase_level_name() {
        let settings =
            Settings::load_from_args(["bikeshare", "--log-level", "info"]).expect("settings");
        assert_eq!(settings.log_directive(), "info");
    }

    #[test]
    fn test_resolve_accepts_filter_directive() {
        let settings = Settings::load_from_args([
            "bikeshare",
            "--log-level",
            "warn,bikeshare_data=debug",
        ])
        .expect("directive is a valid level");
        assert_eq!(settings.log_directive(), "warn,bikeshare_data=debug");
    }

    #[test]
    fn test_resolve_rejects_bad_directive() {
        let result = Settings::load_from_args(["bikeshare", "--log-level", "bikeshare_data=loud"]);
        assert!(matches!(result, Err(BikeshareError::Config(_))));
    }

    #[test]
    fn test_resolve_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["bikeshare", "--debug"]).expect("settings");
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_resolve_accepts_missing_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let missing = tmp.path().join("nope");
        let settings = Settings::load_from_args([
            "bikeshare".to_string(),
            "--data-dir".to_string(),
            missing.display().to_string(),
        ])
        .expect("missing dir is not a config error");
        assert_eq!(settings.data_dir, missing);
    }

    #[test]
    fn test_resolve_rejects_file_as_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        let file = tmp.path().join("chicago.csv");
        std::fs::write(&file, "Start Time\n").expect("write");

        let result = Settings::load_from_args([
            "bikeshare".to_string(),
            "--data-dir".to_string(),
            file.display().to_string(),
        ]);
        assert!(matches!(result, Err(BikeshareError::Config(_))));
    }
}

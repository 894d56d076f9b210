use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A value typed by the user is outside the accepted set.
    #[error("Invalid choice \"{value}\": expected one of {accepted}")]
    InvalidChoice { value: String, accepted: String },

    /// The dataset for a city could not be opened or its header read.
    #[error("Data for {city} is unavailable ({path}): {source}")]
    DataUnavailable {
        city: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row in a dataset could not be decoded.
    #[error("Malformed record in {path} at line {line}: {reason}")]
    MalformedRecord {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// Console input ended while a value was still required.
    #[error("Input closed before a value was provided")]
    InputClosed,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BikeshareError {
    /// Whether this error only invalidates the current session iteration.
    ///
    /// Missing or corrupt datasets are reported to the user, who may then
    /// restart and pick another city. Everything else is fatal.
    pub fn aborts_iteration(&self) -> bool {
        matches!(
            self,
            BikeshareError::DataUnavailable { .. } | BikeshareError::MalformedRecord { .. }
        )
    }
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;

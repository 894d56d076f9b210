//! Shared types for the bikeshare explorer.
//!
//! Holds the city registry and filter vocabulary, trip record types,
//! timestamp handling, formatting helpers, CLI settings and the error
//! taxonomy used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{BikeshareError, Result};

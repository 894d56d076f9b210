//! Interactive runtime for the bikeshare explorer.
//!
//! Owns the console (prompting and validation), the raw-data pager and the
//! session loop that ties loading, filtering and reporting together.

pub mod console;
pub mod pager;
pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
pub use bikeshare_ui as ui;

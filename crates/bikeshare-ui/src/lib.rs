//! Console presentation layer for the bikeshare explorer.
//!
//! Provides colour themes and plain-text renderers for the statistics
//! reports and the raw-row pager, written to any [`std::io::Write`].

pub mod report_view;
pub mod table_view;
pub mod themes;

pub use bikeshare_core as core;

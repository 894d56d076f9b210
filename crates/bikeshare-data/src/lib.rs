//! Data layer for the bikeshare explorer.
//!
//! Loads a city's trip CSV into a [`TripTable`](bikeshare_core::models::TripTable),
//! narrows it by month and weekday, and computes the four statistics reports.

pub mod aggregator;
pub mod analysis;
pub mod filter;
pub mod reader;

pub use bikeshare_core as core;

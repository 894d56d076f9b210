//! The four statistics reports over a filtered trip table.
//!
//! Each reporter is pure and independent of the others, and returns its
//! result wrapped in [`Timed`] together with its own wall-clock duration.
//! An empty table yields `None` (or empty counts) rather than a panic or a
//! division by zero.

use std::time::{Duration, Instant};

use bikeshare_core::models::TripTable;
use chrono::Weekday;
use tracing::debug;

use crate::aggregator::FrequencyTable;

// ── Public types ──────────────────────────────────────────────────────────────

/// A report value plus the time taken to compute it.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

/// Most frequent times of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    /// Most common month, 1-12.
    pub month: u32,
    pub weekday: Weekday,
    /// Most common start hour, 0-23.
    pub hour: u32,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// Most frequent (start, end) combination.
    pub trip: (String, String),
    /// How many rows made that trip.
    pub trip_count: usize,
}

/// Total and average trip duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub trip_count: usize,
}

/// Result for a column that only some datasets provide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnStats<T> {
    /// The dataset has no such column.
    Unavailable,
    Available(T),
}

/// Birth-year extremes and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// User demographics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Count per user type, most frequent first.
    pub user_types: Vec<(String, usize)>,
    /// Count per gender, most frequent first.
    pub gender: ColumnStats<Vec<(String, usize)>>,
    /// `Available(None)` when the column exists but has no values in range.
    pub birth_year: ColumnStats<Option<BirthYearStats>>,
}

/// All four reports for one filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct TripAnalysis {
    pub time: Timed<Option<TimeStats>>,
    pub stations: Timed<Option<StationStats>>,
    pub duration: Timed<Option<DurationStats>>,
    pub users: Timed<UserStats>,
    pub rows_analyzed: usize,
}

// ── Reporters ─────────────────────────────────────────────────────────────────

/// Most common month, weekday and start hour.
pub fn time_stats(table: &TripTable) -> Timed<Option<TimeStats>> {
    timed("time", || {
        let months: FrequencyTable<u32> = table.rows.iter().map(|r| r.month).collect();
        let weekdays: FrequencyTable<Weekday> = table.rows.iter().map(|r| r.weekday).collect();
        let hours: FrequencyTable<u32> = table.rows.iter().map(|r| r.hour).collect();

        Some(TimeStats {
            month: *months.mode()?.0,
            weekday: *weekdays.mode()?.0,
            hour: *hours.mode()?.0,
        })
    })
}

/// Most common start station, end station and start→end trip.
pub fn station_stats(table: &TripTable) -> Timed<Option<StationStats>> {
    timed("station", || {
        let starts: FrequencyTable<&str> = table
            .rows
            .iter()
            .map(|r| r.start_station.as_str())
            .collect();
        let ends: FrequencyTable<&str> =
            table.rows.iter().map(|r| r.end_station.as_str()).collect();
        let trips: FrequencyTable<(&str, &str)> = table
            .rows
            .iter()
            .map(|r| (r.start_station.as_str(), r.end_station.as_str()))
            .collect();

        let ((from, to), trip_count) = trips.mode()?;
        Some(StationStats {
            start_station: starts.mode()?.0.to_string(),
            end_station: ends.mode()?.0.to_string(),
            trip: (from.to_string(), to.to_string()),
            trip_count,
        })
    })
}

/// Sum and mean of trip duration. `None` for an empty table.
pub fn duration_stats(table: &TripTable) -> Timed<Option<DurationStats>> {
    timed("duration", || {
        if table.is_empty() {
            return None;
        }
        let total_seconds: f64 = table.rows.iter().map(|r| r.trip_duration).sum();
        let trip_count = table.len();
        Some(DurationStats {
            total_seconds,
            mean_seconds: total_seconds / trip_count as f64,
            trip_count,
        })
    })
}

/// User-type counts, plus gender and birth-year figures where the dataset
/// has those columns.
pub fn user_stats(table: &TripTable) -> Timed<UserStats> {
    timed("user", || {
        let user_types: FrequencyTable<&str> = table
            .rows
            .iter()
            .filter_map(|r| r.user_type.as_deref())
            .collect();

        let gender = if table.capabilities.has_gender {
            let genders: FrequencyTable<&str> = table
                .rows
                .iter()
                .filter_map(|r| r.gender.as_deref())
                .collect();
            ColumnStats::Available(owned_counts(&genders))
        } else {
            ColumnStats::Unavailable
        };

        let birth_year = if table.capabilities.has_birth_year {
            ColumnStats::Available(birth_year_stats(table))
        } else {
            ColumnStats::Unavailable
        };

        UserStats {
            user_types: owned_counts(&user_types),
            gender,
            birth_year,
        }
    })
}

/// Run every reporter over `table`.
pub fn analyze_table(table: &TripTable) -> TripAnalysis {
    TripAnalysis {
        time: time_stats(table),
        stations: station_stats(table),
        duration: duration_stats(table),
        users: user_stats(table),
        rows_analyzed: table.len(),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn timed<T>(name: &str, f: impl FnOnce() -> T) -> Timed<T> {
    let started = Instant::now();
    let value = f();
    let elapsed = started.elapsed();
    debug!("{} stats computed in {:?}", name, elapsed);
    Timed { value, elapsed }
}

fn owned_counts(table: &FrequencyTable<&str>) -> Vec<(String, usize)> {
    table
        .value_counts()
        .into_iter()
        .map(|(k, n)| (k.to_string(), n))
        .collect()
}

fn birth_year_stats(table: &TripTable) -> Option<BirthYearStats> {
    let years: Vec<i32> = table.rows.iter().filter_map(|r| r.birth_year).collect();
    let earliest = *years.iter().min()?;
    let most_recent = *years.iter().max()?;
    let counts: FrequencyTable<i32> = years.iter().copied().collect();
    let most_common = *counts.mode()?.0;
    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDateTime, Weekday};

use crate::error::BikeshareError;

// ── Static lookup tables ──────────────────────────────────────────────────────

/// Sentinel accepted by the month and day prompts meaning "no filter".
pub const ALL: &str = "all";

/// Months covered by the trip datasets, in calendar order.
///
/// The source data only spans the first half of the year, so later months
/// are not offered at all.
pub const SUPPORTED_MONTHS: [&str; 6] = ["january", "february", "march", "april", "may", "june"];

/// Weekday names in the order the prompts list them.
pub const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Accepted answers for the month prompt.
pub const MONTH_CHOICES: [&str; 7] = [
    ALL, "january", "february", "march", "april", "may", "june",
];

/// Accepted answers for the day prompt.
pub const DAY_CHOICES: [&str; 8] = [
    ALL,
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Accepted answers for yes/no questions.
pub const YES_NO_CHOICES: [&str; 2] = ["yes", "no"];

// ── City registry ─────────────────────────────────────────────────────────────

/// One of the three cities with a trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every registered city, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase key typed by the user.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Human-readable name for report headers.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Lowercase keys of every city, for the city prompt.
    pub fn keys() -> [&'static str; 3] {
        Self::ALL.map(City::key)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.key() == normalised)
            .ok_or_else(|| invalid_choice(s, &City::keys()))
    }
}

// ── Month / weekday names ─────────────────────────────────────────────────────

/// Lowercase full name of a weekday, e.g. `"friday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

/// Lowercase full name of a 1-based month number, e.g. `3` → `"march"`.
///
/// Returns `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    month
        .checked_sub(1)
        .and_then(|idx| NAMES.get(idx as usize).copied())
}

/// Parse one of the supported month names into a [`Month`].
pub fn parse_supported_month(s: &str) -> Result<Month, BikeshareError> {
    let normalised = s.trim().to_lowercase();
    SUPPORTED_MONTHS
        .iter()
        .position(|m| *m == normalised)
        .and_then(|idx| Month::try_from(idx as u8 + 1).ok())
        .ok_or_else(|| invalid_choice(s, &SUPPORTED_MONTHS))
}

/// Parse a full weekday name into a [`Weekday`].
pub fn parse_weekday(s: &str) -> Result<Weekday, BikeshareError> {
    let normalised = s.trim().to_lowercase();
    WEEKDAYS
        .iter()
        .position(|d| *d == normalised)
        .and_then(|idx| Weekday::try_from(idx as u8).ok())
        .ok_or_else(|| invalid_choice(s, &WEEKDAYS))
}

fn invalid_choice(value: &str, accepted: &[&str]) -> BikeshareError {
    BikeshareError::InvalidChoice {
        value: value.to_string(),
        accepted: accepted.join(", "),
    }
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Either no restriction on an axis, or a single required value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// `true` when `value` passes this selector.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }
}

/// Month and weekday restriction applied to a loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TripFilter {
    pub month: Selector<Month>,
    pub day: Selector<Weekday>,
}

impl TripFilter {
    /// Build a filter from the raw prompt answers (`"all"` or a name).
    pub fn from_choices(month: &str, day: &str) -> Result<Self, BikeshareError> {
        let month = match month.trim().to_lowercase().as_str() {
            ALL => Selector::All,
            other => Selector::Only(parse_supported_month(other)?),
        };
        let day = match day.trim().to_lowercase().as_str() {
            ALL => Selector::All,
            other => Selector::Only(parse_weekday(other)?),
        };
        Ok(Self { month, day })
    }

    /// Whether a row with the given derived fields passes both axes.
    pub fn accepts(&self, record: &TripRecord) -> bool {
        let month_ok = match self.month {
            Selector::All => true,
            Selector::Only(m) => m.number_from_month() == record.month,
        };
        month_ok && self.day.matches(&record.weekday)
    }

    /// Short description, e.g. `"month: march, day: all"`.
    pub fn describe(&self) -> String {
        let month = match self.month {
            Selector::All => ALL,
            Selector::Only(m) => month_name(m.number_from_month()).unwrap_or(ALL),
        };
        let day = match self.day {
            Selector::All => ALL,
            Selector::Only(d) => weekday_name(d),
        };
        format!("month: {}, day: {}", month, day)
    }
}

// ── Trip data ─────────────────────────────────────────────────────────────────

/// Which optional columns the current city's dataset provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

/// A single trip, with its calendar fields derived from the start time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// 0-based position of the row in its source file.
    pub row_index: usize,
    /// Parsed start timestamp (local time of the dataset, no zone).
    pub start_time: NaiveDateTime,
    /// End timestamp as it appeared in the file.
    pub end_time: String,
    pub start_station: String,
    pub end_station: String,
    /// Duration in seconds. Washington stores fractional seconds.
    pub trip_duration: f64,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
    /// Derived month, 1-12.
    pub month: u32,
    /// Derived weekday.
    pub weekday: Weekday,
    /// Derived hour of day, 0-23.
    pub hour: u32,
}

/// The in-memory working table for one session iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    pub city: City,
    pub capabilities: Capabilities,
    /// Rows in file order.
    pub rows: Vec<TripRecord>,
}

impl TripTable {
    pub fn new(city: City, capabilities: Capabilities, rows: Vec<TripRecord>) -> Self {
        Self {
            city,
            capabilities,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows `[start, start + len)`, clipped to the table size.
    pub fn window(&self, start: usize, len: usize) -> &[TripRecord] {
        let start = start.min(self.rows.len());
        let end = start.saturating_add(len).min(self.rows.len());
        &self.rows[start..end]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

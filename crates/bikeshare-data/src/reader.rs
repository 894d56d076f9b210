//! CSV loading for the bikeshare explorer.
//!
//! Reads a city's trip file from the data directory and converts every row
//! into a [`TripRecord`] with its calendar fields already derived.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{Capabilities, City, TripRecord, TripTable};
use bikeshare_core::time_utils::{parse_trip_timestamp, CalendarFields};
use serde::Deserialize;
use tracing::{debug, warn};

/// Header of the optional gender column.
pub const GENDER_COLUMN: &str = "Gender";
/// Header of the optional birth-year column.
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

// ── Public API ────────────────────────────────────────────────────────────────

/// Resolve `city` to its dataset in `data_dir` and load it.
pub fn load_city_data(data_dir: &Path, city: City) -> Result<TripTable> {
    let path = data_dir.join(city.file_name());
    let file = File::open(&path).map_err(|source| {
        warn!("Failed to open {}: {}", path.display(), source);
        BikeshareError::DataUnavailable {
            city: city.key().to_string(),
            path: path.clone(),
            source,
        }
    })?;
    read_trips(city, &path, file)
}

/// Parse trip rows from any reader. `path` is only used in error messages.
///
/// Fails with `DataUnavailable` when the header cannot be read and with
/// `MalformedRecord` on the first row that cannot be decoded. No partial
/// table is ever returned.
pub fn read_trips<R: Read>(city: City, path: &Path, input: R) -> Result<TripTable> {
    let started = Instant::now();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        // Cells keep their whitespace; station names compare byte for byte.
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| BikeshareError::DataUnavailable {
            city: city.key().to_string(),
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })?
        .clone();

    let capabilities = Capabilities {
        has_gender: headers.iter().any(|h| h == GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
    };

    let mut rows: Vec<TripRecord> = Vec::new();
    let mut record = csv::StringRecord::new();

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err(csv_error(city, path, e)),
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let raw: RawTrip =
            record
                .deserialize(Some(&headers))
                .map_err(|e| BikeshareError::MalformedRecord {
                    path: path.to_path_buf(),
                    line,
                    reason: e.to_string(),
                })?;

        let trip = raw
            .into_record(rows.len())
            .map_err(|reason| BikeshareError::MalformedRecord {
                path: path.to_path_buf(),
                line,
                reason,
            })?;
        rows.push(trip);
    }

    debug!(
        "Loaded {} rows for {} from {} in {:.3}s (gender: {}, birth year: {})",
        rows.len(),
        city.key(),
        path.display(),
        started.elapsed().as_secs_f64(),
        capabilities.has_gender,
        capabilities.has_birth_year,
    );

    Ok(TripTable::new(city, capabilities, rows))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// One CSV row as stored on disk. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    // Stored as a float in the source files, e.g. "1992.0".
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

impl RawTrip {
    fn into_record(self, row_index: usize) -> std::result::Result<TripRecord, String> {
        let start_time = parse_trip_timestamp(&self.start_time)
            .ok_or_else(|| format!("unparseable start time \"{}\"", self.start_time))?;
        let calendar = CalendarFields::from_timestamp(&start_time);

        Ok(TripRecord {
            row_index,
            start_time,
            end_time: self.end_time,
            start_station: self.start_station,
            end_station: self.end_station,
            trip_duration: self.trip_duration,
            user_type: non_empty(self.user_type),
            gender: non_empty(self.gender),
            birth_year: self
                .birth_year
                .filter(|y| y.is_finite())
                .map(|y| y.trunc() as i32),
            month: calendar.month,
            weekday: calendar.weekday,
            hour: calendar.hour,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Map a low-level CSV error to the matching taxonomy entry: I/O failures
/// mean the data is unavailable, anything else is a malformed row.
fn csv_error(city: City, path: &Path, err: csv::Error) -> BikeshareError {
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    if err.is_io_error() {
        return BikeshareError::DataUnavailable {
            city: city.key().to_string(),
            path: PathBuf::from(path),
            source: std::io::Error::other(err),
        };
    }
    BikeshareError::MalformedRecord {
        path: PathBuf::from(path),
        line,
        reason: err.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use tempfile::TempDir;

    const CHICAGO_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON_CSV: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn write_csv(dir: &Path, city: City, contents: &str) -> PathBuf {
        let path = dir.join(city.file_name());
        std::fs::write(&path, contents).unwrap();
        path
    }

    // ── load_city_data ────────────────────────────────────────────────────────

    #[test]
    fn test_load_chicago_rows_and_capabilities() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), City::Chicago, CHICAGO_CSV);

        let table = load_city_data(dir.path(), City::Chicago).unwrap();

        assert_eq!(table.city, City::Chicago);
        assert_eq!(table.len(), 3);
        assert!(table.capabilities.has_gender);
        assert!(table.capabilities.has_birth_year);

        let first = &table.rows[0];
        assert_eq!(first.row_index, 0);
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));
        // 2017-06-23 was a Friday.
        assert_eq!(first.month, 6);
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.hour, 15);
    }

    #[test]
    fn test_load_keeps_cell_whitespace() {
        let csv = "\
Start Time , End Time,Trip Duration,Start Station,End Station,User Type
2017-03-03 08:00:00,2017-03-03 08:10:00,600,\"Foo \",Bar,Subscriber
2017-03-03 09:00:00,2017-03-03 09:10:00,600,Foo,Bar,Subscriber
";
        let table = read_trips(City::Washington, Path::new("washington.csv"), csv.as_bytes())
            .unwrap();

        assert_eq!(table.rows[0].start_station, "Foo ");
        assert_eq!(table.rows[1].start_station, "Foo");
        assert_ne!(table.rows[0].start_station, table.rows[1].start_station);
        assert_eq!(table.rows[0].hour, 8);
    }

    #[test]
    fn test_load_keeps_file_order() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), City::Chicago, CHICAGO_CSV);

        let table = load_city_data(dir.path(), City::Chicago).unwrap();
        let months: Vec<u32> = table.rows.iter().map(|r| r.month).collect();
        assert_eq!(months, vec![6, 5, 1]);
    }

    #[test]
    fn test_load_empty_optional_cells_are_missing() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), City::Chicago, CHICAGO_CSV);

        let table = load_city_data(dir.path(), City::Chicago).unwrap();
        let last = &table.rows[2];
        assert!(last.gender.is_none());
        assert!(last.birth_year.is_none());
        assert_eq!(last.user_type.as_deref(), Some("Customer"));
    }

    #[test]
    fn test_load_washington_lacks_optional_columns() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), City::Washington, WASHINGTON_CSV);

        let table = load_city_data(dir.path(), City::Washington).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.capabilities.has_gender);
        assert!(!table.capabilities.has_birth_year);
        assert!((table.rows[0].trip_duration - 489.066).abs() < 1e-9);
        assert!(table.rows.iter().all(|r| r.gender.is_none()));
    }

    #[test]
    fn test_load_missing_file_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load_city_data(dir.path(), City::NewYorkCity).unwrap_err();
        match err {
            BikeshareError::DataUnavailable { city, path, .. } => {
                assert_eq!(city, "new york city");
                assert!(path.ends_with("new_york_city.csv"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ── read_trips ────────────────────────────────────────────────────────────

    #[test]
    fn test_bad_timestamp_is_malformed_record() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,2017-01-01 00:20:53,776,A,B,Subscriber
not a time,2017-01-01 00:20:53,776,A,B,Subscriber
";
        let err = read_trips(City::Chicago, Path::new("chicago.csv"), csv.as_bytes()).unwrap_err();
        match err {
            BikeshareError::MalformedRecord { line, reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("not a time"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_duration_is_malformed_record() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,2017-01-01 00:20:53,long,A,B,Subscriber
";
        let err = read_trips(City::Chicago, Path::new("chicago.csv"), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, BikeshareError::MalformedRecord { line: 2, .. }));
        assert!(err.aborts_iteration());
    }

    #[test]
    fn test_ragged_row_is_malformed_record() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:07:57,2017-01-01 00:20:53,776,A
";
        let err = read_trips(City::Chicago, Path::new("chicago.csv"), csv.as_bytes()).unwrap_err();
        assert!(matches!(err, BikeshareError::MalformedRecord { .. }));
    }

    #[test]
    fn test_header_only_file_gives_empty_table() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender\n";
        let table = read_trips(City::NewYorkCity, Path::new("nyc.csv"), csv.as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.capabilities.has_gender);
        assert!(!table.capabilities.has_birth_year);
    }
}

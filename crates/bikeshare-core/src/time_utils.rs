use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use tracing::debug;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Layouts seen in the trip datasets, tried in order.
const FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a trip timestamp such as `"2017-01-01 00:07:57"`.
///
/// The datasets record local wall-clock time without a zone, so the result
/// is a [`NaiveDateTime`]. Returns `None` for empty or unrecognised input.
pub fn parse_trip_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok());
    if parsed.is_none() {
        debug!("could not parse trip timestamp \"{}\"", trimmed);
    }
    parsed
}

// ── Calendar derivation ───────────────────────────────────────────────────────

/// Calendar fields derived from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// 1-12
    pub month: u32,
    pub weekday: Weekday,
    /// 0-23
    pub hour: u32,
}

impl CalendarFields {
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            month: ts.month(),
            weekday: ts.weekday(),
            hour: ts.hour(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_datetime() {
        let ts = parse_trip_timestamp("2017-01-01 00:07:57").unwrap();
        assert_eq!(ts.to_string(), "2017-01-01 00:07:57");
    }

    #[test]
    fn test_parse_fractional_and_t_separator() {
        assert!(parse_trip_timestamp("2017-06-23 15:09:32.5").is_some());
        assert!(parse_trip_timestamp("2017-06-23T15:09:32").is_some());
        assert!(parse_trip_timestamp("2017-06-23 15:09").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_trip_timestamp("").is_none());
        assert!(parse_trip_timestamp("   ").is_none());
        assert!(parse_trip_timestamp("yesterday").is_none());
        assert!(parse_trip_timestamp("2017-13-01 00:00:00").is_none());
    }

    #[test]
    fn test_calendar_fields() {
        // 2017-03-03 was a Friday.
        let ts = parse_trip_timestamp("2017-03-03 17:45:00").unwrap();
        let cal = CalendarFields::from_timestamp(&ts);
        assert_eq!(cal.month, 3);
        assert_eq!(cal.weekday, Weekday::Fri);
        assert_eq!(cal.hour, 17);
    }
}

//! Plain-text rendering of the four statistics reports.

use std::io::{self, Write};
use std::time::Duration;

use bikeshare_core::formatting::{
    format_count, format_hour, format_number, format_seconds, percent_of,
};
use bikeshare_core::models::{month_name, weekday_name, TripFilter, TripTable};
use bikeshare_data::analysis::{
    ColumnStats, DurationStats, StationStats, TimeStats, Timed, TripAnalysis, UserStats,
};

use crate::themes::Theme;

/// Width of the dashed rule printed after each report.
pub const SEPARATOR_WIDTH: usize = 40;

/// Printed in place of a report when the filters leave no rows.
pub const NO_DATA: &str = "No data for the selected filters.";

/// Summary line naming the city, the filters and the row count.
pub fn write_selection<W: Write>(
    out: &mut W,
    table: &TripTable,
    filter: &TripFilter,
    theme: &Theme,
) -> io::Result<()> {
    writeln!(
        out,
        "\n{} ({}): {} trips",
        theme.paint(theme.heading, table.city.display_name()),
        filter.describe(),
        format_count(table.len())
    )?;
    write_separator(out, theme)
}

/// Render every report in a fixed order.
pub fn write_analysis<W: Write>(
    out: &mut W,
    analysis: &TripAnalysis,
    theme: &Theme,
) -> io::Result<()> {
    write_time_stats(out, &analysis.time, theme)?;
    write_station_stats(out, &analysis.stations, theme)?;
    write_duration_stats(out, &analysis.duration, theme)?;
    write_user_stats(out, &analysis.users, theme)
}

pub fn write_time_stats<W: Write>(
    out: &mut W,
    report: &Timed<Option<TimeStats>>,
    theme: &Theme,
) -> io::Result<()> {
    write_heading(out, "Calculating The Most Frequent Times of Travel...", theme)?;
    match &report.value {
        Some(stats) => {
            let month = month_name(stats.month).map(title_case).unwrap_or_default();
            write_fact(out, "The most common month is", &month, theme)?;
            write_fact(
                out,
                "The most common day of the week is",
                &title_case(weekday_name(stats.weekday)),
                theme,
            )?;
            write_fact(
                out,
                "The most common start hour is",
                &format!("{} ({})", stats.hour, format_hour(stats.hour)),
                theme,
            )?;
        }
        None => write_no_data(out, theme)?,
    }
    write_footer(out, report.elapsed, theme)
}

pub fn write_station_stats<W: Write>(
    out: &mut W,
    report: &Timed<Option<StationStats>>,
    theme: &Theme,
) -> io::Result<()> {
    write_heading(out, "Calculating The Most Popular Stations and Trip...", theme)?;
    match &report.value {
        Some(stats) => {
            write_fact(out, "The most common start station is", &stats.start_station, theme)?;
            write_fact(out, "The most common end station is", &stats.end_station, theme)?;
            writeln!(
                out,
                "The most frequent trip is from {} to {} ({} trips).",
                theme.paint(theme.value, &stats.trip.0),
                theme.paint(theme.value, &stats.trip.1),
                format_count(stats.trip_count)
            )?;
        }
        None => write_no_data(out, theme)?,
    }
    write_footer(out, report.elapsed, theme)
}

pub fn write_duration_stats<W: Write>(
    out: &mut W,
    report: &Timed<Option<DurationStats>>,
    theme: &Theme,
) -> io::Result<()> {
    write_heading(out, "Calculating Trip Duration...", theme)?;
    match &report.value {
        Some(stats) => {
            writeln!(
                out,
                "Total travel time: {} seconds ({}).",
                theme.paint(theme.value, &format_number(stats.total_seconds, 0)),
                format_seconds(stats.total_seconds)
            )?;
            writeln!(
                out,
                "Average travel time: {} seconds ({}).",
                theme.paint(theme.value, &format_number(stats.mean_seconds, 2)),
                format_seconds(stats.mean_seconds)
            )?;
        }
        None => write_no_data(out, theme)?,
    }
    write_footer(out, report.elapsed, theme)
}

pub fn write_user_stats<W: Write>(
    out: &mut W,
    report: &Timed<UserStats>,
    theme: &Theme,
) -> io::Result<()> {
    write_heading(out, "Calculating User Stats...", theme)?;
    let stats = &report.value;

    writeln!(out, "User types:")?;
    write_counts(out, &stats.user_types, theme)?;

    match &stats.gender {
        ColumnStats::Available(counts) => {
            writeln!(out, "\nGender breakdown:")?;
            write_counts(out, counts, theme)?;
        }
        ColumnStats::Unavailable => {
            writeln!(out, "\n{}", theme.paint(theme.dim, "Gender data not available."))?;
        }
    }

    match &stats.birth_year {
        ColumnStats::Available(Some(years)) => {
            writeln!(out)?;
            write_fact(out, "Earliest year of birth", &years.earliest.to_string(), theme)?;
            write_fact(
                out,
                "Most recent year of birth",
                &years.most_recent.to_string(),
                theme,
            )?;
            write_fact(
                out,
                "Most common year of birth",
                &years.most_common.to_string(),
                theme,
            )?;
        }
        ColumnStats::Available(None) => {
            writeln!(out, "\nBirth year: {}", NO_DATA)?;
        }
        ColumnStats::Unavailable => {
            writeln!(
                out,
                "\n{}",
                theme.paint(theme.dim, "Birth year data not available.")
            )?;
        }
    }

    write_footer(out, report.elapsed, theme)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn write_heading<W: Write>(out: &mut W, text: &str, theme: &Theme) -> io::Result<()> {
    writeln!(out, "\n{}\n", theme.paint(theme.heading, text))
}

fn write_fact<W: Write>(out: &mut W, label: &str, value: &str, theme: &Theme) -> io::Result<()> {
    writeln!(
        out,
        "{}: {}",
        theme.paint(theme.label, label),
        theme.paint(theme.value, value)
    )
}

fn write_counts<W: Write>(
    out: &mut W,
    counts: &[(String, usize)],
    theme: &Theme,
) -> io::Result<()> {
    if counts.is_empty() {
        return writeln!(out, "  {}", NO_DATA);
    }
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    for (name, count) in counts {
        writeln!(
            out,
            "  {}: {} ({:.1}%)",
            name,
            theme.paint(theme.value, &format_count(*count)),
            percent_of(*count, total)
        )?;
    }
    Ok(())
}

fn write_no_data<W: Write>(out: &mut W, theme: &Theme) -> io::Result<()> {
    writeln!(out, "{}", theme.paint(theme.warning, NO_DATA))
}

fn write_footer<W: Write>(out: &mut W, elapsed: Duration, theme: &Theme) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        theme.paint(
            theme.dim,
            &format!("This took {:.4} seconds.", elapsed.as_secs_f64())
        )
    )?;
    write_separator(out, theme)
}

fn write_separator<W: Write>(out: &mut W, theme: &Theme) -> io::Result<()> {
    writeln!(out, "{}", theme.paint(theme.separator, &"-".repeat(SEPARATOR_WIDTH)))
}

/// `"march"` → `"March"`
fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

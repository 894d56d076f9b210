//! Aligned text rendering of raw trip rows for the pager.
//!
//! Column widths are measured with [`unicode_width`] so station names with
//! accented or wide characters still line up.

use bikeshare_core::models::{Capabilities, TripRecord};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Shown for a missing optional cell.
pub const MISSING: &str = "NaN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Render `rows` as a header line followed by one line per row.
///
/// Gender and birth-year columns only appear when `capabilities` says the
/// dataset has them. Returns an empty string for an empty slice.
pub fn render_rows(rows: &[TripRecord], capabilities: Capabilities, theme: &Theme) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut columns: Vec<(&str, Align)> = vec![
        ("", Align::Right),
        ("Start Time", Align::Left),
        ("End Time", Align::Left),
        ("Trip Duration", Align::Right),
        ("Start Station", Align::Left),
        ("End Station", Align::Left),
        ("User Type", Align::Left),
    ];
    if capabilities.has_gender {
        columns.push(("Gender", Align::Left));
    }
    if capabilities.has_birth_year {
        columns.push(("Birth Year", Align::Right));
    }

    let cells: Vec<Vec<String>> = rows.iter().map(|r| row_cells(r, capabilities)).collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (title, _))| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(title.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|((title, align), w)| pad(title, *w, *align))
        .collect();

    let mut out = String::new();
    out.push_str(&theme.paint(theme.table_header, header.join("  ").trim_end()));
    out.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&columns)
            .zip(&widths)
            .map(|((cell, (_, align)), w)| pad(cell, *w, *align))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }

    out
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn row_cells(row: &TripRecord, capabilities: Capabilities) -> Vec<String> {
    let mut cells = vec![
        row.row_index.to_string(),
        row.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        row.end_time.clone(),
        format_duration_cell(row.trip_duration),
        row.start_station.clone(),
        row.end_station.clone(),
        row.user_type.clone().unwrap_or_else(|| MISSING.to_string()),
    ];
    if capabilities.has_gender {
        cells.push(row.gender.clone().unwrap_or_else(|| MISSING.to_string()));
    }
    if capabilities.has_birth_year {
        cells.push(
            row.birth_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
        );
    }
    cells
}

/// Whole seconds print without decimals, fractional ones with three.
fn format_duration_cell(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{}", seconds as i64)
    } else {
        format!("{:.3}", seconds)
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    match align {
        Align::Left => format!("{}{}", text, fill),
        Align::Right => format!("{}{}", fill, text),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

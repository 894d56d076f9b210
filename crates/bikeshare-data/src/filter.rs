//! Month / weekday narrowing of a loaded trip table.

use bikeshare_core::models::{TripFilter, TripTable};
use tracing::debug;

/// Keep only the rows of `table` accepted by `filter`, in file order.
///
/// The input is left untouched; the result has the same city and
/// capabilities. An `All`/`All` filter returns an identical copy.
pub fn filter_table(table: &TripTable, filter: &TripFilter) -> TripTable {
    let rows: Vec<_> = table
        .rows
        .iter()
        .filter(|row| filter.accepts(row))
        .cloned()
        .collect();

    debug!(
        "Filter ({}) kept {} of {} rows for {}",
        filter.describe(),
        rows.len(),
        table.len(),
        table.city.key()
    );

    TripTable::new(table.city, table.capabilities, rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

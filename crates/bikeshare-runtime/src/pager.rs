//! Five-rows-at-a-time browsing of the filtered table.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{TripRecord, TripTable, YES_NO_CHOICES};
use bikeshare_ui::table_view::render_rows;

use crate::console::Console;

/// Rows shown per "yes".
pub const PAGE_SIZE: usize = 5;

/// Printed once the cursor has passed the last row.
pub const END_OF_DATA: &str = "No more data to display.";

const PAGER_PROMPT: &str = "\nWould you like to see 5 lines of raw data? Enter yes or no: ";

/// Cursor over a table, advanced one page at a time.
#[derive(Debug, Clone, Default)]
pub struct RawDataPager {
    cursor: usize,
}

/// How a pager run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerSummary {
    pub pages_shown: usize,
    /// `true` when the end-of-data notice was printed, `false` on "no".
    pub exhausted: bool,
}

impl RawDataPager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The next window of up to [`PAGE_SIZE`] rows, or `None` when exhausted.
    pub fn next_page<'t>(&mut self, table: &'t TripTable) -> Option<&'t [TripRecord]> {
        if self.is_exhausted(table) {
            return None;
        }
        let page = table.window(self.cursor, PAGE_SIZE);
        self.cursor += PAGE_SIZE;
        Some(page)
    }

    pub fn is_exhausted(&self, table: &TripTable) -> bool {
        self.cursor >= table.len()
    }

    /// Offer pages on the console until the user says "no" or the rows run
    /// out. Answers other than yes/no are re-prompted.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        table: &TripTable,
    ) -> Result<PagerSummary> {
        let mut pages_shown = 0;

        loop {
            let answer = console.prompt_choice(PAGER_PROMPT, &YES_NO_CHOICES)?;
            if answer == "no" {
                return Ok(PagerSummary {
                    pages_shown,
                    exhausted: false,
                });
            }

            if let Some(rows) = self.next_page(table) {
                let (out, theme) = console.output_with_theme();
                let rendered = render_rows(rows, table.capabilities, theme);
                write!(out, "{}", rendered)?;
                pages_shown += 1;
            }

            if self.is_exhausted(table) {
                console.say(&format!("\n{}", END_OF_DATA))?;
                return Ok(PagerSummary {
                    pages_shown,
                    exhausted: true,
                });
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

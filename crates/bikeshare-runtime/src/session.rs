//! The interactive session loop.
//!
//! Each iteration prompts for a city and filters, loads and narrows the
//! dataset, prints the four reports, offers the raw-data pager and finally
//! asks whether to start over. Nothing survives from one iteration to the
//! next.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, TripFilter, DAY_CHOICES, MONTH_CHOICES};
use bikeshare_data::analysis::analyze_table;
use bikeshare_data::filter::filter_table;
use bikeshare_data::reader::load_city_data;
use bikeshare_ui::report_view::{write_analysis, write_selection, SEPARATOR_WIDTH};

use crate::console::Console;
use crate::pager::RawDataPager;

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const CITY_PROMPT: &str = "Which city would you like to explore? (chicago, new york city, washington): ";
const MONTH_PROMPT: &str = "Which month? (all, january, february, ... , june): ";
const DAY_PROMPT: &str = "Which day? (all, monday, tuesday, ... sunday): ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no: ";

// ── Public types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Terminated,
}

/// What the user asked to explore in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub city: City,
    pub filter: TripFilter,
}

/// Drives prompt → load → filter → report → page → restart.
pub struct Session<R, W> {
    console: Console<R, W>,
    data_dir: PathBuf,
    iterations: usize,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            console,
            data_dir: data_dir.into(),
            iterations: 0,
        }
    }

    /// Number of iterations started so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run iterations until the user declines to restart or input ends.
    ///
    /// Missing or malformed datasets are reported and end only the current
    /// iteration. Other errors are returned.
    pub fn run(&mut self) -> Result<()> {
        let mut state = SessionState::Active;
        while state == SessionState::Active {
            state = self.run_iteration()?;
        }
        tracing::info!("session finished after {} iteration(s)", self.iterations);
        Ok(())
    }

    /// One pass of the loop, returning the state to continue in.
    pub fn run_iteration(&mut self) -> Result<SessionState> {
        self.iterations += 1;
        tracing::info!("starting iteration {}", self.iterations);

        match self.explore() {
            Ok(()) => {}
            Err(BikeshareError::InputClosed) => {
                tracing::info!("input closed; ending session");
                return Ok(SessionState::Terminated);
            }
            Err(e) if e.aborts_iteration() => {
                tracing::warn!(error = %e, "iteration aborted");
                self.console.say_error(&e.to_string())?;
            }
            Err(e) => return Err(e),
        }

        self.ask_restart()
    }

    /// Greet the user and collect a validated city and filter.
    pub fn prompt_selection(&mut self) -> Result<Selection> {
        self.console.say(GREETING)?;

        let city: City = self.console.prompt_choice(CITY_PROMPT, &City::keys())?.parse()?;
        let month = self.console.prompt_choice(MONTH_PROMPT, &MONTH_CHOICES)?;
        let day = self.console.prompt_choice(DAY_PROMPT, &DAY_CHOICES)?;
        self.console.say(&"-".repeat(SEPARATOR_WIDTH))?;

        Ok(Selection {
            city,
            filter: TripFilter::from_choices(&month, &day)?,
        })
    }

    // ── Private ───────────────────────────────────────────────────────────────

    fn explore(&mut self) -> Result<()> {
        let selection = self.prompt_selection()?;
        tracing::info!(
            city = selection.city.key(),
            filter = %selection.filter.describe(),
            "selection made"
        );

        let table = load_city_data(&self.data_dir, selection.city)?;
        let filtered = filter_table(&table, &selection.filter);
        drop(table);

        let analysis = analyze_table(&filtered);
        {
            let (out, theme) = self.console.output_with_theme();
            write_selection(out, &filtered, &selection.filter, theme)?;
            write_analysis(out, &analysis, theme)?;
        }

        RawDataPager::new().run(&mut self.console, &filtered)?;
        Ok(())
    }

    fn ask_restart(&mut self) -> Result<SessionState> {
        let answer = self.console.read_answer(RESTART_PROMPT)?;
        Ok(match answer.as_deref() {
            Some("yes") => SessionState::Active,
            _ => SessionState::Terminated,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Line-based console with prompt-until-valid input.

use std::io::{BufRead, Write};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_ui::themes::Theme;
use tracing::debug;

/// Prompting front end over any line reader and writer.
///
/// Production code wraps locked stdin/stdout; tests pass a `Cursor` and a
/// `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
    theme: Theme,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, theme: Theme) -> Self {
        Self {
            input,
            output,
            theme,
        }
    }

    /// Writer and theme together, so renderers can borrow both.
    pub fn output_with_theme(&mut self) -> (&mut W, &Theme) {
        (&mut self.output, &self.theme)
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Write an error message in the theme's error style.
    pub fn say_error(&mut self, text: &str) -> Result<()> {
        let painted = self.theme.paint(self.theme.error, text);
        writeln!(self.output, "{}", painted)?;
        Ok(())
    }

    /// Print `prompt` and read one line, trimmed and lowercased.
    ///
    /// Returns `None` when the input has ended.
    pub fn read_answer(&mut self, prompt: &str) -> Result<Option<String>> {
        let painted = self.theme.paint(self.theme.prompt, prompt);
        write!(self.output, "{}", painted)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_lowercase()))
    }

    /// Prompt until the answer is one of `accepted` (all lowercase).
    ///
    /// Invalid answers print a rejection naming the accepted values and
    /// prompt again, without limit. Fails only with `InputClosed` when the
    /// input ends, or on an I/O error.
    pub fn prompt_choice(&mut self, prompt: &str, accepted: &[&str]) -> Result<String> {
        loop {
            let Some(answer) = self.read_answer(prompt)? else {
                return Err(BikeshareError::InputClosed);
            };
            if accepted.contains(&answer.as_str()) {
                return Ok(answer);
            }

            debug!("rejected answer \"{}\"", answer);
            let message = format!(
                "Invalid input \"{}\". Please choose from: {}.",
                answer,
                accepted.join(", ")
            );
            let painted = self.theme.paint(self.theme.warning, &message);
            writeln!(self.output, "{}", painted)?;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{City, DAY_CHOICES, MONTH_CHOICES, YES_NO_CHOICES};
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            Theme::plain(),
        )
    }

    fn output_of(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_parts().1).unwrap()
    }

    // ── prompt_choice ─────────────────────────────────────────────────────────

    #[test]
    fn test_prompt_choice_accepts_first_valid() {
        let mut c = console("chicago\n");
        let city = c.prompt_choice("City? ", &City::keys()).unwrap();
        assert_eq!(city, "chicago");
        assert_eq!(output_of(c), "City? ");
    }

    #[test]
    fn test_prompt_choice_normalises_case_and_whitespace() {
        let mut c = console("   New York City  \n");
        let city = c.prompt_choice("City? ", &City::keys()).unwrap();
        assert_eq!(city, "new york city");
    }

    #[test]
    fn test_prompt_choice_retries_until_valid() {
        let mut c = console("boston\n\njuly\nMarch\n");
        let month = c.prompt_choice("Month? ", &MONTH_CHOICES).unwrap();
        assert_eq!(month, "march");

        let out = output_of(c);
        assert_eq!(out.matches("Month? ").count(), 4);
        assert_eq!(out.matches("Invalid input").count(), 3);
        assert!(out.contains("Please choose from: all, january, february, march, april, may, june."));
    }

    #[test]
    fn test_prompt_choice_never_returns_outside_set() {
        let inputs = ["someday\nfunday\nSunday\n", "x\nALL\n", "\n\n\ntuesday\n"];
        for input in inputs {
            let mut c = console(input);
            let day = c.prompt_choice("Day? ", &DAY_CHOICES).unwrap();
            assert!(DAY_CHOICES.contains(&day.as_str()), "{day} not accepted");
        }
    }

    #[test]
    fn test_prompt_choice_input_closed() {
        let mut c = console("maybe\n");
        let err = c.prompt_choice("Yes or no? ", &YES_NO_CHOICES).unwrap_err();
        assert!(matches!(err, BikeshareError::InputClosed));
    }

    // ── read_answer ───────────────────────────────────────────────────────────

    #[test]
    fn test_read_answer_eof() {
        let mut c = console("");
        assert_eq!(c.read_answer("> ").unwrap(), None);
    }

    #[test]
    fn test_read_answer_without_trailing_newline() {
        let mut c = console("YES");
        assert_eq!(c.read_answer("> ").unwrap(), Some("yes".to_string()));
    }
}

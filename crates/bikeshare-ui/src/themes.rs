use crossterm::style::{Attribute, Color, ContentStyle};

/// How console colour was requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse a `--color` value. Unknown values behave like `"auto"`.
    pub fn from_setting(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        }
    }

    /// Resolve to on/off given whether stdout is a terminal.
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => is_terminal,
        }
    }
}

/// Styles used by the console renderers.
#[derive(Debug, Clone)]
pub struct Theme {
    /// When `false`, [`Theme::paint`] returns text unchanged.
    pub enabled: bool,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub heading: ContentStyle,
    pub label: ContentStyle,
    pub value: ContentStyle,
    pub dim: ContentStyle,
    pub separator: ContentStyle,

    // ── Status ───────────────────────────────────────────────────────────────
    pub prompt: ContentStyle,
    pub warning: ContentStyle,
    pub error: ContentStyle,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: ContentStyle,
}

impl Theme {
    /// Coloured theme for dark or light terminals alike.
    pub fn colored() -> Self {
        Self {
            enabled: true,
            heading: style(Some(Color::Cyan), &[Attribute::Bold]),
            label: ContentStyle::new(),
            value: style(None, &[Attribute::Bold]),
            dim: style(Some(Color::DarkGrey), &[]),
            separator: style(Some(Color::DarkGrey), &[]),
            prompt: style(Some(Color::Green), &[]),
            warning: style(Some(Color::Yellow), &[]),
            error: style(Some(Color::Red), &[Attribute::Bold]),
            table_header: style(None, &[Attribute::Bold, Attribute::Underlined]),
        }
    }

    /// Theme that emits no escape sequences.
    pub fn plain() -> Self {
        Self {
            enabled: false,
            ..Self::colored()
        }
    }

    pub fn for_mode(mode: ColorMode, is_terminal: bool) -> Self {
        if mode.enabled(is_terminal) {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Apply `style` to `text`.
    pub fn paint(&self, style: ContentStyle, text: &str) -> String {
        if self.enabled {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn style(foreground: Option<Color>, attributes: &[Attribute]) -> ContentStyle {
    let mut style = ContentStyle::new();
    style.foreground_color = foreground;
    for attribute in attributes {
        style.attributes.set(*attribute);
    }
    style
}

impl Default for Theme {
    fn default() -> Self {
        Self::plain()
    }
}

//! The style registry: bar glyphs, decoration frames, and colour escapes.
//!
//! Styles are looked up by their display name (e.g. `"Solid"`, `"Moon spinner"`).
//! An unknown name is a [`ConfigError`], raised while the progress line is built.

use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// Filled/empty glyph pair used to draw the bar.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarStyle {
    /// `=` cells on blank background.
    Equal,
    /// Full block (`█`) cells on blank background.
    #[default]
    Solid,
    /// `◉` cells on `◯` background.
    Circle,
    /// `▣` cells on `▢` background.
    Square,
}

impl BarStyle {
    /// Every registered bar style.
    pub const ALL: [Self; 4] = [Self::Equal, Self::Solid, Self::Circle, Self::Square];

    /// Registry name of the style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Equal => "Equal",
            Self::Solid => "Solid",
            Self::Circle => "Circle",
            Self::Square => "Square",
        }
    }

    /// Glyph used for filled cells.
    #[must_use]
    pub const fn full(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::Solid => "█",
            Self::Circle => "◉",
            Self::Square => "▣",
        }
    }

    /// Glyph used for empty cells.
    #[must_use]
    pub const fn empty(self) -> &'static str {
        match self {
            Self::Equal | Self::Solid => " ",
            Self::Circle => "◯",
            Self::Square => "▢",
        }
    }
}

impl FromStr for BarStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ConfigError::UnknownBarStyle(s.into()))
    }
}

impl fmt::Display for BarStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frame sequence for the liveness indicator.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecorationStyle {
    /// `- \ | /`
    BarSpinner,
    /// Filling ellipsis.
    #[default]
    Dots,
    /// Braille column filling from the bottom.
    Column,
    /// Quarter-pie rotation.
    PieSpinner,
    /// Half-moon rotation.
    MoonSpinner,
}

impl DecorationStyle {
    /// Every registered decoration style.
    pub const ALL: [Self; 5] = [
        Self::BarSpinner,
        Self::Dots,
        Self::Column,
        Self::PieSpinner,
        Self::MoonSpinner,
    ];

    /// Registry name of the style.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BarSpinner => "Bar spinner",
            Self::Dots => "Dots",
            Self::Column => "Column",
            Self::PieSpinner => "Pie spinner",
            Self::MoonSpinner => "Moon spinner",
        }
    }

    /// The ordered, non-empty frame sequence.
    #[must_use]
    pub const fn frames(self) -> &'static [&'static str] {
        match self {
            Self::BarSpinner => &["-", "\\", "|", "/"],
            Self::Dots => &["   ", ".  ", ".. ", "..."],
            Self::Column => &["⡀", "⡄", "⡆", "⡇", "⣇", "⣧", "⣷", "⣿"],
            Self::PieSpinner => &["◷", "◶", "◵", "◴"],
            Self::MoonSpinner => &["◑", "◒", "◐", "◓"],
        }
    }
}

impl FromStr for DecorationStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ConfigError::UnknownDecorationStyle(s.into()))
    }
}

impl fmt::Display for DecorationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named colours and text attributes the renderer asks for.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    /// Clears every attribute.
    Reset,
    /// Bold text, used for segment captions.
    Bold,
    /// Completion colour.
    Green,
    /// Leads the rainbow cycle.
    Red,
    /// Closes the rainbow cycle.
    Magenta,
    /// Rainbow only.
    Yellow,
    /// Accent colour for the decoration and the bar highlight.
    Cyan,
    /// Rainbow only.
    Blue,
}

impl Color {
    /// Order in which rainbow bars cycle through colours.
    pub const RAINBOW: [Self; 6] = [
        Self::Red,
        Self::Yellow,
        Self::Green,
        Self::Cyan,
        Self::Blue,
        Self::Magenta,
    ];

    const COUNT: usize = 8;
}

/// Immutable lookup from [`Color`] to the escape sequence that produces it.
///
/// Swap in [`Palette::plain`] to render without any escapes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    escapes: [&'static str; Color::COUNT],
}

impl Palette {
    /// Standard ANSI escapes.
    #[must_use]
    pub const fn ansi() -> Self {
        Self {
            escapes: [
                "\x1b[0m",
                "\x1b[1m",
                "\x1b[3;32;1m",
                "\x1b[31;1m",
                "\x1b[35;1m",
                "\x1b[33;1m",
                "\x1b[36;1m",
                "\x1b[34;1m",
            ],
        }
    }

    /// Every colour maps to the empty string.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            escapes: [""; Color::COUNT],
        }
    }

    /// ANSI when stdout is a terminal, plain otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if is_terminal::is_terminal(std::io::stdout()) {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    /// Returns a copy of this palette with `color` mapped to `escape`.
    #[must_use]
    pub const fn with(mut self, color: Color, escape: &'static str) -> Self {
        self.escapes[color as usize] = escape;
        self
    }

    /// Escape sequence for `color`.
    #[must_use]
    pub const fn get(&self, color: Color) -> &'static str {
        self.escapes[color as usize]
    }

    /// `text` wrapped in `color` and a trailing reset.
    ///
    /// With the plain palette this is just `text`.
    #[must_use]
    pub fn paint(&self, color: Color, text: &str) -> String {
        format!("{}{text}{}", self.get(color), self.get(Color::Reset))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

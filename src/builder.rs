//! Fluent interface for constructing [`Progress`] instances.
//!
//! [`ProgressBuilder`] collects the mode, label and [`RenderConfig`] for a progress
//! line and validates everything in [`build`](ProgressBuilder::build). Style names
//! are resolved against the registry only at that point, so a typo surfaces as a
//! single [`ConfigError`](crate::ConfigError) before any state exists.
//!
//! ```
//! use progress_line::ProgressBuilder;
//!
//! let mut bar = ProgressBuilder::bounded(3)
//!     .with_label("copy")
//!     .with_bar_style("Equal")
//!     .with_decoration("Bar spinner")
//!     .build()
//!     .unwrap();
//!
//! let line = bar.advance(None, Some("a.txt"));
//! assert!(line.contains("copy: a.txt"));
//! ```

use compact_str::CompactString;

use crate::{
    clock::{Clock, SystemClock},
    duration::DurationFormat,
    error::ConfigResult,
    progress::{Progress, RenderConfig, SegmentToggles},
    style::{BarStyle, DecorationStyle, Palette},
};

/// A builder pattern for constructing [`Progress`] instances.
#[derive(Clone, Debug)]
pub struct ProgressBuilder {
    total: Option<u64>,
    label: Option<CompactString>,
    bar_style: CompactString,
    decoration: CompactString,
    config: RenderConfig,
}

impl ProgressBuilder {
    /// Starts building a progress bar with a known total.
    #[must_use]
    pub fn bounded(total: u64) -> Self {
        Self::new(Some(total))
    }

    /// Starts building an indicator with no known total.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Starts building with an optional total.
    #[must_use]
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total,
            label: None,
            bar_style: BarStyle::default().name().into(),
            decoration: DecorationStyle::default().name().into(),
            config: RenderConfig::default(),
        }
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    #[must_use]
    pub fn from_config(total: Option<u64>, config: RenderConfig) -> Self {
        Self {
            total,
            label: None,
            bar_style: config.bar_style.name().into(),
            decoration: config.decoration.name().into(),
            config,
        }
    }

    /// Replaces the total; `None` switches to an unbounded indicator.
    #[must_use]
    pub const fn with_total(mut self, total: Option<u64>) -> Self {
        self.total = total;
        self
    }

    /// Sets the fixed label shown before the count.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<CompactString>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the number of cells in the bar.
    #[must_use]
    pub const fn with_bar_width(mut self, width: usize) -> Self {
        self.config.bar_width = width;
        self
    }

    /// Selects a bar style by registry name (`"Equal"`, `"Solid"`, `"Circle"`, `"Square"`).
    #[must_use]
    pub fn with_bar_style(mut self, name: impl Into<CompactString>) -> Self {
        self.bar_style = name.into();
        self
    }

    /// Selects a decoration by registry name (`"Bar spinner"`, `"Dots"`, `"Column"`,
    /// `"Pie spinner"`, `"Moon spinner"`).
    #[must_use]
    pub fn with_decoration(mut self, name: impl Into<CompactString>) -> Self {
        self.decoration = name.into();
        self
    }

    /// Colours the filled cells with a scrolling rainbow.
    #[must_use]
    pub const fn with_rainbow(mut self, rainbow: bool) -> Self {
        self.config.rainbow = rainbow;
        self
    }

    /// Redraw in place (`true`, the default) or append one line per tick.
    #[must_use]
    pub const fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Text placed before the first segment.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<CompactString>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Text placed after the last segment.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<CompactString>) -> Self {
        self.config.suffix = suffix.into();
        self
    }

    /// Sets the escape lookup; use [`Palette::plain`] for uncoloured output.
    #[must_use]
    pub const fn with_palette(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    /// Pads duration units to fixed widths.
    #[must_use]
    pub const fn with_padded_durations(mut self, padded: bool) -> Self {
        self.config.durations = DurationFormat { padded };
        self
    }

    /// Replaces all segment switches at once.
    #[must_use]
    pub const fn with_segments(mut self, segments: SegmentToggles) -> Self {
        self.config.segments = segments;
        self
    }

    /// Shows or hides the spinner.
    #[must_use]
    pub const fn show_decoration(mut self, show: bool) -> Self {
        self.config.segments.decoration = show;
        self
    }

    /// Shows or hides the step count.
    #[must_use]
    pub const fn show_count(mut self, show: bool) -> Self {
        self.config.segments.count = show;
        self
    }

    /// Shows or hides the percentage.
    #[must_use]
    pub const fn show_percent(mut self, show: bool) -> Self {
        self.config.segments.percent = show;
        self
    }

    /// Shows or hides the run time.
    #[must_use]
    pub const fn show_run_time(mut self, show: bool) -> Self {
        self.config.segments.run_time = show;
        self
    }

    /// Shows or hides the rate.
    #[must_use]
    pub const fn show_rate(mut self, show: bool) -> Self {
        self.config.segments.rate = show;
        self
    }

    /// Shows or hides the ETA.
    #[must_use]
    pub const fn show_eta(mut self, show: bool) -> Self {
        self.config.segments.eta = show;
        self
    }

    /// Consumes the builder and returns a [`Progress`] on the system clock.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`](crate::ConfigError): zero total, zero width, or an unknown style name.
    pub fn build(self) -> ConfigResult<Progress<SystemClock>> {
        self.build_with_clock(SystemClock)
    }

    /// Consumes the builder and returns a [`Progress`] driven by `clock`.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_clock<C: Clock>(self, clock: C) -> ConfigResult<Progress<C>> {
        let mut config = self.config;
        config.bar_style = self.bar_style.parse()?;
        config.decoration = self.decoration.parse()?;
        Progress::new(config, self.total, self.label, clock)
    }
}

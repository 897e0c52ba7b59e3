//! The render-state engine.
//!
//! A [`Progress`] owns every piece of mutable state behind one progress line:
//! the step counter, the per-tick duration history, the spinner cursor and the
//! bar highlight position. Each call to [`Progress::advance`] records one tick and
//! returns the freshly composed line; the caller decides where to write it.
//!
//! # Modes
//!
//! * **Bounded**: a total is known. The line carries a zero-padded count, a bar,
//!   a percentage, an ETA, and a completion marker once `current >= total`.
//! * **Unbounded**: no total. Only the spinner, label, bare count, run time and
//!   rate are shown.
//!
//! The mode is fixed when the engine is built.
//!
//! # Timing
//!
//! The first tick establishes a baseline and is not added to the duration
//! history, so setup work before the loop does not skew the rate or the ETA.
//! Rate and ETA are derived from the mean of all recorded tick durations.

use std::time::Duration;

use compact_str::CompactString;
use tracing::{debug, trace};
use web_time::Instant;

use crate::{
    clock::{Clock, SystemClock},
    duration::DurationFormat,
    error::{ConfigError, ConfigResult},
    render::{RenderedLine, Segment, SegmentKind},
    style::{BarStyle, Color, DecorationStyle, Palette},
};

/// Bar width used when none is configured.
pub const DEFAULT_BAR_WIDTH: usize = 30;

/// Whether the engine knows its total.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProgressMode {
    /// Indicator only, total unknown.
    #[default]
    Unbounded,
    /// Known total.
    Bounded,
}

/// Per-segment switches. Everything is on by default.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentToggles {
    /// Spinner frame.
    pub decoration: bool,
    /// Step count.
    pub count: bool,
    /// Percentage (bounded only).
    pub percent: bool,
    /// Run time / total run time.
    pub run_time: bool,
    /// Iterations per second.
    pub rate: bool,
    /// Time remaining (bounded only).
    pub eta: bool,
}

impl Default for SegmentToggles {
    fn default() -> Self {
        Self {
            decoration: true,
            count: true,
            percent: true,
            run_time: true,
            rate: true,
            eta: true,
        }
    }
}

/// Immutable render configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    /// Number of cells between the bar brackets.
    pub bar_width: usize,
    /// Glyph pair for the bar.
    pub bar_style: BarStyle,
    /// Spinner frames.
    pub decoration: DecorationStyle,
    /// Colour filled cells with a scrolling rainbow instead of a single highlight.
    pub rainbow: bool,
    /// Redraw the line in place rather than appending a new line per tick.
    pub overwrite: bool,
    /// Which optional segments to render.
    pub segments: SegmentToggles,
    /// Text placed before the first segment.
    pub prefix: CompactString,
    /// Text placed after the last segment.
    pub suffix: CompactString,
    /// How run time and ETA values are laid out.
    pub durations: DurationFormat,
    /// Escape lookup.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            bar_style: BarStyle::default(),
            decoration: DecorationStyle::default(),
            rainbow: false,
            overwrite: true,
            segments: SegmentToggles::default(),
            prefix: CompactString::default(),
            suffix: CompactString::default(),
            durations: DurationFormat::default(),
            palette: Palette::default(),
        }
    }
}

/// A single progress line and all of its render state.
///
/// `Progress` is driven by one caller; it is not meant to be shared between
/// threads that advance it concurrently.
pub struct Progress<C = SystemClock> {
    config: RenderConfig,
    clock: C,

    total: Option<u64>,
    label: Option<CompactString>,

    current: u64,
    ticks: u64,

    start: Instant,
    last_tick: Instant,
    /// Duration of the most recent tick, baseline tick included.
    last_tick_secs: Option<f64>,
    step_durations: Vec<f64>,

    decoration_cursor: usize,
    color_lock: usize,
    rainbow_offset: usize,
    completion_logged: bool,
}

impl<C: Clock> Progress<C> {
    /// Creates an engine, validating the configuration first.
    ///
    /// Prefer [`ProgressBuilder`](crate::ProgressBuilder) for anything beyond the defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroTotal`] for a bounded total of zero and
    /// [`ConfigError::ZeroBarWidth`] for a zero-cell bar.
    pub fn new(
        config: RenderConfig,
        total: Option<u64>,
        label: Option<CompactString>,
        clock: C,
    ) -> ConfigResult<Self> {
        if total == Some(0) {
            return Err(ConfigError::ZeroTotal);
        }
        if config.bar_width == 0 {
            return Err(ConfigError::ZeroBarWidth);
        }

        Ok(Self::from_valid_parts(config, total, label, clock))
    }

    /// Assembles an engine from arguments already known to be valid.
    pub(crate) fn from_valid_parts(
        config: RenderConfig,
        total: Option<u64>,
        label: Option<CompactString>,
        clock: C,
    ) -> Self {
        let start = clock.now();
        debug!(
            total = ?total,
            bar_width = config.bar_width,
            bar_style = %config.bar_style,
            decoration = %config.decoration,
            rainbow = config.rainbow,
            overwrite = config.overwrite,
            "progress line created"
        );

        Self {
            config,
            clock,
            total,
            label,
            current: 0,
            ticks: 0,
            start,
            last_tick: start,
            last_tick_secs: None,
            step_durations: Vec::new(),
            decoration_cursor: 0,
            color_lock: 0,
            rainbow_offset: 0,
            completion_logged: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Bounded or unbounded.
    #[must_use]
    pub const fn mode(&self) -> ProgressMode {
        if self.total.is_some() {
            ProgressMode::Bounded
        } else {
            ProgressMode::Unbounded
        }
    }

    /// Steps completed so far.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Target step count, if bounded.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// The fixed label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The render configuration.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Recorded tick durations in seconds (the baseline tick is not included).
    #[must_use]
    pub fn step_durations(&self) -> &[f64] {
        &self.step_durations
    }

    /// Index of the spinner frame shown by the latest render.
    #[must_use]
    pub const fn decoration_index(&self) -> usize {
        self.decoration_cursor
    }

    /// `true` once a bounded engine has reached its total. Always `false` when unbounded.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.total.is_some_and(|total| self.current >= total)
    }

    // ========================================================================
    // Ticking
    // ========================================================================

    /// Records one tick and returns the composed line.
    ///
    /// `step` is a zero-based index of the step just completed; the engine stores
    /// `step + 1` as its count. Without it the count grows by one. The count never
    /// moves backwards: an index below the current count leaves it unchanged.
    pub fn advance(&mut self, step: Option<u64>, sublabel: Option<&str>) -> String {
        self.advance_line(step, sublabel).to_string()
    }

    /// Same as [`advance`](Self::advance) but returns the structured line.
    pub fn advance_line(&mut self, step: Option<u64>, sublabel: Option<&str>) -> RenderedLine {
        let now = self.clock.now();
        let tick = now.saturating_duration_since(self.last_tick).as_secs_f64();

        if self.current > 0 {
            self.step_durations.push(tick);
        }
        self.last_tick = now;
        self.last_tick_secs = Some(tick);

        self.current = match step {
            Some(index) => self.current.max(index.saturating_add(1)),
            None => self.current.saturating_add(1),
        };
        self.ticks += 1;

        trace!(current = self.current, tick_secs = tick, "progress tick");

        self.render(now, sublabel)
    }

    /// Redraws the line without completing a step.
    ///
    /// The spinner and the bar highlight move on, but the count and the timing
    /// history are untouched. Useful to show liveness while one long step runs.
    pub fn pulse(&mut self, sublabel: Option<&str>) -> String {
        self.pulse_line(sublabel).to_string()
    }

    /// Same as [`pulse`](Self::pulse) but returns the structured line.
    pub fn pulse_line(&mut self, sublabel: Option<&str>) -> RenderedLine {
        let now = self.clock.now();
        self.render(now, sublabel)
    }

    /// A plain-data view of the current counters and derived metrics.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            mode: self.mode(),
            current: self.current,
            total: self.total,
            ticks: self.ticks,
            elapsed: self.clock.now().saturating_duration_since(self.start),
            average_step: self.average_step().map(Duration::from_secs_f64),
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    fn render(&mut self, now: Instant, sublabel: Option<&str>) -> RenderedLine {
        let frames = self.config.decoration.frames();
        self.decoration_cursor = (self.decoration_cursor + 1) % frames.len();

        self.rainbow_offset = (self.rainbow_offset + 1) % Color::RAINBOW.len();
        let filled = self.filled_cells();
        if self.total.is_some() {
            self.color_lock += 1;
            if self.color_lock >= filled {
                self.color_lock = 0;
            }
        }

        let completed = self.is_finished();
        if completed && !self.completion_logged {
            self.completion_logged = true;
            debug!(
                current = self.current,
                elapsed_secs = now.saturating_duration_since(self.start).as_secs_f64(),
                "progress completed"
            );
        }

        let segments = [
            self.decoration_segment(completed),
            self.label_segment(sublabel),
            self.count_segment(),
            self.bar_segment(filled),
            self.percent_segment(),
            self.run_time_segment(now, completed),
            self.rate_segment(),
            self.eta_segment(completed),
            self.completed_segment(completed),
        ]
        .into_iter()
        .flatten()
        .collect();

        RenderedLine::new(segments, &self.config.prefix, &self.config.suffix, completed)
    }

    // Bounded by `bar_width`, so the narrowing back to usize is lossless.
    #[allow(clippy::cast_possible_truncation)]
    fn filled_cells(&self) -> usize {
        let Some(total) = self.total else {
            return 0;
        };
        let width = self.config.bar_width as u128;
        let done = u128::from(self.current.min(total));
        (width * done / u128::from(total)) as usize
    }

    fn average_step(&self) -> Option<f64> {
        if self.step_durations.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let len = self.step_durations.len() as f64;
        Some(self.step_durations.iter().sum::<f64>() / len)
    }

    fn caption(&self, caption: &str, value: &str) -> String {
        let palette = &self.config.palette;
        format!(
            "{}{caption}: {}{value}",
            palette.get(Color::Bold),
            palette.get(Color::Reset)
        )
    }

    fn decoration_segment(&self, completed: bool) -> Option<Segment> {
        if !self.config.segments.decoration || !self.config.overwrite || completed {
            return None;
        }
        let frame = self.config.decoration.frames()[self.decoration_cursor];
        let text = format!("[{}]", self.config.palette.paint(Color::Cyan, frame));
        Some(Segment::new(SegmentKind::Decoration, text))
    }

    fn label_segment(&self, sublabel: Option<&str>) -> Option<Segment> {
        let label = self.label.as_deref().filter(|label| !label.is_empty());
        let sublabel = sublabel.filter(|sub| !sub.is_empty());
        let text = match (label, sublabel) {
            (Some(label), Some(sub)) => format!("{label}: {sub}"),
            (Some(label), None) => label.to_owned(),
            (None, Some(sub)) => sub.to_owned(),
            (None, None) => return None,
        };
        Some(Segment::new(SegmentKind::Label, text))
    }

    fn count_segment(&self) -> Option<Segment> {
        if !self.config.segments.count {
            return None;
        }
        let text = match self.total {
            Some(total) => {
                let width = total.to_string().len();
                format!("{:0width$}/{total}", self.current)
            }
            None => self.current.to_string(),
        };
        Some(Segment::new(SegmentKind::Count, text))
    }

    fn bar_segment(&self, filled: usize) -> Option<Segment> {
        if self.total.is_none() {
            return None;
        }

        let style = self.config.bar_style;
        let palette = &self.config.palette;
        let width = self.config.bar_width;
        let mut bar = String::with_capacity(width * 4 + 2);

        bar.push('[');
        if self.config.rainbow {
            let offset = self.rainbow_offset;
            for cell in 0..filled {
                let index = (cell + Color::RAINBOW.len() - offset) % Color::RAINBOW.len();
                bar.push_str(palette.get(Color::RAINBOW[index]));
                bar.push_str(style.full());
            }
            if filled > 0 {
                bar.push_str(palette.get(Color::Reset));
            }
        } else {
            for cell in 0..filled {
                if cell == self.color_lock {
                    bar.push_str(&palette.paint(Color::Cyan, style.full()));
                } else {
                    bar.push_str(style.full());
                }
            }
        }
        bar.push_str(&style.empty().repeat(width - filled));
        bar.push(']');

        Some(Segment::new(SegmentKind::Bar, bar))
    }

    fn percent_segment(&self) -> Option<Segment> {
        if !self.config.segments.percent {
            return None;
        }
        let total = self.total?;
        let percent = rounded_percent(self.current, total);
        let text = format!("{percent:02}%");
        let text = if percent == 100 {
            self.config.palette.paint(Color::Green, &text)
        } else {
            text
        };
        Some(Segment::new(SegmentKind::Percent, text))
    }

    fn run_time_segment(&self, now: Instant, completed: bool) -> Option<Segment> {
        if !self.config.segments.run_time || self.ticks == 0 {
            return None;
        }
        let since_start = now.saturating_duration_since(self.start).as_secs_f64();
        let (caption, secs) = match self.total {
            Some(_) if completed => ("Total run time", since_start),
            Some(_) => ("Run time", self.last_tick_secs?),
            None => ("Run time", since_start),
        };
        let value = self.config.durations.format(secs);
        if value.is_empty() {
            return None;
        }
        Some(Segment::new(SegmentKind::RunTime, self.caption(caption, &value)))
    }

    fn rate_segment(&self) -> Option<Segment> {
        if !self.config.segments.rate {
            return None;
        }
        let average = self.average_step().filter(|avg| *avg > 0.0)?;
        let value = format!("{:.2} it/s", 1.0 / average);
        Some(Segment::new(SegmentKind::Rate, self.caption("Rate", &value)))
    }

    fn eta_segment(&self, completed: bool) -> Option<Segment> {
        if !self.config.segments.eta || completed {
            return None;
        }
        let total = self.total?;
        let average = self.average_step()?;
        #[allow(clippy::cast_precision_loss)]
        let remaining = total.saturating_sub(self.current) as f64;
        let value = self.config.durations.format(average * remaining);
        if value.is_empty() {
            return None;
        }
        Some(Segment::new(SegmentKind::Eta, self.caption("ETA", &value)))
    }

    fn completed_segment(&self, completed: bool) -> Option<Segment> {
        if !completed {
            return None;
        }
        let text = self.config.palette.paint(Color::Green, "Process Completed");
        Some(Segment::new(SegmentKind::Completed, text))
    }
}

/// `round(100 * current / total)`, halves rounding up.
fn rounded_percent(current: u64, total: u64) -> u64 {
    let scaled = (200 * u128::from(current) + u128::from(total)) / (2 * u128::from(total));
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

/// A plain-data snapshot of a [`Progress`] at a specific instant.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    mode: ProgressMode,
    current: u64,
    total: Option<u64>,
    ticks: u64,
    elapsed: Duration,
    average_step: Option<Duration>,
}

impl ProgressSnapshot {
    /// Bounded or unbounded.
    #[must_use]
    pub const fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Steps completed.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.current
    }

    /// Target step count, if bounded.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Number of [`advance`](Progress::advance) calls so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Time since the engine was created.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Mean recorded tick duration, `None` before the second tick.
    #[must_use]
    pub const fn average_step(&self) -> Option<Duration> {
        self.average_step
    }

    /// Whether a bounded run has reached its total.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.total.is_some_and(|total| self.current >= total)
    }

    /// Completion percentage (unrounded), bounded only.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percent(&self) -> Option<f64> {
        self.total
            .map(|total| self.current as f64 / total as f64 * 100.0)
    }

    /// Iterations per second from the mean tick duration.
    #[must_use]
    pub fn rate(&self) -> Option<f64> {
        let secs = self.average_step?.as_secs_f64();
        (secs > 0.0).then(|| 1.0 / secs)
    }

    /// Time remaining at the mean tick duration; `None` when unbounded,
    /// finished, or before any tick was measured.
    #[must_use]
    pub fn eta(&self) -> Option<Duration> {
        let total = self.total?;
        if self.current >= total {
            return None;
        }
        let remaining = u32::try_from(total - self.current).unwrap_or(u32::MAX);
        self.average_step?.checked_mul(remaining)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use compact_str::CompactString;

    use super::{Progress, ProgressMode, RenderConfig, SegmentToggles, rounded_percent};
    use crate::{
        clock::ManualClock,
        error::ConfigError,
        render::SegmentKind,
        style::{BarStyle, Color, DecorationStyle, Palette},
    };

    fn plain_config(width: usize) -> RenderConfig {
        RenderConfig {
            bar_width: width,
            bar_style: BarStyle::Equal,
            palette: Palette::plain(),
            ..RenderConfig::default()
        }
    }

    fn bounded(total: u64, width: usize) -> (Progress<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let progress = Progress::new(plain_config(width), Some(total), None, clock.clone()).unwrap();
        (progress, clock)
    }

    fn filled(bar: &str) -> usize {
        bar.matches('=').count()
    }

    /// Construction Failures
    /// Invalid arguments are rejected before any state exists.
    #[test]
    fn test_rejects_invalid_config() {
        let zero_total = Progress::new(plain_config(10), Some(0), None, ManualClock::new());
        assert_eq!(zero_total.err(), Some(ConfigError::ZeroTotal));

        let zero_width = Progress::new(plain_config(0), Some(5), None, ManualClock::new());
        assert_eq!(zero_width.err(), Some(ConfigError::ZeroBarWidth));
    }

    /// Bounded Lifecycle
    /// Four ticks over four cells fill one cell each and end completed.
    #[test]
    fn test_bounded_lifecycle() {
        let (mut p, clock) = bounded(4, 4);
        assert_eq!(p.mode(), ProgressMode::Bounded);

        let mut fills = Vec::new();
        let mut percents = Vec::new();
        let mut last = None;
        for _ in 0..4 {
            clock.advance_secs(1.0);
            let line = p.advance_line(None, None);
            fills.push(filled(line.get(SegmentKind::Bar).unwrap()));
            percents.push(line.get(SegmentKind::Percent).unwrap().to_owned());
            last = Some(line);
        }

        assert_eq!(fills, [1, 2, 3, 4]);
        assert_eq!(percents, ["25%", "50%", "75%", "100%"]);
        let last = last.unwrap();
        assert!(last.has(SegmentKind::Completed));
        assert!(last.is_completed());
        assert!(!last.has(SegmentKind::Eta));
        assert_eq!(p.current(), 4);
    }

    /// Unbounded Lifecycle
    /// Only count, spinner, run time and rate are ever shown.
    #[test]
    fn test_unbounded_segments() {
        let clock = ManualClock::new();
        let mut p = Progress::new(plain_config(10), None, None, clock.clone()).unwrap();
        assert_eq!(p.mode(), ProgressMode::Unbounded);

        let mut counts = Vec::new();
        let mut frames = Vec::new();
        for _ in 0..3 {
            clock.advance_secs(0.5);
            let line = p.advance_line(None, None);
            for kind in [SegmentKind::Bar, SegmentKind::Percent, SegmentKind::Eta, SegmentKind::Completed] {
                assert!(!line.has(kind), "{kind:?} in unbounded line");
            }
            counts.push(line.get(SegmentKind::Count).unwrap().to_owned());
            frames.push(line.get(SegmentKind::Decoration).unwrap().to_owned());
        }

        assert_eq!(counts, ["1", "2", "3"]);
        assert_eq!(frames, ["[.  ]", "[.. ]", "[...]"]);
        assert!(!p.is_finished());
    }

    /// Count Padding
    #[test]
    fn test_count_zero_padded_to_total_width() {
        let (mut p, _clock) = bounded(120, 10);
        let line = p.advance_line(None, None);
        assert_eq!(line.get(SegmentKind::Count), Some("001/120"));
    }

    /// Explicit Steps
    /// The argument is a zero-based index and the count never moves back.
    #[test]
    fn test_explicit_step_is_zero_based() {
        let (mut p, _clock) = bounded(10, 10);

        p.advance(Some(4), None);
        assert_eq!(p.current(), 5);

        p.advance(Some(1), None);
        assert_eq!(p.current(), 5, "count must not decrease");

        p.advance(None, None);
        assert_eq!(p.current(), 6);

        p.advance(Some(14), None);
        assert_eq!(p.current(), 15);
        assert!(p.is_finished());
    }

    /// Rate & ETA Gating
    /// The first tick is a baseline; statistics appear from the second tick on.
    #[test]
    fn test_rate_and_eta_after_first_tick() {
        let (mut p, clock) = bounded(10, 10);

        clock.advance_secs(5.0);
        let first = p.advance_line(None, None);
        assert!(!first.has(SegmentKind::Rate));
        assert!(!first.has(SegmentKind::Eta));
        assert!(p.step_durations().is_empty());

        clock.advance_secs(2.0);
        let second = p.advance_line(None, None);
        assert_eq!(second.get(SegmentKind::Rate), Some("Rate: 0.50 it/s"));
        assert_eq!(second.get(SegmentKind::Eta), Some("ETA: 16 seconds"));
        assert_eq!(p.step_durations(), [2.0]);
    }

    /// ETA Formula
    /// With a constant tick duration the ETA shrinks linearly to zero.
    #[test]
    fn test_eta_tracks_remaining_steps() {
        let (mut p, clock) = bounded(5, 5);
        p.advance(None, None);

        let mut etas = Vec::new();
        for _ in 0..3 {
            clock.advance_secs(3.0);
            let line = p.advance_line(None, None);
            etas.push(line.get(SegmentKind::Eta).unwrap().to_owned());
        }
        assert_eq!(etas, ["ETA: 9 seconds", "ETA: 6 seconds", "ETA: 3 seconds"]);

        let snapshot = p.snapshot();
        assert_eq!(snapshot.eta(), Some(Duration::from_secs(3)));
        assert_eq!(snapshot.rate(), Some(1.0 / 3.0));
    }

    /// Run Time Captions
    /// Per-tick run time while running, total run time once complete.
    #[test]
    fn test_run_time_captions() {
        let (mut p, clock) = bounded(2, 4);

        clock.advance_secs(1.5);
        let running = p.advance_line(None, None);
        assert_eq!(running.get(SegmentKind::RunTime), Some("Run time: 1.5 seconds"));

        clock.advance_secs(60.0);
        let done = p.advance_line(None, None);
        assert_eq!(
            done.get(SegmentKind::RunTime),
            Some("Total run time: 1 minute, 1.5 seconds")
        );
    }

    /// Unbounded Run Time
    /// Always measured from creation.
    #[test]
    fn test_unbounded_run_time_is_total() {
        let clock = ManualClock::new();
        let mut p = Progress::new(plain_config(10), None, None, clock.clone()).unwrap();

        clock.advance_secs(2.0);
        p.advance(None, None);
        clock.advance_secs(2.0);
        let line = p.advance_line(None, None);
        assert_eq!(line.get(SegmentKind::RunTime), Some("Run time: 4 seconds"));
    }

    /// Zero Elapsed
    /// A tick that took no time shows no run time and no rate.
    #[test]
    fn test_zero_durations_omit_time_segments() {
        let (mut p, _clock) = bounded(10, 10);
        p.advance(None, None);
        let line = p.advance_line(None, None);
        assert!(!line.has(SegmentKind::RunTime));
        assert!(!line.has(SegmentKind::Rate));
        assert!(!line.has(SegmentKind::Eta));
    }

    /// Completion Is Sticky
    /// Advancing past the total keeps rendering the completed state.
    #[test]
    fn test_completion_idempotent() {
        let (mut p, clock) = bounded(3, 3);
        for _ in 0..3 {
            clock.advance_secs(1.0);
            p.advance(None, None);
        }
        for _ in 0..3 {
            clock.advance_secs(1.0);
            let line = p.advance_line(None, None);
            assert!(line.has(SegmentKind::Completed));
            assert!(!line.has(SegmentKind::Eta));
            assert!(!line.has(SegmentKind::Decoration));
            assert_eq!(filled(line.get(SegmentKind::Bar).unwrap()), 3);
        }
        assert_eq!(p.current(), 6);
    }

    /// Percent Colour
    /// Only a rounded 100% uses the completion colour.
    #[test]
    fn test_percent_complete_colour() {
        let clock = ManualClock::new();
        let config = RenderConfig {
            palette: Palette::ansi(),
            ..RenderConfig::default()
        };
        let mut p = Progress::new(config, Some(1000), None, clock).unwrap();
        let green = Palette::ansi().get(Color::Green);

        let line = p.advance_line(Some(993), None);
        assert_eq!(line.get(SegmentKind::Percent), Some("99%"));

        let line = p.advance_line(Some(995), None);
        assert_eq!(
            line.get(SegmentKind::Percent),
            Some(format!("{green}100%\x1b[0m").as_str())
        );
        assert!(!line.has(SegmentKind::Completed));
    }

    /// Rounded Percent
    #[test]
    fn test_rounded_percent() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 200), 1);
        assert_eq!(rounded_percent(7, 4), 175);
    }

    /// Decoration Cycle
    /// After N ticks the cursor sits at N modulo the frame count.
    #[test]
    fn test_decoration_period() {
        let clock = ManualClock::new();
        let config = RenderConfig {
            decoration: DecorationStyle::Column,
            ..plain_config(10)
        };
        let mut p = Progress::new(config, None, None, clock).unwrap();
        let period = DecorationStyle::Column.frames().len();

        for n in 1..=20 {
            p.advance(None, None);
            assert_eq!(p.decoration_index(), n % period);
        }
    }

    /// Append Mode
    /// The spinner is pointless without redraws, so it is left out.
    #[test]
    fn test_append_mode_hides_decoration() {
        let config = RenderConfig {
            overwrite: false,
            ..plain_config(10)
        };
        let mut p = Progress::new(config, Some(3), None, ManualClock::new()).unwrap();
        let line = p.advance_line(None, None);
        assert!(!line.has(SegmentKind::Decoration));
        assert_eq!(p.decoration_index(), 1, "cursor still advances");
    }

    /// Highlight Travel
    /// The highlighted cell walks through the filled span and wraps to the start.
    #[test]
    fn test_highlight_walks_filled_span() {
        let config = RenderConfig {
            palette: Palette::ansi(),
            ..plain_config(10)
        };
        let mut p = Progress::new(config, Some(100), None, ManualClock::new()).unwrap();
        let cell = |i: usize| {
            format!(
                "[{}\x1b[36;1m=\x1b[0m{}{}]",
                "=".repeat(i),
                "=".repeat(4 - i),
                " ".repeat(5)
            )
        };

        let first = p.advance_line(Some(49), None);
        assert_eq!(first.get(SegmentKind::Bar), Some(cell(1).as_str()));

        let mut seen = Vec::new();
        for _ in 0..4 {
            let line = p.pulse_line(None);
            seen.push(line.get(SegmentKind::Bar).unwrap().to_owned());
        }
        assert_eq!(seen, [cell(2), cell(3), cell(4), cell(0)]);
    }

    /// Rainbow Scroll
    /// Each render shifts the palette one cell to the right.
    #[test]
    fn test_rainbow_scrolls() {
        let config = RenderConfig {
            rainbow: true,
            palette: Palette::ansi(),
            ..plain_config(10)
        };
        let ansi = Palette::ansi();
        let mut p = Progress::new(config, Some(10), None, ManualClock::new()).unwrap();

        let first = p.advance_line(Some(9), None);
        let second = p.pulse_line(None);

        let expected_first = format!(
            "[{}={}=",
            ansi.get(Color::Magenta),
            ansi.get(Color::Red)
        );
        let expected_second = format!(
            "[{}={}=",
            ansi.get(Color::Blue),
            ansi.get(Color::Magenta)
        );
        assert!(first.get(SegmentKind::Bar).unwrap().starts_with(&expected_first));
        assert!(second.get(SegmentKind::Bar).unwrap().starts_with(&expected_second));
    }

    /// Single-Cell Rainbow
    /// The palette offset cycles through every colour even when one cell is filled.
    #[test]
    fn test_rainbow_scrolls_single_cell() {
        let config = RenderConfig {
            rainbow: true,
            palette: Palette::ansi(),
            ..plain_config(10)
        };
        let ansi = Palette::ansi();
        let mut p = Progress::new(config, Some(10), None, ManualClock::new()).unwrap();

        let mut bars = vec![p.advance_line(Some(0), None)];
        bars.extend((0..5).map(|_| p.pulse_line(None)));
        let rendered: Vec<&str> = bars
            .iter()
            .map(|line| line.get(SegmentKind::Bar).unwrap())
            .collect();

        let expected: Vec<String> = [
            Color::Magenta,
            Color::Blue,
            Color::Cyan,
            Color::Green,
            Color::Yellow,
            Color::Red,
        ]
        .into_iter()
        .map(|color| format!("[{}={}{}]", ansi.get(color), ansi.get(Color::Reset), " ".repeat(9)))
        .collect();
        assert_eq!(rendered, expected);
    }

    /// Pulse
    /// Pulsing animates without counting a step or recording a duration.
    #[test]
    fn test_pulse_keeps_counters() {
        let clock = ManualClock::new();
        let mut p = Progress::new(plain_config(10), Some(10), None, clock.clone()).unwrap();

        let before_any = p.pulse_line(None);
        assert!(!before_any.has(SegmentKind::RunTime));
        assert_eq!(before_any.get(SegmentKind::Count), Some("00/10"));

        clock.advance_secs(2.0);
        p.advance(None, None);
        clock.advance_secs(1.0);
        let pulsed = p.pulse_line(None);

        assert_eq!(p.current(), 1);
        assert!(p.step_durations().is_empty());
        assert_eq!(p.decoration_index(), 3);
        assert_eq!(pulsed.get(SegmentKind::RunTime), Some("Run time: 2 seconds"));
    }

    /// Labels
    #[test]
    fn test_label_and_sublabel() {
        let clock = ManualClock::new();
        let mut labelled =
            Progress::new(plain_config(10), Some(5), Some(CompactString::from("copy")), clock.clone())
                .unwrap();
        let mut bare = Progress::new(plain_config(10), Some(5), None, clock).unwrap();

        assert_eq!(labelled.advance_line(None, None).get(SegmentKind::Label), Some("copy"));
        assert_eq!(
            labelled.advance_line(None, Some("a.txt")).get(SegmentKind::Label),
            Some("copy: a.txt")
        );
        assert_eq!(bare.advance_line(None, Some("a.txt")).get(SegmentKind::Label), Some("a.txt"));
        assert!(!bare.advance_line(None, None).has(SegmentKind::Label));
    }

    /// Empty Labels
    /// Empty texts count as absent and never leave a dangling separator.
    #[test]
    fn test_empty_label_and_sublabel() {
        let config = RenderConfig {
            segments: SegmentToggles {
                decoration: false,
                ..SegmentToggles::default()
            },
            ..plain_config(10)
        };
        let mut empty =
            Progress::new(config.clone(), None, Some(CompactString::new("")), ManualClock::new())
                .unwrap();
        let mut bare = Progress::new(config, None, None, ManualClock::new()).unwrap();

        assert_eq!(empty.advance(None, None), "1");
        assert_eq!(empty.advance(None, Some("x")), "x - 2");
        assert_eq!(empty.advance(None, Some("")), "3");
        assert_eq!(bare.advance(None, Some("")), "1");
    }

    /// Full Line
    /// The composed string joins segments with the separator in display order.
    #[test]
    fn test_composed_line() {
        let clock = ManualClock::new();
        let config = RenderConfig {
            prefix: "> ".into(),
            ..plain_config(4)
        };
        let mut p = Progress::new(config, Some(4), Some("job".into()), clock.clone()).unwrap();

        clock.advance_secs(1.0);
        let text = p.advance(None, None);
        assert_eq!(text, "> [.  ] - job - 1/4 - [=   ] - 25% - Run time: 1 second");
    }
}

//! # `progress_line`
//!
//! A single-line, redraw-in-place progress indicator for long-running loops.
//!
//! `progress_line` tracks a step counter and the duration of every step, and turns
//! them into a composable line: spinner, label, count, bar, percentage, run time,
//! rate, ETA and a completion marker. It is designed to be:
//!
//! * **Deterministic**: rendering depends only on the call sequence and an injected
//!   [`Clock`], so every line can be asserted in tests.
//! * **Headless**: the engine returns strings; [`LineWriter`] is an optional,
//!   separate step that puts them on a terminal.
//! * **Two-mode**: bounded bars (known total) and unbounded indicators share one
//!   engine, chosen once at construction.
//!
//! ## Modules
//!
//! * [`builder`]: Fluent interface for configuring a [`Progress`].
//! * [`clock`]: Time sources, including a manual clock for tests.
//! * [`duration`]: Human-readable duration formatting.
//! * [`error`]: Configuration errors.
//! * [`io`]: Writing lines to a terminal in overwrite or append layout.
//! * [`iter`]: Extension traits for drawing progress while iterating.
//! * [`progress`]: The render-state engine.
//! * [`render`]: Typed segments and the composed line.
//! * [`style`]: Bar glyphs, spinner frames and colour escapes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod clock;
pub mod duration;
pub mod error;
pub mod io;
pub mod iter;
pub mod progress;
pub mod render;
pub mod style;

pub use builder::ProgressBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::{DurationFormat, format_duration};
pub use error::{ConfigError, ConfigResult};
pub use io::LineWriter;
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use progress::{Progress, ProgressMode, ProgressSnapshot, RenderConfig, SegmentToggles};
pub use render::{RenderedLine, Segment, SegmentKind};
pub use style::{BarStyle, Color, DecorationStyle, Palette};

//! Iterator adapters that draw a progress line while a loop runs.
//!
//! [`ProgressIteratorExt`] adds `.progress()` to any [`Iterator`]. Every yielded
//! item counts as one tick: the engine advances and the line is written.
//!
//! # Heuristics
//!
//! The adapters check [`Iterator::size_hint`]:
//! * An exact, non-zero size gives a **bounded** bar with that total.
//! * Anything else gives an **unbounded** indicator.
//!
//! ```no_run
//! use progress_line::ProgressIteratorExt;
//!
//! for file in ["a.txt", "b.txt", "c.txt"].into_iter().progress_with_label("copy") {
//!     // ...
//! #   let _ = file;
//! }
//! ```

use std::io::{Stdout, Write};

use compact_str::CompactString;
use tracing::warn;

use crate::{
    builder::ProgressBuilder,
    clock::{Clock, SystemClock},
    error::ConfigResult,
    io::LineWriter,
    progress::{Progress, RenderConfig},
    style::Palette,
};

/// An iterator adapter that advances a [`Progress`] for every item it yields.
///
/// A write failure is logged once and drawing stops; the items keep flowing.
pub struct ProgressIter<I, C = SystemClock, W = Stdout> {
    iter: I,
    progress: Progress<C>,
    writer: Option<LineWriter<W>>,
}

impl<I, C, W> ProgressIter<I, C, W> {
    /// Creates a new `ProgressIter`.
    ///
    /// Usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, progress: Progress<C>, writer: LineWriter<W>) -> Self {
        Self {
            iter,
            progress,
            writer: Some(writer),
        }
    }

    /// The engine driving this adapter.
    pub const fn engine(&self) -> &Progress<C> {
        &self.progress
    }

    /// Whether lines are still being written.
    pub const fn is_drawing(&self) -> bool {
        self.writer.is_some()
    }
}

impl<I: Iterator, C: Clock, W: Write> Iterator for ProgressIter<I, C, W> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;

        let line = self.progress.advance_line(None, None);
        if let Some(writer) = self.writer.as_mut()
            && let Err(error) = writer.write_line(&line)
        {
            warn!(%error, "failed to write progress line, drawing disabled");
            self.writer = None;
        }

        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to attach a progress line to any iterator.
pub trait ProgressIteratorExt: Iterator + Sized {
    /// Wraps the iterator in a progress line written to stdout.
    ///
    /// Bounded when `size_hint` is exact and non-zero, unbounded otherwise.
    fn progress(self) -> ProgressIter<Self> {
        let total = self.exact_total();
        let progress = Progress::from_valid_parts(stdout_config(), total, None, SystemClock);
        ProgressIter::new(self, progress, LineWriter::stdout(true))
    }

    /// Same as [`progress`](Self::progress) with a label.
    fn progress_with_label(self, label: impl Into<CompactString>) -> ProgressIter<Self> {
        let total = self.exact_total();
        let progress =
            Progress::from_valid_parts(stdout_config(), total, Some(label.into()), SystemClock);
        ProgressIter::new(self, progress, LineWriter::stdout(true))
    }

    /// Wraps the iterator using a builder; the inferred total replaces the builder's.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`](crate::ConfigError) the builder reports.
    fn progress_with_builder(self, builder: ProgressBuilder) -> ConfigResult<ProgressIter<Self>> {
        let progress = builder.with_total(self.exact_total()).build()?;
        let writer = LineWriter::stdout(progress.config().overwrite);
        Ok(ProgressIter::new(self, progress, writer))
    }

    /// Wraps the iterator using an existing engine and writer.
    fn progress_with<C, W>(
        self,
        progress: Progress<C>,
        writer: LineWriter<W>,
    ) -> ProgressIter<Self, C, W> {
        ProgressIter::new(self, progress, writer)
    }

    /// Internal helper: the total implied by `size_hint`, if exact and non-zero.
    fn exact_total(&self) -> Option<u64> {
        match self.size_hint() {
            (lower, Some(upper)) if lower == upper && upper > 0 => u64::try_from(upper).ok(),
            _ => None,
        }
    }
}

impl<I: Iterator> ProgressIteratorExt for I {}

fn stdout_config() -> RenderConfig {
    RenderConfig {
        palette: Palette::detect(),
        ..RenderConfig::default()
    }
}

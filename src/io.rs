//! Terminal output for composed progress lines.
//!
//! The engine only builds strings; [`LineWriter`] puts them on a stream. It wraps
//! any [`std::io::Write`] and knows two layouts:
//!
//! * **Overwrite**: each line starts with a carriage return and replaces the
//!   previous one in place.
//! * **Append**: each line is written on its own row.
//!
//! When a completed line arrives the writer closes the progress display with
//! trailing blank lines, exactly once. A closed writer ignores further lines.

use std::io::{self, Stdout, Write};

use crate::render::RenderedLine;

/// Erases from the cursor to the end of the line, so a shorter redraw leaves no tail.
const ERASE_LINE_TAIL: &str = "\x1b[K";

/// Writes progress lines to an underlying stream.
pub struct LineWriter<W> {
    inner: W,
    overwrite: bool,
    erase_tail: bool,
    closed: bool,
}

impl<W> LineWriter<W> {
    /// Wraps `inner`; `overwrite` selects in-place redraws.
    pub const fn new(inner: W, overwrite: bool) -> Self {
        Self {
            inner,
            overwrite,
            erase_tail: false,
            closed: false,
        }
    }

    /// Emits an erase-to-end-of-line escape after each overwritten line.
    ///
    /// Only meaningful on ANSI terminals; off by default.
    #[must_use]
    pub const fn with_erase_tail(mut self, erase_tail: bool) -> Self {
        self.erase_tail = erase_tail;
        self
    }

    /// Whether the completion flush has been written.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Borrows the underlying stream.
    pub const fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl LineWriter<Stdout> {
    /// A writer on standard output that erases line tails when stdout is a terminal.
    #[must_use]
    pub fn stdout(overwrite: bool) -> Self {
        let tty = is_terminal::is_terminal(io::stdout());
        Self::new(io::stdout(), overwrite).with_erase_tail(overwrite && tty)
    }
}

impl<W: Write> LineWriter<W> {
    /// Writes `line` using the configured layout and flushes.
    ///
    /// A completed line is followed by the closing blank lines the first time
    /// one is written.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying stream.
    pub fn write_line(&mut self, line: &RenderedLine) -> io::Result<()> {
        self.write_str(&line.to_string(), line.is_completed())
    }

    /// Writes raw `text` as one progress line; `completed` triggers the closing flush.
    ///
    /// Does nothing once the writer is closed.
    ///
    /// # Errors
    ///
    /// Propagates failures from the underlying stream.
    pub fn write_str(&mut self, text: &str, completed: bool) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }

        if self.overwrite {
            write!(self.inner, "\r{text}")?;
            if self.erase_tail {
                self.inner.write_all(ERASE_LINE_TAIL.as_bytes())?;
            }
        } else {
            writeln!(self.inner, "{text}")?;
        }

        if completed {
            self.closed = true;
            let tail: &[u8] = if self.overwrite { b"\n\n" } else { b"\n" };
            self.inner.write_all(tail)?;
        }

        self.inner.flush()
    }
}

//! Display segments and the composed progress line.
//!
//! The engine produces a [`RenderedLine`]: an ordered list of typed [`Segment`]s
//! plus the separator and the caller's prefix/suffix. Its [`Display`](fmt::Display)
//! form is the exact text written to the terminal.

use std::fmt;

/// Separator placed between segments.
pub const SEPARATOR: &str = " - ";

/// Which part of the line a segment is.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentKind {
    /// Spinner frame.
    Decoration,
    /// `label`, `label: sublabel`, or `sublabel`.
    Label,
    /// `current/total` or bare `current`.
    Count,
    /// Bracketed bar glyphs.
    Bar,
    /// Rounded completion percentage.
    Percent,
    /// Per-tick run time, or total run time once complete.
    RunTime,
    /// Iterations per second.
    Rate,
    /// Estimated time remaining.
    Eta,
    /// Completion marker.
    Completed,
}

/// One rendered piece of the line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    /// What the segment shows.
    pub kind: SegmentKind,
    /// Rendered text, escapes included.
    pub text: String,
}

impl Segment {
    pub(crate) fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// A fully composed progress line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RenderedLine {
    segments: Vec<Segment>,
    prefix: String,
    suffix: String,
    completed: bool,
}

impl RenderedLine {
    pub(crate) fn new(segments: Vec<Segment>, prefix: &str, suffix: &str, completed: bool) -> Self {
        Self {
            segments,
            prefix: prefix.to_owned(),
            suffix: suffix.to_owned(),
            completed,
        }
    }

    /// The segments in display order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Text of the segment of the given kind, if present.
    #[must_use]
    pub fn get(&self, kind: SegmentKind) -> Option<&str> {
        self.segments
            .iter()
            .find(|segment| segment.kind == kind)
            .map(|segment| segment.text.as_str())
    }

    /// Whether a segment of the given kind is present.
    #[must_use]
    pub fn has(&self, kind: SegmentKind) -> bool {
        self.get(kind).is_some()
    }

    /// Whether this line was rendered by a bounded engine that reached its total.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)?;
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(SEPARATOR)?;
            }
            f.write_str(&segment.text)?;
        }
        f.write_str(&self.suffix)
    }
}

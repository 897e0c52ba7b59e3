//! Human-readable duration formatting.
//!
//! A value in seconds is decomposed top-down through a fixed cascade of units
//! (seconds, minutes, hours, days, years). Each unit holds strictly less than
//! its capacity except the last one, which absorbs everything that is left.
//!
//! ```
//! use progress_line::duration::format_duration;
//!
//! assert_eq!(format_duration(0.0), "");
//! assert_eq!(format_duration(59.0), "59 seconds");
//! assert_eq!(format_duration(61.0), "1 minute, 1 second");
//! ```

/// Seconds are kept with two decimal places; the cascade works in hundredths.
const SUBSECOND_SCALE: u64 = 100;
/// Position of the seconds entry in [`UNITS`].
const SECONDS: usize = 0;

/// One step of the unit cascade.
#[derive(Clone, Copy, Debug)]
struct Unit {
    singular: &'static str,
    plural: &'static str,
    /// How many of this unit make one of the next larger unit.
    capacity: u64,
    /// Display width used when padding is requested.
    width: usize,
}

const UNITS: [Unit; 5] = [
    Unit {
        singular: "second",
        plural: "seconds",
        capacity: 60,
        width: 5,
    },
    Unit {
        singular: "minute",
        plural: "minutes",
        capacity: 60,
        width: 2,
    },
    Unit {
        singular: "hour",
        plural: "hours",
        capacity: 24,
        width: 2,
    },
    Unit {
        singular: "day",
        plural: "days",
        capacity: 365,
        width: 1,
    },
    Unit {
        singular: "year",
        plural: "years",
        capacity: u64::MAX,
        width: 5,
    },
];

/// Formats `seconds` as a compact list of its non-zero units, largest first.
///
/// Returns an empty string when nothing rounds to a visible amount, which
/// includes zero, negative and non-finite inputs.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    DurationFormat::default().format(seconds)
}

/// Formatting options for [`format_duration`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationFormat {
    /// Right-align every count within its unit's display width so that a line
    /// redrawn in place keeps a stable layout.
    pub padded: bool,
}

impl DurationFormat {
    /// Compact output, no padding.
    #[must_use]
    pub const fn compact() -> Self {
        Self { padded: false }
    }

    /// Counts right-aligned to each unit's fixed width.
    #[must_use]
    pub const fn padded() -> Self {
        Self { padded: true }
    }

    /// Formats `seconds` according to these options.
    #[must_use]
    pub fn format(self, seconds: f64) -> String {
        let counts = decompose(seconds);
        let mut out = String::new();

        for (index, (unit, &count)) in UNITS.iter().zip(counts.iter()).enumerate().rev() {
            if count == 0 {
                continue;
            }
            if !out.is_empty() {
                out.push_str(", ");
            }

            let (number, one) = if index == SECONDS {
                (seconds_text(count), count == SUBSECOND_SCALE)
            } else {
                (count.to_string(), count == 1)
            };

            if self.padded {
                out.push_str(&format!("{number:>width$}", width = unit.width));
            } else {
                out.push_str(&number);
            }
            out.push(' ');
            out.push_str(if one { unit.singular } else { unit.plural });
        }

        out
    }
}

/// Splits `seconds` into per-unit counts, smallest unit first.
///
/// The seconds entry is expressed in hundredths of a second.
fn decompose(seconds: f64) -> [u64; UNITS.len()] {
    let mut counts = [0u64; UNITS.len()];
    if !seconds.is_finite() || seconds <= 0.0 {
        return counts;
    }

    // `as` saturates, so absurdly large values simply pile up in the top unit.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hundredths = (seconds * SUBSECOND_SCALE as f64).round() as u64;

    let mut rest = hundredths;
    let last = UNITS.len() - 1;
    for (index, unit) in UNITS.iter().enumerate() {
        let capacity = if index == 0 {
            unit.capacity * SUBSECOND_SCALE
        } else {
            unit.capacity
        };

        if index == last || rest < capacity {
            counts[index] = rest;
            break;
        }
        counts[index] = rest % capacity;
        rest /= capacity;
    }

    counts
}

/// Renders hundredths of a second with trailing zeros trimmed (`150` -> `1.5`).
fn seconds_text(hundredths: u64) -> String {
    let whole = hundredths / SUBSECOND_SCALE;
    let frac = hundredths % SUBSECOND_SCALE;
    if frac == 0 {
        whole.to_string()
    } else if frac % 10 == 0 {
        format!("{whole}.{}", frac / 10)
    } else {
        format!("{whole}.{frac:02}")
    }
}

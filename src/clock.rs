//! Time sources for the progress engine.
//!
//! The engine never reads the wall clock directly; it asks a [`Clock`]. Production
//! code uses [`SystemClock`], tests drive a [`ManualClock`] so every elapsed value
//! is known in advance.

use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;
use web_time::Instant;

/// A monotonic time source.
///
/// Implementations must never go backwards within one engine's lifetime.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;
}

/// Reads [`Instant::now`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Cloning is cheap and every clone observes the same time, so a test can keep
/// one handle and pass another to the engine.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    /// Moves the clock forward by `secs` seconds.
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

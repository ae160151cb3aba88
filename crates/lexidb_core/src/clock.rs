//! Time sources for entry timestamps and backup names.

use crate::types::Timestamp;
use parking_lot::Mutex;

/// A source of "now".
///
/// The store reads the clock once per logical operation, so every row
/// touched by one batch shares the same `updated_at`.
pub trait Clock: Send + Sync {
    /// Returns the current timestamp.
    fn now(&self) -> Timestamp;
}

/// The local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_naive(chrono::Local::now().naive_local())
    }
}

/// A clock that only moves when told to.
///
/// Used by tests that need distinct timestamps (and distinct backup names)
/// without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    #[must_use]
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock to `value`.
    pub fn set(&self, value: Timestamp) {
        *self.now.lock() = value;
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock();
        *now = now.plus_seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

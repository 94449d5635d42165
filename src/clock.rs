//! Time sources
//!
//! Deadlines and profiling both read time through the [`Clock`] trait instead of calling
//! `Instant::now()` directly, so tests can drive time by hand with a [`FakeClock`].

use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A source of monotonic and wall-clock time
pub trait Clock: Send + Sync {
    /// Monotonic time, used for deadlines and elapsed-time measurement
    fn instant(&self) -> Instant;

    /// Wall-clock time, used for report timestamps
    fn now_utc(&self) -> DateTime<Utc>;
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn instant(&self) -> Instant {
        Instant::now()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
///
/// Both readings start at the moment of construction and advance together.
#[derive(Debug)]
pub struct FakeClock {
    base_instant: Instant,
    base_utc: DateTime<Utc>,
    offset: Mutex<Duration>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            base_instant: Instant::now(),
            base_utc: Utc::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// A clock whose wall-clock reading starts at `utc`
    pub fn starting_at(utc: DateTime<Utc>) -> Self {
        Self {
            base_utc: utc,
            ..Self::new()
        }
    }

    /// Moves the clock forward by `by`
    pub fn advance(&self, by: Duration) {
        let mut offset = self.offset.lock().unwrap_or_else(|e| e.into_inner());
        *offset += by;
    }

    fn offset(&self) -> Duration {
        *self.offset.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn instant(&self) -> Instant {
        self.base_instant + self.offset()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.base_utc + chrono::Duration::from_std(self.offset()).unwrap_or_default()
    }
}

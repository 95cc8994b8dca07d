//! Time sources
//!
//! Commands that wait on wall time (serial retries, settle delays) read a
//! [`Clock`] rather than the OS clock directly, so tests can drive time by
//! hand instead of sleeping through retry periods.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use instant::Instant;

/// Monotonic millisecond time source
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Real time, milliseconds since the clock was created
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        MonotonicClock {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        MonotonicClock::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Test clock advanced explicitly through its [`ClockHandle`]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

/// Shared handle that advances a [`ManualClock`]
#[derive(Clone)]
pub struct ClockHandle {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> (ManualClock, ClockHandle) {
        let now = Arc::new(AtomicU64::new(0));
        (
            ManualClock {
                now: Arc::clone(&now),
            },
            ClockHandle { now },
        )
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::Acquire)
    }
}

impl ClockHandle {
    pub fn advance_ms(&self, delta: u64) {
        self.now.fetch_add(delta, Ordering::Release);
    }
}

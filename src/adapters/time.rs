//! Monotonic clock adapter.
//!
//! Milliseconds since construction, backed by `std::time::Instant`. On the
//! device target this would wrap the platform's high-resolution timer; the
//! [`Clock`] port keeps the domain identical either way.

use std::time::Instant;

use crate::app::ports::Clock;

/// Monotonic system clock, anchored at construction time.
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

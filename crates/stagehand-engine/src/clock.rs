//! Injectable time source
//!
//! Debouncing, the re-entrancy cool-down, and the fade ramp all depend
//! on wall-clock time. Routing every time read and sleep through a
//! trait keeps those behaviors deterministic under test.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Source of time for the engine
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Block the calling thread for the given duration
    fn sleep(&self, duration: Duration);
}

/// Real wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Manually advanced clock
///
/// `now` starts at construction time and only moves when `advance` is
/// called; `sleep` advances instead of blocking. Used by tests and by
/// hosts that drive time themselves.
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move the clock forward
    pub fn advance(&self, duration: Duration) {
        if let Ok(mut offset) = self.offset.lock() {
            *offset += duration;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let offset = self.offset.lock().map(|o| *o).unwrap_or(Duration::ZERO);
        self.base + offset
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now() - start, Duration::from_millis(250));

        clock.sleep(Duration::from_millis(50));
        assert_eq!(clock.now() - start, Duration::from_millis(300));
    }
}

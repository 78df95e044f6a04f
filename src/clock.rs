//! Time for the game loop: a real clock, and one tests can wind by hand.

use std::time::{Duration, Instant};

/// Monotonic time plus the ability to wait.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, d: Duration);

    /// Sleep out whatever is left of a tick that began at `start`.
    fn finish_tick(&mut self, start: Instant, tick: Duration) {
        let elapsed = self.now().saturating_duration_since(start);
        if elapsed < tick {
            self.sleep(tick - elapsed);
        }
    }
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Time only moves when slept through. Records every sleep.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug)]
pub struct ManualClock {
    now: Instant,
    pub sleeps: Vec<Duration>,
}

#[cfg(any(test, feature = "test-util"))]
impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Instant::now(),
            sleeps: Vec::new(),
        }
    }
}

#[cfg(any(test, feature = "test-util"))]
impl ManualClock {
    pub fn advance(&mut self, d: Duration) {
        self.now += d;
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }

    fn sleep(&mut self, d: Duration) {
        self.sleeps.push(d);
        self.now += d;
    }
}

//! Monotonic time sources shared by the animation layer.
//!
//! Every clock and time-driven animator in a scene samples the same
//! [`TimeSource`], so pausing one animation never perturbs another's
//! sampling.

use std::cell::Cell;
use std::time::Instant;

/// A monotonic clock returning seconds since an arbitrary epoch.
pub trait TimeSource {
    fn now(&self) -> f64;
}

/// Wall-clock time source backed by [`Instant`].
///
/// The epoch is the moment of construction, so scenes start at t = 0.
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-driven time source for tests and headless demos.
///
/// Time only moves when told to, which makes every time-dependent
/// behaviour in the crate deterministic.
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { now: Cell::new(0.0) }
    }

    /// Jumps to an absolute time in seconds.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    /// Moves time forward by the given number of seconds.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_and_sets() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), 0.0);
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.now(), 0.75);
        clock.set(10.0);
        assert_eq!(clock.now(), 10.0);
    }

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}

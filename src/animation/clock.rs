//! Animation clocks: normalized progress over a configured duration.

use std::rc::Rc;

use crate::error::MarionetteError;
use crate::time::TimeSource;

/// What happens when a clock's elapsed time passes its duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Clamp at the end and report [`ClockState::Finished`].
    Once,
    /// Wrap modulo the duration and keep running.
    Loop,
}

/// Lifecycle state of an [`AnimationClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Active,
    Paused,
    Finished,
}

/// Accumulates elapsed time against a fixed duration and exposes it as a
/// normalized progress value in `[0, 1]`.
///
/// The clock samples its [`TimeSource`] only while active, and resuming
/// from a pause re-anchors the last sample timestamp, so time spent paused
/// never leaks into the accumulated total.
pub struct AnimationClock {
    duration: f64,
    loop_mode: LoopMode,
    elapsed: f64,
    state: ClockState,
    previous_sample: f64,
    time: Rc<dyn TimeSource>,
}

impl AnimationClock {
    /// Creates an active clock with zero accumulated time.
    ///
    /// The duration is in seconds and must be positive and finite.
    pub fn new(
        duration: f64,
        loop_mode: LoopMode,
        time: Rc<dyn TimeSource>,
    ) -> Result<Self, MarionetteError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(MarionetteError::NonPositiveDuration(duration));
        }
        let previous_sample = time.now();
        Ok(Self {
            duration,
            loop_mode,
            elapsed: 0.0,
            state: ClockState::Active,
            previous_sample,
            time,
        })
    }

    /// Samples the time source and folds the delta into the accumulated
    /// total. Does nothing unless the clock is active.
    ///
    /// Reaching the duration exactly does not wrap or finish; the clock
    /// only rolls over (or clamps, for [`LoopMode::Once`]) once elapsed
    /// time strictly exceeds the duration.
    pub fn update(&mut self) {
        if self.state != ClockState::Active {
            return;
        }
        let now = self.time.now();
        self.elapsed += now - self.previous_sample;
        self.previous_sample = now;
        if self.elapsed > self.duration {
            match self.loop_mode {
                LoopMode::Loop => self.elapsed %= self.duration,
                LoopMode::Once => {
                    self.elapsed = self.duration;
                    self.state = ClockState::Finished;
                }
            }
        }
    }

    /// Normalized progress in `[0, 1]`. Safe to call in any state.
    pub fn progress(&self) -> f64 {
        (self.elapsed / self.duration).min(1.0)
    }

    /// Freezes the accumulated total. No effect unless active.
    pub fn pause(&mut self) {
        if self.state == ClockState::Active {
            self.state = ClockState::Paused;
        }
    }

    /// Continues from where the clock was paused.
    ///
    /// Re-anchors the sample timestamp to now, so the next `update` only
    /// accounts for time spent running.
    pub fn resume(&mut self) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Active;
            self.previous_sample = self.time.now();
        }
    }

    /// Back to zero elapsed time and the active state.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.state = ClockState::Active;
        self.previous_sample = self.time.now();
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

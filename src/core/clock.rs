//! Elapsed-time sources for the tick loop
//!
//! A clock behaves like a stopwatch that is restarted every time it is read:
//! `elapsed_time` returns the seconds since the previous read (or since
//! construction) and re-anchors. The environment reads it once per tick.

use std::fmt;
use std::time::Instant;

pub trait Clock: fmt::Debug {
    /// Seconds since the last call (or construction). Consumes the interval.
    fn elapsed_time(&mut self) -> f64;

    /// Re-anchor the reference point to now.
    fn reset_elapsed_time(&mut self);

    /// A newly anchored clock of the same kind.
    fn fresh(&self) -> Box<dyn Clock>;
}

/// Wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    reference: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { reference: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_time(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.reference).as_secs_f64();
        self.reference = now;
        elapsed
    }

    fn reset_elapsed_time(&mut self) {
        self.reference = Instant::now();
    }

    fn fresh(&self) -> Box<dyn Clock> {
        Box::new(SystemClock::new())
    }
}

/// Deterministic clock that reports the same step on every read
///
/// Used by headless runs and tests. A reset discards nothing since no time
/// accumulates between reads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStepClock {
    step: f64,
}

impl FixedStepClock {
    pub fn new(step: f64) -> Self {
        Self { step: step.max(0.0) }
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Clock for FixedStepClock {
    fn elapsed_time(&mut self) -> f64 {
        self.step
    }

    fn reset_elapsed_time(&mut self) {}

    fn fresh(&self) -> Box<dyn Clock> {
        Box::new(*self)
    }
}

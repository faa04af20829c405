//! Stock actions
//!
//! Grouped by what they touch: motion changes vectors, appearance changes
//! colors and tags, lifecycle adds and removes objects through the tick's
//! [`Interaction`](crate::behavior::Interaction).

pub mod appearance;
pub mod lifecycle;
pub mod motion;

pub use appearance::{BlendAction, TagAction};
pub use lifecycle::{BreedAction, DestroyAction, EatAction, ExplodeAction, ShootAction, SpawnAction};
pub use motion::{
    AccelerateAction, ApproachAction, FaceAction, FleeAction, PullAction, PushAction, TurnAction,
};

use crate::core::error::BehaviorError;
use crate::spatial::Vector;

/// Fires at most once per `interval` seconds of qualifying ticks
///
/// A fresh or reset cooldown is ready immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct Cooldown {
    interval: f64,
    remaining: f64,
}

impl Cooldown {
    pub fn new(interval: f64) -> Self {
        Self { interval: interval.max(0.0), remaining: 0.0 }
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.remaining = 0.0;
    }

    /// Consume `elapsed` seconds; true when the action should fire
    pub fn ready(&mut self, elapsed: f64) -> bool {
        self.remaining -= elapsed;
        if self.remaining <= 0.0 {
            self.remaining = self.interval;
            true
        } else {
            false
        }
    }
}

fn finite(vector: Vector, quantity: &'static str) -> Result<Vector, BehaviorError> {
    if vector.is_finite() {
        Ok(vector)
    } else {
        Err(BehaviorError::NonFinite { quantity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_ready_first_then_waits() {
        let mut cooldown = Cooldown::new(1.0);
        assert!(cooldown.ready(0.25));
        assert!(!cooldown.ready(0.25));
        assert!(!cooldown.ready(0.25));
        assert!(!cooldown.ready(0.25));
        assert!(cooldown.ready(0.25));
    }

    #[test]
    fn test_cooldown_reset() {
        let mut cooldown = Cooldown::new(10.0);
        assert!(cooldown.ready(0.1));
        assert!(!cooldown.ready(0.1));
        cooldown.reset();
        assert!(cooldown.ready(0.1));
    }

    #[test]
    fn test_zero_interval_always_ready() {
        let mut cooldown = Cooldown::new(-3.0);
        assert_eq!(cooldown.interval(), 0.0);
        assert!(cooldown.ready(0.1));
        assert!(cooldown.ready(0.1));
    }
}

//! Environmental factors: global effects applied once per tick
//!
//! A factor sees the whole environment and selects nothing. Errors remove
//! the factor, not the objects it was acting on.

use crate::core::error::FactorError;
use crate::core::types::{Location, ObjectId};
use crate::environment::Environment;
use crate::spatial::{reflection_angle, Vector};
use ordered_float::OrderedFloat;
use std::fmt;

pub trait EnvironmentalFactor: fmt::Debug {
    /// Identifies the factor in fault reports and logs
    fn name(&self) -> &str;

    fn act(&mut self, environment: &mut Environment) -> Result<(), FactorError>;

    fn box_clone(&self) -> Box<dyn EnvironmentalFactor>;
}

impl Clone for Box<dyn EnvironmentalFactor> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Constant thrust toward 90° (down, in screen coordinates)
#[derive(Debug, Clone, PartialEq)]
pub struct Gravity {
    pub force: f64,
}

impl Gravity {
    pub fn new(force: f64) -> Self {
        Self { force }
    }
}

impl EnvironmentalFactor for Gravity {
    fn name(&self) -> &str {
        "gravity"
    }

    fn act(&mut self, environment: &mut Environment) -> Result<(), FactorError> {
        let pull = Vector::new(self.force * environment.elapsed(), 90.0);
        for entity in environment.objects_mut() {
            let object = entity.object_mut();
            let vector = object.vector + pull;
            if !vector.is_finite() {
                return Err(FactorError::NonFinite { quantity: "vector under gravity" });
            }
            object.vector = vector;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EnvironmentalFactor> {
        Box::new(self.clone())
    }
}

/// Bleeds `force` units of speed per second, never below zero
#[derive(Debug, Clone, PartialEq)]
pub struct Friction {
    pub force: f64,
}

impl Friction {
    pub fn new(force: f64) -> Self {
        Self { force }
    }
}

impl EnvironmentalFactor for Friction {
    fn name(&self) -> &str {
        "friction"
    }

    fn act(&mut self, environment: &mut Environment) -> Result<(), FactorError> {
        let loss = self.force * environment.elapsed();
        if !loss.is_finite() {
            return Err(FactorError::NonFinite { quantity: "friction loss" });
        }
        for entity in environment.objects_mut() {
            let vector = &mut entity.object_mut().vector;
            vector.set_speed((vector.speed() - loss).max(0.0));
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EnvironmentalFactor> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedLimit {
    pub max: f64,
}

impl SpeedLimit {
    pub fn new(max: f64) -> Self {
        Self { max }
    }
}

impl EnvironmentalFactor for SpeedLimit {
    fn name(&self) -> &str {
        "speed limit"
    }

    fn act(&mut self, environment: &mut Environment) -> Result<(), FactorError> {
        if !(self.max >= 0.0) {
            return Err(FactorError::Misconfigured(format!("maximum speed {} is invalid", self.max)));
        }
        for entity in environment.objects_mut() {
            let vector = &mut entity.object_mut().vector;
            if vector.speed() > self.max {
                vector.set_speed(self.max);
            }
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EnvironmentalFactor> {
        Box::new(self.clone())
    }
}

/// Culls the oldest objects while the population exceeds `count`
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationLimit {
    pub count: usize,
}

impl PopulationLimit {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl EnvironmentalFactor for PopulationLimit {
    fn name(&self) -> &str {
        "population limit"
    }

    fn act(&mut self, environment: &mut Environment) -> Result<(), FactorError> {
        let excess = environment.objects().len().saturating_sub(self.count);
        if excess == 0 {
            return Ok(());
        }
        let mut by_age: Vec<(OrderedFloat<f64>, ObjectId)> = environment
            .objects()
            .iter()
            .map(|entity| (OrderedFloat(entity.object().age()), entity.id()))
            .collect();
        by_age.sort_by(|a, b| b.0.cmp(&a.0));
        for (_, id) in by_age.into_iter().take(excess) {
            environment.remove_object(id);
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EnvironmentalFactor> {
        Box::new(self.clone())
    }
}

/// Axis-aligned rectangle, `min` inclusive to `max` inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Location,
    pub max: Location,
}

impl Bounds {
    pub fn new(min: Location, max: Location) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, location: Location) -> bool {
        (self.min.x..=self.max.x).contains(&location.x)
            && (self.min.y..=self.max.y).contains(&location.y)
    }
}

/// Keeps objects inside `bounds` by bouncing them off the walls
///
/// An object past a wall is mirrored back across it and its heading is
/// reflected about the wall's normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Enclosure {
    pub bounds: Bounds,
}

impl Enclosure {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }
}

fn bounce(position: f64, low: f64, high: f64) -> Option<f64> {
    let mirrored = if position < low {
        low + (low - position)
    } else if position > high {
        high - (position - high)
    } else {
        return None;
    };
    Some(mirrored.clamp(low, high))
}

impl EnvironmentalFactor for Enclosure {
    fn name(&self) -> &str {
        "enclosure"
    }

    fn act(&mut self, environment: &mut Environment) -> Result<(), FactorError> {
        let Bounds { min, max } = self.bounds;
        if !(min.is_finite() && max.is_finite()) || min.x > max.x || min.y > max.y {
            return Err(FactorError::Misconfigured(format!(
                "bounds ({}, {})..({}, {}) are inverted or not finite",
                min.x, min.y, max.x, max.y
            )));
        }
        for entity in environment.objects_mut() {
            let object = entity.object_mut();
            if let Some(x) = bounce(object.location.x, min.x, max.x) {
                object.location.x = x;
                let pitch = reflection_angle(90.0, object.vector.pitch());
                object.vector.set_pitch(pitch);
            }
            if let Some(y) = bounce(object.location.y, min.y, max.y) {
                object.location.y = y;
                let pitch = reflection_angle(0.0, object.vector.pitch());
                object.vector.set_pitch(pitch);
            }
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn EnvironmentalFactor> {
        Box::new(self.clone())
    }
}

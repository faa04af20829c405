//! Stock conditions

use crate::behavior::condition::Condition;
use crate::core::error::BehaviorError;
use crate::entity::GameObject;
use crate::spatial::{collided, distance_between};
use ordered_float::OrderedFloat;

/// Targets closer than `distance`
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityCondition {
    pub distance: f64,
}

impl ProximityCondition {
    pub fn new(distance: f64) -> Self {
        Self { distance }
    }
}

impl Condition for ProximityCondition {
    fn select<'t>(
        &self,
        actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        if self.distance.is_nan() {
            return Err(BehaviorError::condition("proximity", "distance is NaN"));
        }
        Ok(targets
            .into_iter()
            .filter(|target| distance_between(actor.location, target.location) < self.distance)
            .collect())
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

/// Targets carrying `tag`
#[derive(Debug, Clone, PartialEq)]
pub struct TagCondition {
    pub tag: String,
}

impl TagCondition {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Condition for TagCondition {
    fn select<'t>(
        &self,
        _actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        Ok(targets.into_iter().filter(|target| target.has_tag(&self.tag)).collect())
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

/// Targets lacking `tag`
#[derive(Debug, Clone, PartialEq)]
pub struct NoTagCondition {
    pub tag: String,
}

impl NoTagCondition {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Condition for NoTagCondition {
    fn select<'t>(
        &self,
        _actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        Ok(targets.into_iter().filter(|target| !target.has_tag(&self.tag)).collect())
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

/// Targets older than `age` seconds
#[derive(Debug, Clone, PartialEq)]
pub struct AgeCondition {
    pub age: f64,
}

impl AgeCondition {
    pub fn new(age: f64) -> Self {
        Self { age }
    }
}

impl Condition for AgeCondition {
    fn select<'t>(
        &self,
        _actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        Ok(targets.into_iter().filter(|target| target.age() > self.age).collect())
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

/// Targets smaller than the actor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrengthCondition;

impl Condition for StrengthCondition {
    fn select<'t>(
        &self,
        actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        Ok(targets.into_iter().filter(|target| target.size() < actor.size()).collect())
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

/// Targets whose disc overlaps the actor's
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionCondition;

impl Condition for CollisionCondition {
    fn select<'t>(
        &self,
        actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        Ok(targets.into_iter().filter(|target| collided(actor, target)).collect())
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

/// The `count` nearest targets, nearest first
///
/// Reorders and truncates, so unlike the filters above its position in the
/// condition list changes the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestCondition {
    pub count: usize,
}

impl NearestCondition {
    pub fn new(count: usize) -> Self {
        Self { count }
    }
}

impl Condition for NearestCondition {
    fn select<'t>(
        &self,
        actor: &GameObject,
        mut targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError> {
        targets.sort_by_key(|target| OrderedFloat(distance_between(actor.location, target.location)));
        targets.truncate(self.count);
        Ok(targets)
    }

    fn box_clone(&self) -> Box<dyn Condition> {
        Box::new(self.clone())
    }
}

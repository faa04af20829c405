//! Actions that steer vectors

use crate::behavior::action::Action;
use crate::behavior::actions::finite;
use crate::behavior::interaction::Interaction;
use crate::core::error::BehaviorError;
use crate::entity::GameObject;
use crate::spatial::{angle_between, Vector};

/// Thrust at `angle` degrees off the actor's current heading
#[derive(Debug, Clone, PartialEq)]
pub struct TurnAction {
    pub rate: f64,
    pub angle: f64,
}

impl TurnAction {
    pub fn new(rate: f64, angle: f64) -> Self {
        Self { rate, angle }
    }
}

impl Action for TurnAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let thrust = Vector::new(self.rate * interaction.elapsed(), actor.vector.pitch() + self.angle);
        actor.vector = finite(actor.vector + thrust, "turn vector")?;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Thrust toward the first target
#[derive(Debug, Clone, PartialEq)]
pub struct ApproachAction {
    pub rate: f64,
}

impl ApproachAction {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Action for ApproachAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if let Some(target) = targets.first() {
            let bearing = angle_between(actor.location, target.location);
            let thrust = Vector::new(self.rate * interaction.elapsed(), bearing);
            actor.vector = finite(actor.vector + thrust, "approach vector")?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Thrust directly away from the first target
#[derive(Debug, Clone, PartialEq)]
pub struct FleeAction {
    pub rate: f64,
}

impl FleeAction {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Action for FleeAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if let Some(target) = targets.first() {
            let bearing = angle_between(actor.location, target.location) + 180.0;
            let thrust = Vector::new(self.rate * interaction.elapsed(), bearing);
            actor.vector = finite(actor.vector + thrust, "flee vector")?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Point the actor's heading at the first target, keeping its speed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceAction;

impl Action for FaceAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if let Some(target) = targets.first() {
            actor.vector.set_pitch(angle_between(actor.location, target.location));
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Change speed by `rate` per second along the current heading
///
/// A negative rate brakes; braking past zero reverses the heading.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerateAction {
    pub rate: f64,
}

impl AccelerateAction {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl Action for AccelerateAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let mut vector = actor.vector;
        vector.set_speed(vector.speed() + self.rate * interaction.elapsed());
        actor.vector = finite(vector, "accelerated vector")?;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Thrust every target away from the actor
#[derive(Debug, Clone, PartialEq)]
pub struct PushAction {
    pub force: f64,
}

impl PushAction {
    pub fn new(force: f64) -> Self {
        Self { force }
    }
}

impl Action for PushAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let magnitude = self.force * interaction.elapsed();
        for target in targets.iter_mut() {
            let thrust = Vector::new(magnitude, angle_between(actor.location, target.location));
            target.vector = finite(target.vector + thrust, "pushed vector")?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Thrust every target toward the actor
#[derive(Debug, Clone, PartialEq)]
pub struct PullAction {
    pub force: f64,
}

impl PullAction {
    pub fn new(force: f64) -> Self {
        Self { force }
    }
}

impl Action for PullAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let magnitude = self.force * interaction.elapsed();
        for target in targets.iter_mut() {
            let thrust = Vector::new(magnitude, angle_between(target.location, actor.location));
            target.vector = finite(target.vector + thrust, "pulled vector")?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

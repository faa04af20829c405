//! Actions that create and remove objects
//!
//! None of these touch the environment directly; removals, spawns and
//! breeding go through the [`Interaction`] command queue.

use crate::behavior::action::Action;
use crate::behavior::actions::Cooldown;
use crate::behavior::interaction::Interaction;
use crate::core::error::BehaviorError;
use crate::entity::{GameObject, Prototype};
use crate::spatial::angle_between;

/// Remove the first chosen target
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestroyAction;

impl Action for DestroyAction {
    fn apply(
        &mut self,
        _actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if let Some(target) = targets.first() {
            interaction.remove(target.id());
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Remove the first chosen target and absorb its size
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EatAction;

impl Action for EatAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if let Some(target) = targets.first() {
            let size = actor.size() + target.size();
            if !size.is_finite() {
                return Err(BehaviorError::NonFinite { quantity: "eaten size" });
            }
            actor.set_size(size);
            interaction.remove(target.id());
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Scatter prototype copies at the actor and remove it, once
#[derive(Debug, Clone)]
pub struct ExplodeAction {
    pub fragments: Vec<Prototype>,
}

impl ExplodeAction {
    pub fn new(fragments: Vec<Prototype>) -> Self {
        Self { fragments }
    }
}

impl Action for ExplodeAction {
    fn start(
        &mut self,
        actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        for fragment in &self.fragments {
            let mut entity = fragment.instantiate();
            entity.object_mut().location = actor.location;
            interaction.spawn(entity);
        }
        interaction.remove(actor.id());
        Ok(())
    }

    fn apply(
        &mut self,
        _actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Spawn prototype copies at the actor every `interval` seconds
#[derive(Debug, Clone)]
pub struct SpawnAction {
    pub prototypes: Vec<Prototype>,
    cooldown: Cooldown,
}

impl SpawnAction {
    pub fn new(prototypes: Vec<Prototype>, interval: f64) -> Self {
        Self { prototypes, cooldown: Cooldown::new(interval) }
    }
}

impl Action for SpawnAction {
    fn start(
        &mut self,
        _actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        self.cooldown.reset();
        Ok(())
    }

    fn apply(
        &mut self,
        actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        if !self.cooldown.ready(interaction.elapsed()) {
            return Ok(());
        }
        for prototype in &self.prototypes {
            let mut entity = prototype.instantiate();
            entity.object_mut().location = actor.location;
            interaction.spawn(entity);
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Fire projectiles from the actor at the first target every `interval` seconds
///
/// Projectiles keep their prototype speed; only the heading is aimed.
#[derive(Debug, Clone)]
pub struct ShootAction {
    pub projectiles: Vec<Prototype>,
    cooldown: Cooldown,
}

impl ShootAction {
    pub fn new(projectiles: Vec<Prototype>, interval: f64) -> Self {
        Self { projectiles, cooldown: Cooldown::new(interval) }
    }
}

impl Action for ShootAction {
    fn start(
        &mut self,
        _actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        self.cooldown.reset();
        Ok(())
    }

    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let Some(target) = targets.first() else {
            return Ok(());
        };
        if !self.cooldown.ready(interaction.elapsed()) {
            return Ok(());
        }
        let bearing = angle_between(actor.location, target.location);
        for projectile in &self.projectiles {
            let mut entity = projectile.instantiate();
            let object = entity.object_mut();
            object.location = actor.location;
            object.vector.set_pitch(bearing);
            interaction.spawn(entity);
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Request an offspring with the first target every `delay` seconds
///
/// The environment builds the child when it applies the command, since it
/// needs both parents and its random source.
#[derive(Debug, Clone)]
pub struct BreedAction {
    cooldown: Cooldown,
}

impl BreedAction {
    pub fn new(delay: f64) -> Self {
        Self { cooldown: Cooldown::new(delay) }
    }

    pub fn delay(&self) -> f64 {
        self.cooldown.interval()
    }
}

impl Action for BreedAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let Some(mate) = targets.first() else {
            return Ok(());
        };
        if self.cooldown.ready(interaction.elapsed()) {
            interaction.breed(actor.id(), mate.id());
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::interaction::Command;
    use crate::core::types::Location;
    use crate::spatial::Vector;

    const EPSILON: f64 = 1e-9;

    fn at(x: f64, y: f64) -> GameObject {
        GameObject::new().with_location(Location::new(x, y))
    }

    #[test]
    fn test_destroy_takes_first_only() {
        let mut actor = at(0.0, 0.0);
        let mut a = at(1.0, 0.0);
        let mut b = at(2.0, 0.0);
        let mut interaction = Interaction::new(0.1);
        DestroyAction
            .apply(&mut actor, &mut [&mut a, &mut b], &mut interaction)
            .unwrap();
        assert!(interaction.is_removed(a.id()));
        assert!(!interaction.is_removed(b.id()));
    }

    #[test]
    fn test_eat_grows_actor() {
        let mut actor = at(0.0, 0.0).with_size(2.0);
        let mut food = at(1.0, 0.0).with_size(0.5);
        let mut interaction = Interaction::new(0.1);
        EatAction.apply(&mut actor, &mut [&mut food], &mut interaction).unwrap();
        assert!((actor.size() - 2.5).abs() < EPSILON);
        assert!(interaction.is_removed(food.id()));
    }

    #[test]
    fn test_explode_spawns_fragments_and_removes_actor() {
        let fragment = Prototype::new(GameObject::new().with_name("shard"));
        let mut action = ExplodeAction::new(vec![fragment.clone(), fragment]);
        let mut actor = at(3.0, 4.0);
        let mut interaction = Interaction::new(0.1);
        action.start(&mut actor, &mut [], &mut interaction).unwrap();

        let commands = interaction.into_commands();
        let spawned: Vec<_> = commands
            .iter()
            .filter_map(|command| match command {
                Command::Spawn(entity) => Some(entity),
                _ => None,
            })
            .collect();
        assert_eq!(spawned.len(), 2);
        assert!(spawned.iter().all(|e| e.object().location == Location::new(3.0, 4.0)));
        assert!(commands.iter().any(|c| matches!(c, Command::Remove(id) if *id == actor.id())));
    }

    #[test]
    fn test_spawn_respects_interval() {
        let mut action = SpawnAction::new(vec![Prototype::new(GameObject::new())], 1.0);
        let mut actor = at(0.0, 0.0);
        let mut interaction = Interaction::new(0.5);
        action.start(&mut actor, &mut [], &mut interaction).unwrap();
        for _ in 0..4 {
            action.apply(&mut actor, &mut [], &mut interaction).unwrap();
        }
        // ready at t=0, then after 1s more of qualifying ticks
        assert_eq!(interaction.commands().len(), 2);
    }

    #[test]
    fn test_shoot_aims_at_first_target() {
        let bullet = Prototype::new(GameObject::new().with_vector(Vector::new(5.0, 0.0)));
        let mut action = ShootAction::new(vec![bullet], 10.0);
        let mut actor = at(0.0, 0.0);
        let mut target = at(0.0, -10.0);
        let mut interaction = Interaction::new(0.1);
        action.apply(&mut actor, &mut [&mut target], &mut interaction).unwrap();
        action.apply(&mut actor, &mut [&mut target], &mut interaction).unwrap();

        let commands = interaction.into_commands();
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            Command::Spawn(entity) => {
                assert!((entity.object().vector.speed() - 5.0).abs() < EPSILON);
                assert!((entity.object().vector.pitch() - 270.0).abs() < EPSILON);
            }
            other => panic!("expected a spawn, got {:?}", other),
        }
    }

    #[test]
    fn test_breed_queues_command() {
        let mut action = BreedAction::new(5.0);
        let mut actor = at(0.0, 0.0);
        let mut mate = at(1.0, 0.0);
        let mut interaction = Interaction::new(0.1);
        action.apply(&mut actor, &mut [&mut mate], &mut interaction).unwrap();
        action.apply(&mut actor, &mut [&mut mate], &mut interaction).unwrap();
        let commands = interaction.into_commands();
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::Breed { parent, mate: m } if parent == actor.id() && m == mate.id()
        ));
    }
}

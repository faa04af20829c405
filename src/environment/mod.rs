//! Environment - owns every object and drives the tick loop
//!
//! One call to `interact` is one tick:
//! clock -> (advance -> act -> apply commands) per object -> factors -> observers
//!
//! A fault in one object or factor never stops the tick. The offender is
//! removed for good, the fault is logged and returned in the tick report,
//! and processing continues with the next object or factor.

pub mod factor;
pub mod observer;

pub use factor::{
    Bounds, Enclosure, EnvironmentalFactor, Friction, Gravity, PopulationLimit, SpeedLimit,
};
pub use observer::Observer;

use crate::behavior::{Command, Interaction};
use crate::core::clock::{Clock, FixedStepClock, SystemClock};
use crate::core::config::SimulationConfig;
use crate::core::error::{BehaviorError, Fault, Result};
use crate::core::types::{Location, ObjectId, Tick};
use crate::entity::{Creature, Entity, GameObject};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    pub elapsed: f64,
    pub spawned: Vec<ObjectId>,
    pub removed: Vec<ObjectId>,
    pub faults: Vec<Fault>,
}

impl TickReport {
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

pub struct Environment {
    objects: Vec<Entity>,
    factors: Vec<Box<dyn EnvironmentalFactor>>,
    observers: Vec<Box<dyn Observer>>,
    clock: Box<dyn Clock>,
    rng: ChaCha8Rng,
    tick: Tick,
    elapsed: f64,
    /// Objects removed since the current tick began
    removed: Vec<ObjectId>,
}

impl Environment {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self::with_clock(Box::new(clock))
    }

    fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            objects: Vec::new(),
            factors: Vec::new(),
            observers: Vec::new(),
            clock,
            rng: ChaCha8Rng::from_entropy(),
            tick: 0,
            elapsed: 0.0,
            removed: Vec::new(),
        }
    }

    /// Reseed the random source used for breeding
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Empty environment with the configured clock, seed and factors
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let clock: Box<dyn Clock> = if config.clock.wall_clock {
            Box::new(SystemClock::new())
        } else {
            Box::new(FixedStepClock::new(config.clock.fixed_step))
        };
        let mut environment = Self::with_clock(clock);
        if let Some(seed) = config.seed {
            environment.rng = ChaCha8Rng::seed_from_u64(seed);
        }

        let factors = &config.factors;
        if factors.gravity > 0.0 {
            environment.add_factor(Gravity::new(factors.gravity));
        }
        if factors.friction > 0.0 {
            environment.add_factor(Friction::new(factors.friction));
        }
        if let Some(max) = factors.speed_limit {
            environment.add_factor(SpeedLimit::new(max));
        }
        if factors.enclosed {
            let bounds = Bounds::new(
                Location::new(0.0, 0.0),
                Location::new(config.world.width, config.world.height),
            );
            environment.add_factor(Enclosure::new(bounds));
        }
        if let Some(count) = factors.population_limit {
            environment.add_factor(PopulationLimit::new(count));
        }

        tracing::info!(
            factors = environment.factors.len(),
            wall_clock = config.clock.wall_clock,
            seed = ?config.seed,
            "environment configured"
        );
        Ok(environment)
    }

    /// Ticks completed so far
    pub fn tick(&self) -> Tick {
        self.tick
    }

    /// Seconds covered by the most recent tick
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn objects(&self) -> &[Entity] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Entity] {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&Entity> {
        self.objects.iter().find(|entity| entity.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Entity> {
        self.objects.iter_mut().find(|entity| entity.id() == id)
    }

    /// Append an object. During a tick it is first processed on the next one.
    pub fn add_object(&mut self, entity: impl Into<Entity>) -> ObjectId {
        let entity = entity.into();
        let id = entity.id();
        self.objects.push(entity);
        id
    }

    /// Remove an object, keeping the order of the rest
    pub fn remove_object(&mut self, id: ObjectId) -> Option<Entity> {
        let index = self.position(id)?;
        self.removed.push(id);
        Some(self.objects.remove(index))
    }

    pub fn factors(&self) -> &[Box<dyn EnvironmentalFactor>] {
        &self.factors
    }

    pub fn add_factor(&mut self, factor: impl EnvironmentalFactor + 'static) {
        self.factors.push(Box::new(factor));
    }

    /// Remove the first factor called `name`
    pub fn remove_factor(&mut self, name: &str) -> Option<Box<dyn EnvironmentalFactor>> {
        let index = self.factors.iter().position(|factor| factor.name() == name)?;
        Some(self.factors.remove(index))
    }

    pub fn add_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Run one tick
    pub fn interact(&mut self) -> TickReport {
        let elapsed = self.clock.elapsed_time();
        self.elapsed = elapsed;
        self.tick += 1;
        self.removed.clear();

        let mut report = TickReport { tick: self.tick, elapsed, ..TickReport::default() };

        // Objects spawned during the tick are not in the roster
        let roster: Vec<ObjectId> = self.objects.iter().map(Entity::id).collect();
        for id in roster {
            let Some(index) = self.position(id) else {
                continue;
            };
            if let Err(source) = self.objects[index].advance(elapsed) {
                self.quarantine(Fault::Movement { id, source }, &mut report);
                continue;
            }
            if let Err(source) = self.act(index, elapsed, &mut report) {
                self.quarantine(Fault::Behavior { id, source }, &mut report);
            }
        }

        self.run_factors(&mut report);
        report.removed = self.removed.clone();

        tracing::debug!(
            tick = report.tick,
            elapsed = report.elapsed,
            objects = self.objects.len(),
            spawned = report.spawned.len(),
            removed = report.removed.len(),
            faults = report.faults.len(),
            "tick complete"
        );

        self.notify_observers();
        report
    }

    /// Deep copy of objects and factors. Observers are not copied and the
    /// copy's clock starts fresh.
    pub fn copy(&self) -> Self {
        Self {
            objects: self.objects.iter().map(Entity::copy).collect(),
            factors: self.factors.clone(),
            observers: Vec::new(),
            clock: self.clock.fresh(),
            rng: self.rng.clone(),
            tick: self.tick,
            elapsed: self.elapsed,
            removed: Vec::new(),
        }
    }

    fn position(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|entity| entity.id() == id)
    }

    /// Let the object at `index` act on everyone else, then apply what it asked for
    ///
    /// Commands issued before a failure are still applied.
    fn act(
        &mut self,
        index: usize,
        elapsed: f64,
        report: &mut TickReport,
    ) -> std::result::Result<(), BehaviorError> {
        let mut interaction = Interaction::new(elapsed);
        let outcome = {
            let (before, rest) = self.objects.split_at_mut(index);
            let Some((actor, after)) = rest.split_first_mut() else {
                return Ok(());
            };
            let Some(creature) = actor.as_creature_mut() else {
                return Ok(());
            };
            let mut targets: Vec<&mut GameObject> = before
                .iter_mut()
                .chain(after.iter_mut())
                .map(Entity::object_mut)
                .collect();
            creature.act(&mut targets, &mut interaction)
        };
        self.apply(interaction.into_commands(), report);
        outcome
    }

    fn apply(&mut self, commands: Vec<Command>, report: &mut TickReport) {
        for command in commands {
            match command {
                Command::Remove(id) => {
                    self.remove_object(id);
                }
                Command::Spawn(entity) => {
                    report.spawned.push(self.add_object(entity));
                }
                Command::Breed { parent, mate } => match self.breed(parent, mate) {
                    Some(child) => report.spawned.push(self.add_object(child)),
                    None => tracing::debug!(%parent, %mate, "breeding skipped, a parent is gone"),
                },
            }
        }
    }

    /// Offspring of `parent` and `mate`; each of their behaviors is inherited
    /// with probability one half
    fn breed(&mut self, parent: ObjectId, mate: ObjectId) -> Option<Creature> {
        let objects = &self.objects;
        let rng = &mut self.rng;
        let parent = objects.iter().find(|entity| entity.id() == parent)?;
        let mate = objects.iter().find(|entity| entity.id() == mate)?;

        let mut child = Creature::new(parent.object().offspring(mate.object()));
        let inherited = [parent, mate]
            .into_iter()
            .filter_map(Entity::as_creature)
            .flat_map(Creature::behaviors);
        for behavior in inherited {
            if rng.gen_bool(0.5) {
                child.add_behavior(behavior.clone());
            }
        }
        Some(child)
    }

    fn quarantine(&mut self, fault: Fault, report: &mut TickReport) {
        tracing::warn!(tick = self.tick, %fault, "quarantined after fault");
        match &fault {
            Fault::Movement { id, .. } | Fault::Behavior { id, .. } => {
                self.remove_object(*id);
            }
            Fault::Factor { .. } => {}
        }
        report.faults.push(fault);
    }

    fn run_factors(&mut self, report: &mut TickReport) {
        let mut kept = Vec::with_capacity(self.factors.len());
        for mut factor in std::mem::take(&mut self.factors) {
            match factor.act(self) {
                Ok(()) => kept.push(factor),
                Err(source) => {
                    let fault = Fault::Factor { factor: factor.name().to_string(), source };
                    self.quarantine(fault, report);
                }
            }
        }
        // Factors added while the others ran go last
        kept.append(&mut self.factors);
        self.factors = kept;
    }

    fn notify_observers(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        for observer in &mut observers {
            observer.notify(self);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("tick", &self.tick)
            .field("elapsed", &self.elapsed)
            .field("objects", &self.objects)
            .field("factors", &self.factors)
            .field("observers", &self.observers.len())
            .field("clock", &self.clock)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::actions::{BreedAction, SpawnAction, TagAction};
    use crate::behavior::conditions::TagCondition;
    use crate::behavior::Behavior;
    use crate::entity::{Color, Prototype};
    use crate::spatial::Vector;
    use std::cell::Cell;
    use std::rc::Rc;

    fn fixed() -> Environment {
        Environment::new(FixedStepClock::new(0.1))
    }

    #[test]
    fn test_tick_counts_and_elapsed() {
        let mut environment = fixed();
        let report = environment.interact();
        assert_eq!(report.tick, 1);
        assert!((report.elapsed - 0.1).abs() < 1e-12);
        assert_eq!(environment.tick(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_remove_object_keeps_order() {
        let mut environment = fixed();
        let a = environment.add_object(GameObject::new());
        let b = environment.add_object(GameObject::new());
        let c = environment.add_object(GameObject::new());
        assert!(environment.remove_object(b).is_some());
        assert!(environment.remove_object(b).is_none());
        let ids: Vec<_> = environment.objects().iter().map(Entity::id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn test_spawned_objects_wait_a_tick() {
        let seed = Prototype::new(GameObject::new().with_vector(Vector::new(10.0, 0.0)));
        let spawner = Creature::new(GameObject::new())
            .with_behavior(Behavior::new().with_action(SpawnAction::new(vec![seed], 100.0)));
        let mut environment = fixed();
        environment.add_object(spawner);
        environment.add_object(GameObject::new());

        let report = environment.interact();
        assert_eq!(report.spawned.len(), 1);
        let child = environment.get(report.spawned[0]).map(|e| e.object().location);
        assert_eq!(child, Some(Location::new(0.0, 0.0)), "spawned object must not move this tick");

        environment.interact();
        let child = environment.get(report.spawned[0]).map(|e| e.object().location.x);
        assert!(child.map_or(false, |x| (x - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_failing_factor_is_removed() {
        let mut environment = fixed();
        let inverted = Bounds::new(Location::new(5.0, 5.0), Location::new(0.0, 0.0));
        environment.add_factor(Enclosure::new(inverted));
        environment.add_factor(SpeedLimit::new(1.0));

        let report = environment.interact();
        assert_eq!(report.faults.len(), 1);
        assert!(matches!(&report.faults[0], Fault::Factor { factor, .. } if factor == "enclosure"));
        let names: Vec<_> = environment.factors().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, vec!["speed limit".to_string()]);
    }

    #[test]
    fn test_remove_factor_by_name() {
        let mut environment = fixed();
        environment.add_factor(Gravity::new(1.0));
        environment.add_factor(Friction::new(1.0));
        assert!(environment.remove_factor("gravity").is_some());
        assert!(environment.remove_factor("gravity").is_none());
        assert_eq!(environment.factors().len(), 1);
    }

    #[test]
    fn test_observers_run_once_per_tick() {
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        let mut environment = fixed();
        environment.add_observer(move |_: &Environment| counter.set(counter.get() + 1));
        environment.interact();
        environment.interact();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_breeding_mixes_parents() {
        let parent = Creature::new(GameObject::new().with_color(Color::WHITE).with_tag("ant"))
            .with_behavior(
                Behavior::named("breed")
                    .with_condition(TagCondition::new("mate"))
                    .with_action(BreedAction::new(1000.0)),
            );
        let mate = GameObject::new().with_color(Color::BLACK).with_tag("mate");
        let mut environment = fixed().with_seed(7);
        let parent_id = environment.add_object(parent);
        environment.add_object(mate);

        let report = environment.interact();
        assert_eq!(report.spawned.len(), 1);
        let child = environment.get(report.spawned[0]).expect("child present");
        assert!(child.can_act());
        assert_ne!(child.id(), parent_id);
        assert_eq!(child.object().color.to_array(), [0.5, 0.5, 0.5]);
        assert!(child.object().has_tag("ant"));
        assert!(child.as_creature().map_or(0, |c| c.behaviors().len()) <= 1);
    }

    #[test]
    fn test_copy_is_independent() {
        let tagger = Creature::new(GameObject::new().with_name("tagger"))
            .with_behavior(Behavior::new().with_action(TagAction::new("seen")));
        let mut environment = fixed();
        environment.add_object(tagger);
        environment.add_object(GameObject::new().with_name("rock"));
        environment.add_factor(Friction::new(1.0));
        environment.add_observer(|_: &Environment| {});

        let mut copy = environment.copy();
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.factors().len(), 1);
        assert_ne!(copy.objects()[0].id(), environment.objects()[0].id());

        copy.interact();
        assert!(copy.objects()[1].object().has_tag("seen"));
        assert!(!environment.objects()[1].object().has_tag("seen"));
    }

    #[test]
    fn test_from_config_builds_factors() {
        let mut config = SimulationConfig::default();
        config.factors.gravity = 9.8;
        config.seed = Some(1);
        let environment = Environment::from_config(&config).unwrap();
        let names: Vec<_> = environment.factors().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(names, vec!["gravity", "speed limit", "enclosure", "population limit"]);
    }
}

//! Predator/prey population used by the headless runner and the benchmark

use crate::behavior::actions::{ApproachAction, BreedAction, EatAction, FleeAction};
use crate::behavior::conditions::{
    CollisionCondition, NearestCondition, ProximityCondition, TagCondition,
};
use crate::behavior::Behavior;
use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::Location;
use crate::entity::{Color, Creature, GameObject};
use crate::environment::Environment;
use crate::spatial::Vector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const PREY_TAG: &str = "prey";
pub const PREDATOR_TAG: &str = "predator";

const PREY_SIZE: f64 = 12.0;
const PREDATOR_SIZE: f64 = 40.0;
const MATING_RANGE: f64 = 6.0;
const MATING_DELAY: f64 = 8.0;

pub fn prey(config: &SimulationConfig, location: Location, heading: f64) -> Creature {
    let population = &config.population;
    let object = GameObject::new()
        .with_name("prey")
        .with_tag(PREY_TAG)
        .with_color(Color::GREEN)
        .with_size(PREY_SIZE)
        .with_location(location)
        .with_vector(Vector::new(population.prey_speed, heading));

    Creature::new(object)
        .with_behavior(
            Behavior::named("flee")
                .with_condition(TagCondition::new(PREDATOR_TAG))
                .with_condition(ProximityCondition::new(population.prey_sight))
                .with_condition(NearestCondition::new(1))
                .with_action(FleeAction::new(population.prey_speed)),
        )
        .with_behavior(
            Behavior::named("mate")
                .with_condition(TagCondition::new(PREY_TAG))
                .with_condition(ProximityCondition::new(MATING_RANGE))
                .with_action(BreedAction::new(MATING_DELAY)),
        )
}

pub fn predator(config: &SimulationConfig, location: Location) -> Creature {
    let population = &config.population;
    let object = GameObject::new()
        .with_name("predator")
        .with_tag(PREDATOR_TAG)
        .with_color(Color::RED)
        .with_size(PREDATOR_SIZE)
        .with_location(location);

    Creature::new(object)
        .with_behavior(
            Behavior::named("hunt")
                .with_condition(TagCondition::new(PREY_TAG))
                .with_condition(ProximityCondition::new(population.predator_sight))
                .with_condition(NearestCondition::new(1))
                .with_action(ApproachAction::new(population.predator_thrust)),
        )
        .with_behavior(
            Behavior::named("eat")
                .with_condition(TagCondition::new(PREY_TAG))
                .with_condition(CollisionCondition)
                .with_action(EatAction),
        )
}

/// Configured environment scattered with prey and predators
///
/// Placement is reproducible when the config carries a seed.
pub fn predator_prey(config: &SimulationConfig) -> Result<Environment> {
    let mut environment = Environment::from_config(config)?;
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let (width, height) = (config.world.width, config.world.height);

    for _ in 0..config.population.prey {
        let location = Location::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        environment.add_object(prey(config, location, rng.gen_range(0.0..360.0)));
    }
    for _ in 0..config.population.predators {
        let location = Location::new(rng.gen_range(0.0..width), rng.gen_range(0.0..height));
        environment.add_object(predator(config, location));
    }

    tracing::info!(
        prey = config.population.prey,
        predators = config.population.predators,
        "population placed"
    );
    Ok(environment)
}

/// Number of objects carrying `tag`
pub fn census(environment: &Environment, tag: &str) -> usize {
    environment
        .objects()
        .iter()
        .filter(|entity| entity.object().has_tag(tag))
        .count()
}

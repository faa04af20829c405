//! Simulation configuration with documented defaults
//!
//! Loaded from TOML (see `data/simulation.toml`). Every section is optional;
//! missing sections and fields fall back to the defaults below.

use crate::core::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Clock selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Measure real elapsed time instead of a fixed step
    pub wall_clock: bool,

    /// Seconds reported per tick when `wall_clock` is off
    pub fixed_step: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { wall_clock: false, fixed_step: 1.0 / 30.0 }
    }
}

/// Extent of the playing field (world units)
///
/// Only enforced when `factors.enclosed` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

/// Global per-tick effects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorConfig {
    /// Downward thrust per second. 0 disables gravity.
    pub gravity: f64,

    /// Speed lost per second. 0 disables friction.
    pub friction: f64,

    /// Maximum speed of any object
    pub speed_limit: Option<f64>,

    /// Maximum object count; the oldest objects are culled above it
    pub population_limit: Option<usize>,

    /// Keep objects inside the world bounds
    pub enclosed: bool,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            gravity: 0.0,
            friction: 0.0,
            speed_limit: Some(200.0),
            population_limit: Some(500),
            enclosed: true,
        }
    }
}

/// Starting population for the headless runner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub prey: usize,
    pub predators: usize,

    /// Cruising speed given to prey at spawn
    pub prey_speed: f64,

    /// Thrust per second predators apply toward prey
    pub predator_thrust: f64,

    /// Distance within which predators notice prey
    pub predator_sight: f64,

    /// Distance within which prey notice predators
    pub prey_sight: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            prey: 40,
            predators: 4,
            prey_speed: 30.0,
            predator_thrust: 60.0,
            predator_sight: 150.0,
            prey_sight: 80.0,
        }
    }
}

/// Configuration for an environment and the runner that drives it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for breeding inheritance and scenario placement. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub clock: ClockConfig,
    pub world: WorldConfig,
    pub factors: FactorConfig,
    pub population: PopulationConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            clock: ClockConfig::default(),
            world: WorldConfig::default(),
            factors: FactorConfig::default(),
            population: PopulationConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let step = self.clock.fixed_step;
        if !step.is_finite() || step < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "clock.fixed_step ({}) must be a finite, non-negative number of seconds",
                step
            )));
        }

        if !(self.world.width > 0.0 && self.world.height > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "world dimensions ({} x {}) must be positive",
                self.world.width, self.world.height
            )));
        }

        for (name, value) in [("gravity", self.factors.gravity), ("friction", self.factors.friction)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "factors.{} ({}) must be finite and non-negative",
                    name, value
                )));
            }
        }

        if let Some(limit) = self.factors.speed_limit {
            if !(limit > 0.0) {
                return Err(SimError::InvalidConfig(format!(
                    "factors.speed_limit ({}) must be positive",
                    limit
                )));
            }
        }

        if self.factors.population_limit == Some(0) {
            return Err(SimError::InvalidConfig(
                "factors.population_limit must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 7

            [factors]
            gravity = 9.8
            "#,
        )
        .expect("partial config should parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.factors.gravity, 9.8);
        assert_eq!(config.world.width, 800.0);
        assert_eq!(config.population.predators, 4);
    }

    #[test]
    fn test_rejects_negative_step() {
        let result = SimulationConfig::from_toml_str("[clock]\nfixed_step = -0.5\n");
        assert!(matches!(result, Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_world() {
        let mut config = SimulationConfig::default();
        config.world.width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = SimulationConfig::from_toml_str("seed = \"seven\"");
        assert!(matches!(result, Err(SimError::TomlError(_))));
    }
}

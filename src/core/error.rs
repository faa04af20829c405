use crate::core::types::{Location, ObjectId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

/// Raised when an object cannot advance by its vector
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoveError {
    #[error("moved to a non-finite location ({}, {})", .0.x, .0.y)]
    NonFiniteLocation(Location),

    #[error("elapsed time is not finite: {0}")]
    NonFiniteElapsed(f64),
}

/// Raised by a condition or action while a behavior is performed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BehaviorError {
    #[error("condition {condition} failed: {reason}")]
    Condition { condition: String, reason: String },

    #[error("action {action} failed: {reason}")]
    Action { action: String, reason: String },

    #[error("{quantity} became non-finite")]
    NonFinite { quantity: &'static str },
}

impl BehaviorError {
    pub fn action(action: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Action { action: action.into(), reason: reason.into() }
    }

    pub fn condition(condition: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Condition { condition: condition.into(), reason: reason.into() }
    }
}

/// Raised by an environmental factor during a tick
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FactorError {
    #[error("misconfigured: {0}")]
    Misconfigured(String),

    #[error("{quantity} became non-finite")]
    NonFinite { quantity: &'static str },
}

/// A caught per-tick failure. The offending object or factor is removed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    #[error("object {id} failed to move: {source}")]
    Movement { id: ObjectId, source: MoveError },

    #[error("object {id} failed to act: {source}")]
    Behavior { id: ObjectId, source: BehaviorError },

    #[error("environmental factor {factor} failed: {source}")]
    Factor { factor: String, source: FactorError },
}

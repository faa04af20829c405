//! Swarm Arena - 2D entity interaction engine
//!
//! Creatures pick targets through conditions and affect them through
//! actions; an environment advances everything once per tick.

pub mod behavior;
pub mod core;
pub mod entity;
pub mod environment;
pub mod replication;
pub mod scenario;
pub mod spatial;

//! Target filtering

use crate::core::error::BehaviorError;
use crate::entity::GameObject;
use std::fmt;

/// Narrows a candidate list for an actor
///
/// Conditions run in declared order, each on the survivors of the previous
/// one. A condition that only drops candidates (a pure filter) makes the
/// pipeline order-independent; one that reorders or truncates does not.
pub trait Condition: fmt::Debug {
    fn select<'t>(
        &self,
        actor: &GameObject,
        targets: Vec<&'t GameObject>,
    ) -> Result<Vec<&'t GameObject>, BehaviorError>;

    fn box_clone(&self) -> Box<dyn Condition>;
}

impl Clone for Box<dyn Condition> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

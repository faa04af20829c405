//! Behavior pipeline
//!
//! A behavior narrows the candidate list through its conditions, then drives
//! each action's state machine with whatever survived:
//! candidates -> condition 1 -> ... -> condition n -> actions (start/apply/stop)

pub mod action;
pub mod actions;
pub mod condition;
pub mod conditions;
pub mod interaction;

pub use action::{Action, ActionSlot, ActionState};
pub use condition::Condition;
pub use interaction::{Command, Interaction};

use crate::core::error::BehaviorError;
use crate::core::types::ObjectId;
use crate::entity::GameObject;

/// Conditions and actions evaluated together
///
/// Holds no target cache: choices are recomputed on every `perform`.
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    name: Option<String>,
    conditions: Vec<Box<dyn Condition>>,
    actions: Vec<ActionSlot>,
}

impl Behavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    pub fn with_condition(mut self, condition: impl Condition + 'static) -> Self {
        self.add_condition(Box::new(condition));
        self
    }

    pub fn with_action(mut self, action: impl Action + 'static) -> Self {
        self.add_action(Box::new(action));
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn add_condition(&mut self, condition: Box<dyn Condition>) {
        self.conditions.push(condition);
    }

    pub fn add_action(&mut self, action: Box<dyn Action>) {
        self.actions.push(ActionSlot::new(action));
    }

    pub fn conditions(&self) -> &[Box<dyn Condition>] {
        &self.conditions
    }

    pub fn actions(&self) -> &[ActionSlot] {
        &self.actions
    }

    /// Filter `targets` through every condition and drive every action
    ///
    /// Targets already removed during this tick are dropped before the
    /// conditions run. When nothing survives, each action is stopped with
    /// the original target list.
    pub fn perform(
        &mut self,
        actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        let chosen: Vec<ObjectId> = {
            let mut choices: Vec<&GameObject> = targets
                .iter()
                .map(|target| &**target)
                .filter(|target| !interaction.is_removed(target.id()))
                .collect();
            for condition in &self.conditions {
                choices = condition.select(actor, choices)?;
            }
            choices.iter().map(|target| target.id()).collect()
        };

        if chosen.is_empty() {
            for slot in &mut self.actions {
                slot.disengage(actor, targets, interaction)?;
            }
            return Ok(());
        }

        // Hand out mutable references in the order the conditions left them
        let mut pool: Vec<Option<&mut GameObject>> =
            targets.iter_mut().map(|target| Some(&mut **target)).collect();
        let mut choices: Vec<&mut GameObject> = Vec::with_capacity(chosen.len());
        for id in &chosen {
            let found = pool
                .iter_mut()
                .find(|entry| entry.as_ref().map_or(false, |target| target.id() == *id))
                .and_then(Option::take);
            if let Some(target) = found {
                choices.push(target);
            }
        }

        for slot in &mut self.actions {
            slot.engage(actor, &mut choices, interaction)?;
        }
        Ok(())
    }
}

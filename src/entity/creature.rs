//! Creature - a GameObject that acts through its behaviors

use crate::behavior::{Behavior, Interaction};
use crate::core::error::BehaviorError;
use crate::entity::object::GameObject;

#[derive(Debug, Default)]
pub struct Creature {
    object: GameObject,
    behaviors: Vec<Behavior>,
}

impl Creature {
    pub fn new(object: GameObject) -> Self {
        Self { object, behaviors: Vec::new() }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    pub fn object(&self) -> &GameObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut GameObject {
        &mut self.object
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    pub fn behaviors_mut(&mut self) -> &mut Vec<Behavior> {
        &mut self.behaviors
    }

    pub fn add_behavior(&mut self, behavior: Behavior) {
        self.behaviors.push(behavior);
    }

    /// Run every behavior, in order, against the full target list
    ///
    /// Behaviors filter independently; none sees another's narrowed choices.
    /// The first failing behavior aborts the rest.
    pub fn act(
        &mut self,
        targets: &mut [&mut GameObject],
        interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        for behavior in &mut self.behaviors {
            behavior.perform(&mut self.object, targets, interaction)?;
        }
        Ok(())
    }

    /// Deep copy: fresh identity, "Copy of X" name, stateless behavior copies
    pub fn copy(&self) -> Self {
        Self {
            object: self.object.copy(),
            behaviors: self.behaviors.clone(),
        }
    }

    pub(crate) fn duplicate(&self) -> Self {
        Self {
            object: self.object.duplicate(),
            behaviors: self.behaviors.clone(),
        }
    }
}

impl From<GameObject> for Creature {
    fn from(object: GameObject) -> Self {
        Self::new(object)
    }
}

//! Actions that change how objects look

use crate::behavior::action::Action;
use crate::behavior::interaction::Interaction;
use crate::core::error::BehaviorError;
use crate::entity::{Color, GameObject};

/// Tag every chosen target
#[derive(Debug, Clone, PartialEq)]
pub struct TagAction {
    pub tag: String,
}

impl TagAction {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Action for TagAction {
    fn apply(
        &mut self,
        _actor: &mut GameObject,
        targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        for target in targets.iter_mut() {
            target.add_tag(self.tag.as_str());
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

/// Average the actor's color with `color` on every qualifying tick
#[derive(Debug, Clone, PartialEq)]
pub struct BlendAction {
    pub color: Color,
}

impl BlendAction {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Action for BlendAction {
    fn apply(
        &mut self,
        actor: &mut GameObject,
        _targets: &mut [&mut GameObject],
        _interaction: &mut Interaction,
    ) -> Result<(), BehaviorError> {
        actor.color = actor.color + self.color;
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Action> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_blend_toward_black() {
        let mut actor = GameObject::new().with_color(Color::new(0.5, 0.5, 0.5));
        let mut target = GameObject::new();
        BlendAction::new(Color::BLACK)
            .apply(&mut actor, &mut [&mut target], &mut Interaction::new(0.1))
            .unwrap();
        for channel in actor.color.to_array() {
            assert!((channel - 0.25).abs() < EPSILON);
        }
    }

    #[test]
    fn test_tag_all_targets() {
        let mut actor = GameObject::new();
        let mut a = GameObject::new();
        let mut b = GameObject::new();
        TagAction::new("marked")
            .apply(&mut actor, &mut [&mut a, &mut b], &mut Interaction::new(0.1))
            .unwrap();
        assert!(a.has_tag("marked") && b.has_tag("marked"));
        assert!(!actor.has_tag("marked"));
    }
}

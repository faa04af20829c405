//! Entity model: objects, creatures and the sum type an environment holds

pub mod color;
pub mod creature;
pub mod object;

pub use color::Color;
pub use creature::Creature;
pub use object::GameObject;

use crate::core::error::MoveError;
use crate::core::types::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Object,
    Creature,
}

/// Anything an environment can hold. Only creatures act.
#[derive(Debug)]
pub enum Entity {
    Object(GameObject),
    Creature(Creature),
}

impl Entity {
    pub fn id(&self) -> ObjectId {
        self.object().id()
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Object(_) => EntityKind::Object,
            Entity::Creature(_) => EntityKind::Creature,
        }
    }

    pub fn object(&self) -> &GameObject {
        match self {
            Entity::Object(object) => object,
            Entity::Creature(creature) => creature.object(),
        }
    }

    pub fn object_mut(&mut self) -> &mut GameObject {
        match self {
            Entity::Object(object) => object,
            Entity::Creature(creature) => creature.object_mut(),
        }
    }

    pub fn can_act(&self) -> bool {
        matches!(self, Entity::Creature(_))
    }

    pub fn as_creature(&self) -> Option<&Creature> {
        match self {
            Entity::Creature(creature) => Some(creature),
            Entity::Object(_) => None,
        }
    }

    pub fn as_creature_mut(&mut self) -> Option<&mut Creature> {
        match self {
            Entity::Creature(creature) => Some(creature),
            Entity::Object(_) => None,
        }
    }

    pub fn advance(&mut self, elapsed: f64) -> Result<(), MoveError> {
        self.object_mut().advance(elapsed)
    }

    pub fn copy(&self) -> Entity {
        match self {
            Entity::Object(object) => Entity::Object(object.copy()),
            Entity::Creature(creature) => Entity::Creature(creature.copy()),
        }
    }

    pub(crate) fn duplicate(&self) -> Entity {
        match self {
            Entity::Object(object) => Entity::Object(object.duplicate()),
            Entity::Creature(creature) => Entity::Creature(creature.duplicate()),
        }
    }
}

impl From<GameObject> for Entity {
    fn from(object: GameObject) -> Self {
        Entity::Object(object)
    }
}

impl From<Creature> for Entity {
    fn from(creature: Creature) -> Self {
        Entity::Creature(creature)
    }
}

/// Template for entities spawned by actions
///
/// Every instance gets a fresh identity and keeps the template's name.
#[derive(Debug)]
pub struct Prototype(Entity);

impl Prototype {
    pub fn new(entity: impl Into<Entity>) -> Self {
        Self(entity.into())
    }

    pub fn template(&self) -> &Entity {
        &self.0
    }

    pub fn instantiate(&self) -> Entity {
        self.0.duplicate()
    }
}

impl Clone for Prototype {
    fn clone(&self) -> Self {
        Self(self.0.duplicate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;

    #[test]
    fn test_only_creatures_act() {
        let rock = Entity::from(GameObject::new());
        let critter = Entity::from(Creature::new(GameObject::new()));
        assert!(!rock.can_act());
        assert!(critter.can_act());
        assert_eq!(rock.kind(), EntityKind::Object);
        assert_eq!(critter.kind(), EntityKind::Creature);
    }

    #[test]
    fn test_creature_copy_duplicates_behaviors() {
        let creature = Creature::new(GameObject::new().with_name("ant"))
            .with_behavior(Behavior::named("wander"))
            .with_behavior(Behavior::named("forage"));
        let entity = Entity::from(creature);
        let copy = entity.copy();

        assert_ne!(copy.id(), entity.id());
        assert_eq!(copy.object().name.as_deref(), Some("Copy of ant"));
        let behaviors = copy.as_creature().map(|c| c.behaviors().len());
        assert_eq!(behaviors, Some(2));
    }

    #[test]
    fn test_prototype_instances_keep_name() {
        let prototype = Prototype::new(GameObject::new().with_name("spark"));
        let a = prototype.instantiate();
        let b = prototype.instantiate();
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), prototype.template().id());
        assert_eq!(a.object().name.as_deref(), Some("spark"));
    }
}

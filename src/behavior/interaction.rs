//! Per-actor tick context
//!
//! Actions never touch the environment's collection directly. They queue
//! commands here; the environment applies them as soon as the actor's turn
//! ends, before any other object moves or acts.

use crate::core::types::ObjectId;
use crate::entity::Entity;
use ahash::AHashSet;

#[derive(Debug)]
pub enum Command {
    /// Remove an object from the environment
    Remove(ObjectId),
    /// Append a new entity; it is first processed on the next tick
    Spawn(Entity),
    /// Append an offspring of `parent` and `mate`
    Breed { parent: ObjectId, mate: ObjectId },
}

#[derive(Debug)]
pub struct Interaction {
    elapsed: f64,
    removed: AHashSet<ObjectId>,
    commands: Vec<Command>,
}

impl Interaction {
    pub fn new(elapsed: f64) -> Self {
        Self {
            elapsed,
            removed: AHashSet::new(),
            commands: Vec::new(),
        }
    }

    /// Seconds covered by the current tick
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Request removal. Later behaviors of the same actor no longer see the object.
    pub fn remove(&mut self, id: ObjectId) {
        if self.removed.insert(id) {
            self.commands.push(Command::Remove(id));
        }
    }

    pub fn is_removed(&self, id: ObjectId) -> bool {
        self.removed.contains(&id)
    }

    pub fn spawn(&mut self, entity: impl Into<Entity>) {
        self.commands.push(Command::Spawn(entity.into()));
    }

    pub fn breed(&mut self, parent: ObjectId, mate: ObjectId) {
        self.commands.push(Command::Breed { parent, mate });
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::GameObject;

    #[test]
    fn test_remove_is_idempotent() {
        let id = ObjectId::new();
        let mut interaction = Interaction::new(0.1);
        interaction.remove(id);
        interaction.remove(id);
        assert!(interaction.is_removed(id));
        assert_eq!(interaction.commands().len(), 1);
    }

    #[test]
    fn test_commands_keep_order() {
        let mut interaction = Interaction::new(0.1);
        let victim = ObjectId::new();
        interaction.spawn(GameObject::new());
        interaction.remove(victim);
        let commands = interaction.into_commands();
        assert!(matches!(commands[0], Command::Spawn(_)));
        assert!(matches!(commands[1], Command::Remove(id) if id == victim));
    }
}

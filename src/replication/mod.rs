//! Replication contracts
//!
//! Objects are keyed by `ObjectId` so a remote peer can track them across
//! ticks. A [`Replicator`] observes an environment and turns successive
//! snapshots into upsert/remove messages; moving those messages is left to
//! whatever transport drains the [`Outbox`].

pub mod snapshot;

pub use snapshot::{EnvironmentSnapshot, ObjectSnapshot};

use crate::core::types::{ObjectId, Tick};
use crate::environment::{Environment, Observer};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplicationMessage {
    /// The object is new or changed since the previous tick
    Upsert { tick: Tick, object: ObjectSnapshot },
    /// The object left the environment
    Remove { tick: Tick, id: ObjectId },
}

impl ReplicationMessage {
    pub fn id(&self) -> ObjectId {
        match self {
            ReplicationMessage::Upsert { object, .. } => object.id,
            ReplicationMessage::Remove { id, .. } => *id,
        }
    }
}

/// Shared queue of messages waiting for a transport
#[derive(Debug, Clone, Default)]
pub struct Outbox(Rc<RefCell<Vec<ReplicationMessage>>>);

impl Outbox {
    /// Take every queued message, oldest first
    pub fn drain(&self) -> Vec<ReplicationMessage> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    fn extend(&self, messages: impl IntoIterator<Item = ReplicationMessage>) {
        self.0.borrow_mut().extend(messages);
    }
}

/// Observer that emits only what changed between ticks
#[derive(Debug, Default)]
pub struct Replicator {
    known: AHashMap<ObjectId, ObjectSnapshot>,
    outbox: Outbox,
}

impl Replicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the message queue; keep it before handing the replicator
    /// to an environment
    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    /// Diff `snapshot` against the last one seen
    ///
    /// Upserts follow snapshot order; removals follow id order.
    pub fn diff(&mut self, snapshot: EnvironmentSnapshot) -> Vec<ReplicationMessage> {
        let tick = snapshot.tick;
        let mut messages = Vec::new();
        let mut current = AHashMap::with_capacity(snapshot.objects.len());

        for object in snapshot.objects {
            if self.known.get(&object.id) != Some(&object) {
                messages.push(ReplicationMessage::Upsert { tick, object: object.clone() });
            }
            current.insert(object.id, object);
        }

        let mut gone: Vec<ObjectId> =
            self.known.keys().filter(|id| !current.contains_key(*id)).copied().collect();
        gone.sort_unstable();
        messages.extend(gone.into_iter().map(|id| ReplicationMessage::Remove { tick, id }));

        self.known = current;
        messages
    }
}

impl Observer for Replicator {
    fn notify(&mut self, environment: &Environment) {
        let messages = self.diff(EnvironmentSnapshot::capture(environment));
        tracing::trace!(tick = environment.tick(), messages = messages.len(), "replicated");
        self.outbox.extend(messages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedStepClock;
    use crate::entity::GameObject;
    use crate::spatial::Vector;

    #[test]
    fn test_only_changes_are_sent() {
        let mut environment = Environment::new(FixedStepClock::new(0.1));
        let rock = environment.add_object(GameObject::new());
        let mover = environment.add_object(GameObject::new().with_vector(Vector::new(1.0, 0.0)));
        let replicator = Replicator::new();
        let outbox = replicator.outbox();
        environment.add_observer(replicator);

        environment.interact();
        let first = outbox.drain();
        assert_eq!(first.len(), 2);
        assert!(outbox.is_empty());

        environment.interact();
        let second = outbox.drain();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id(), mover);

        environment.remove_object(rock);
        environment.interact();
        let third = outbox.drain();
        assert!(third
            .iter()
            .any(|m| matches!(m, ReplicationMessage::Remove { id, tick: 3 } if *id == rock)));
    }

    #[test]
    fn test_message_json_is_tagged() {
        let message = ReplicationMessage::Remove { tick: 4, id: ObjectId::new() };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"type\":\"remove\""));
        let decoded: ReplicationMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, message);
    }
}

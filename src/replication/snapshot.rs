//! Serializable views of an environment

use crate::core::error::Result;
use crate::core::types::{Location, ObjectId, Tick};
use crate::entity::{Color, Entity, EntityKind};
use crate::environment::Environment;
use serde::{Deserialize, Serialize};

/// Replicated state of one object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub kind: EntityKind,
    pub name: Option<String>,
    pub location: Location,
    pub speed: f64,
    /// Degrees, `[0, 360)`
    pub pitch: f64,
    pub color: Color,
    pub size: f64,
    /// Sorted so equal tag sets compare equal
    pub tags: Vec<String>,
}

impl ObjectSnapshot {
    pub fn capture(entity: &Entity) -> Self {
        let object = entity.object();
        let mut tags: Vec<String> = object.tags().map(str::to_owned).collect();
        tags.sort_unstable();
        Self {
            id: object.id(),
            kind: entity.kind(),
            name: object.name.clone(),
            location: object.location,
            speed: object.vector.speed(),
            pitch: object.vector.pitch(),
            color: object.color,
            size: object.size(),
            tags,
        }
    }
}

/// Every object in an environment after a given tick, in environment order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentSnapshot {
    pub tick: Tick,
    pub objects: Vec<ObjectSnapshot>,
}

impl EnvironmentSnapshot {
    pub fn capture(environment: &Environment) -> Self {
        Self {
            tick: environment.tick(),
            objects: environment.objects().iter().map(ObjectSnapshot::capture).collect(),
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectSnapshot> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

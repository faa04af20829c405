//! GameObject - the positioned, colored, tagged thing every entity is built on

use crate::core::error::MoveError;
use crate::core::types::{Location, ObjectId};
use crate::entity::color::Color;
use crate::spatial::Vector;
use ahash::AHashSet;
use std::time::{Duration, Instant};

/// A moving object in an environment
///
/// Identity is assigned at construction; `copy` produces an independent
/// object with a fresh identity.
#[derive(Debug)]
pub struct GameObject {
    id: ObjectId,
    pub name: Option<String>,
    pub location: Location,
    pub vector: Vector,
    pub color: Color,
    size: f64,
    tags: AHashSet<String>,
    born: Instant,
}

impl GameObject {
    pub fn new() -> Self {
        Self {
            id: ObjectId::new(),
            name: None,
            location: Location::default(),
            vector: Vector::zero(),
            color: Color::default(),
            size: 1.0,
            tags: AHashSet::new(),
            born: Instant::now(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_vector(mut self, vector: Vector) -> Self {
        self.vector = vector;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.set_size(size);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// Negative sizes clamp to zero
    pub fn set_size(&mut self, size: f64) {
        self.size = if size > 0.0 { size } else { 0.0 };
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns false if the tag was already present
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        self.tags.remove(tag)
    }

    /// Seconds since birth
    pub fn age(&self) -> f64 {
        self.born.elapsed().as_secs_f64()
    }

    /// Move the birth instant so that `age` reads `seconds` now
    pub fn set_age(&mut self, seconds: f64) {
        let now = Instant::now();
        // Ages older than the monotonic clock allows fall back to `now`
        self.born = if seconds > 0.0 {
            Duration::try_from_secs_f64(seconds)
                .ok()
                .and_then(|age| now.checked_sub(age))
                .unwrap_or(now)
        } else {
            now
        };
    }

    /// Advance the location by `vector * elapsed`
    ///
    /// A non-finite result leaves the location untouched and is reported as
    /// an error; the environment quarantines the object.
    pub fn advance(&mut self, elapsed: f64) -> Result<(), MoveError> {
        if !elapsed.is_finite() {
            return Err(MoveError::NonFiniteElapsed(elapsed));
        }
        let next = Location::new(
            self.location.x + self.vector.x() * elapsed,
            self.location.y + self.vector.y() * elapsed,
        );
        if !next.is_finite() {
            return Err(MoveError::NonFiniteLocation(next));
        }
        self.location = next;
        Ok(())
    }

    /// Independent duplicate with a fresh identity, named "Copy of X"
    pub fn copy(&self) -> Self {
        let mut copy = self.duplicate();
        copy.name = self.name.as_ref().map(|name| format!("Copy of {}", name));
        copy
    }

    /// Newborn with this object's traits and a color mixed with `mate`'s
    pub fn offspring(&self, mate: &GameObject) -> Self {
        Self {
            color: self.color + mate.color,
            born: Instant::now(),
            ..self.duplicate()
        }
    }

    /// Duplicate with a fresh identity, keeping the name
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: ObjectId::new(),
            name: self.name.clone(),
            location: self.location,
            vector: self.vector,
            color: self.color,
            size: self.size,
            tags: self.tags.clone(),
            born: self.born,
        }
    }
}

impl Default for GameObject {
    fn default() -> Self {
        Self::new()
    }
}

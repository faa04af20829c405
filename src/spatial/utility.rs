//! Angle, distance and collision helpers
//!
//! All functions are pure. Angles are in degrees unless the name says otherwise.

use crate::core::types::Location;
use crate::entity::GameObject;
use std::f64::consts::PI;

/// Wrap an angle into `[0, 360)`. Non-finite input maps to 0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-20 % 360 + 360 rounds up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Bearing from `origin` to `target`
pub fn angle_between(origin: Location, target: Location) -> f64 {
    normalize_degrees(to_degrees((target.y - origin.y).atan2(target.x - origin.x)))
}

pub fn distance_between(a: Location, b: Location) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Clamp the magnitude of `value` to `max_abs`, keeping its sign
pub fn constrain(value: f64, max_abs: f64) -> f64 {
    let limit = max_abs.abs();
    value.clamp(-limit, limit)
}

/// Mirror `incident` about `normal`
pub fn reflection_angle(normal: f64, incident: f64) -> f64 {
    normalize_degrees(normal + (normal - incident))
}

/// Radius of the disc whose area is `size`
pub fn radius_of(size: f64) -> f64 {
    (size.max(0.0) / PI).sqrt()
}

/// Whether the discs of two objects overlap. Touching discs do not collide.
pub fn collided(a: &GameObject, b: &GameObject) -> bool {
    distance_between(a.location, b.location) < radius_of(a.size()) + radius_of(b.size())
}

//! Speed/heading vector

use crate::spatial::utility::{normalize_degrees, to_degrees, to_radians};
use std::ops::{Add, AddAssign, Mul};

/// A 2D vector stored as speed and pitch
///
/// Pitch is kept in radians in `[0, 2π)` and exposed in degrees `[0, 360)`.
/// Speed is never negative: a negative magnitude is stored as its absolute
/// value pointing the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    speed: f64,
    pitch: f64,
}

impl Vector {
    /// `pitch` in degrees
    pub fn new(speed: f64, pitch: f64) -> Self {
        let mut vector = Self::default();
        vector.set_pitch(pitch);
        vector.set_speed(speed);
        vector
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Convert Cartesian components. A zero-length result has pitch 0.
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        let speed = x.hypot(y);
        let pitch = if speed == 0.0 { 0.0 } else { to_degrees(y.atan2(x)) };
        Self::new(speed, pitch)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) {
        if speed < 0.0 {
            self.speed = -speed;
            self.set_pitch(self.pitch() + 180.0);
        } else {
            self.speed = speed;
        }
    }

    /// Heading in degrees, `[0, 360)`
    pub fn pitch(&self) -> f64 {
        normalize_degrees(to_degrees(self.pitch))
    }

    pub fn set_pitch(&mut self, degrees: f64) {
        self.pitch = to_radians(normalize_degrees(degrees));
    }

    pub fn x(&self) -> f64 {
        self.speed * self.pitch.cos()
    }

    pub fn y(&self) -> f64 {
        self.speed * self.pitch.sin()
    }

    /// Replace the x component, holding y fixed
    pub fn set_x(&mut self, x: f64) {
        *self = Self::from_cartesian(x, self.y());
    }

    /// Replace the y component, holding x fixed
    pub fn set_y(&mut self, y: f64) {
        *self = Self::from_cartesian(self.x(), y);
    }

    pub fn is_finite(&self) -> bool {
        self.speed.is_finite() && self.pitch.is_finite()
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_cartesian(self.x() + rhs.x(), self.y() + rhs.y())
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.speed * rhs, self.pitch())
    }
}

//! 2D vector math: speed/heading vectors and the geometry helpers built on them

pub mod utility;
pub mod vector;

pub use utility::{
    angle_between, collided, constrain, distance_between, normalize_degrees, reflection_angle,
    to_degrees, to_radians,
};
pub use vector::Vector;

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, FixedStepClock, SystemClock};
pub use types::{Location, ObjectId, Tick};

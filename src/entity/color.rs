//! RGB color with clamped channels

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Add;

/// Red, green and blue, each in `[0, 1]`
///
/// Ordered by brightness (channel sum), ties broken channel by channel.
/// Adding two colors averages them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawColor")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

/// Wire form; decoding goes through `Color::new` so channels are clamped
#[derive(Deserialize)]
struct RawColor {
    red: f64,
    green: f64,
    blue: f64,
}

impl From<RawColor> for Color {
    fn from(raw: RawColor) -> Self {
        Color::new(raw.red, raw.green, raw.blue)
    }
}

fn clamp_channel(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl Color {
    pub const BLACK: Color = Color { red: 0.0, green: 0.0, blue: 0.0 };
    pub const WHITE: Color = Color { red: 1.0, green: 1.0, blue: 1.0 };
    pub const RED: Color = Color { red: 1.0, green: 0.0, blue: 0.0 };
    pub const GREEN: Color = Color { red: 0.0, green: 1.0, blue: 0.0 };
    pub const BLUE: Color = Color { red: 0.0, green: 0.0, blue: 1.0 };

    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: clamp_channel(red),
            green: clamp_channel(green),
            blue: clamp_channel(blue),
        }
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    pub fn set_red(&mut self, value: f64) {
        self.red = clamp_channel(value);
    }

    pub fn set_green(&mut self, value: f64) {
        self.green = clamp_channel(value);
    }

    pub fn set_blue(&mut self, value: f64) {
        self.blue = clamp_channel(value);
    }

    pub fn brightness(&self) -> f64 {
        self.red + self.green + self.blue
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    fn sort_key(&self) -> [OrderedFloat<f64>; 4] {
        [
            OrderedFloat(self.brightness()),
            OrderedFloat(self.red),
            OrderedFloat(self.green),
            OrderedFloat(self.blue),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

// Channels are never NaN, so equality is total
impl Eq for Color {}

impl Ord for Color {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Color {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            (self.red + rhs.red) / 2.0,
            (self.green + rhs.green) / 2.0,
            (self.blue + rhs.blue) / 2.0,
        )
    }
}

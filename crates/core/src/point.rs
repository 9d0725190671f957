//! A single drifting point and its edge reflection rule.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::config::FieldConfig;
use crate::prng::RandomSource;

/// Which velocity components flipped during one [`Point::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reflection {
    pub x: bool,
    pub y: bool,
}

/// One member of the field: position, velocity, radius and a fixed color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: u32,
    color: Rgb,
}

impl Point {
    pub fn new(position: DVec2, velocity: DVec2, radius: u32, color: Rgb) -> Self {
        Self {
            position,
            velocity,
            radius,
            color,
        }
    }

    /// Draws a point uniformly inside `[0, width) x [0, height)` using the
    /// ranges in `config`.
    pub fn random(rng: &mut impl RandomSource, width: f64, height: f64, config: &FieldConfig) -> Self {
        let position = DVec2::new(rng.next_range(0.0, width), rng.next_range(0.0, height));
        let speed = config.max_speed;
        let velocity = DVec2::new(
            rng.next_range(-speed, speed),
            rng.next_range(-speed, speed),
        );
        let radius = rng.next_int_inclusive(config.min_radius, config.max_radius);
        let mut channel = || rng.next_int_inclusive(0, config.max_channel) as u8;
        let color = Rgb::new(channel(), channel(), channel());
        Self::new(position, velocity, radius, color)
    }

    /// The point's color. It never changes after construction.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Moves by one velocity step, then negates each velocity component whose
    /// coordinate now lies outside `[0, width]` / `[0, height]`.
    ///
    /// The test runs after the move, so a point may sit one step past an edge
    /// for a frame before heading back.
    pub fn advance(&mut self, width: f64, height: f64) -> Reflection {
        self.position += self.velocity;
        let reflection = Reflection {
            x: !(0.0..=width).contains(&self.position.x),
            y: !(0.0..=height).contains(&self.position.y),
        };
        if reflection.x {
            self.velocity.x = -self.velocity.x;
        }
        if reflection.y {
            self.velocity.y = -self.velocity.y;
        }
        reflection
    }

    /// Squared distance to another position.
    pub fn distance_sq(&self, other: DVec2) -> f64 {
        self.position.distance_squared(other)
    }
}

/// `true` when two positions are within `max_distance` of each other.
///
/// Compares squared distances so the boundary (`distance == max_distance`)
/// connects without a square root.
pub fn within(a: DVec2, b: DVec2, max_distance: f64) -> bool {
    a.distance_squared(b) <= max_distance * max_distance
}

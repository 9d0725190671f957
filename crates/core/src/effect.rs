//! The `Effect` trait that hosts use to drive an animation frame by frame.
//!
//! The trait is object-safe so a host loop can hold a `Box<dyn Effect>` and
//! stay ignorant of the concrete effect and its random source.

use std::ops::AddAssign;

use glam::DVec2;
use serde::Serialize;
use serde_json::Value;

use crate::error::FieldError;
use crate::surface::Surface;

/// What one draw pass put on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Points drawn.
    pub points: usize,
    /// Points drawn at sparkle opacity.
    pub sparkles: usize,
    /// Point-to-point lines drawn.
    pub links: usize,
    /// Point-to-pointer lines drawn.
    pub pointer_links: usize,
}

impl AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.points += rhs.points;
        self.sparkles += rhs.sparkles;
        self.links += rhs.links;
        self.pointer_links += rhs.pointer_links;
    }
}

/// A frame-driven animation.
pub trait Effect {
    /// Draws the initial state once, before the first frame.
    fn draw_initial(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, FieldError>;

    /// Advances the animation by one frame and redraws it onto `surface`.
    fn frame(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, FieldError>;

    /// Current viewport size as `(width, height)`.
    fn dimensions(&self) -> (f64, f64);

    /// Reinitializes the effect for a new viewport size.
    fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError>;

    /// Updates (or removes) the pointer position.
    fn set_pointer(&mut self, pointer: Option<DVec2>);

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters.
    fn param_schema(&self) -> Value;
}

/// Draws the initial state, then runs `frames` frames, returning the totals
/// across every pass (the initial draw included).
pub fn run(
    effect: &mut dyn Effect,
    surface: &mut dyn Surface,
    frames: usize,
) -> Result<FrameStats, FieldError> {
    let mut total = effect.draw_initial(surface)?;
    for _ in 0..frames {
        total += effect.frame(surface)?;
    }
    Ok(total)
}

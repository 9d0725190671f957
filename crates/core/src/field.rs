//! The point field animator.
//!
//! A [`PointField`] owns a fixed set of drifting [`Point`]s, an optional
//! pointer position, its [`FieldConfig`] and the random source that decides
//! placement and the per-draw sparkle. Each [`frame`](PointField::frame)
//! clears the surface, moves and redraws every point, then strokes gradient
//! lines between every pair of nearby points and from nearby points to the
//! pointer.

use glam::DVec2;
use serde_json::Value;

use crate::config::FieldConfig;
use crate::effect::{Effect, FrameStats};
use crate::error::FieldError;
use crate::point::{within, Point};
use crate::prng::{RandomSource, Xorshift64};
use crate::surface::{ColorStop, GradientLine, Surface};

/// Upper bound on the number of points a field may hold.
pub const MAX_POINTS: usize = 1_000_000;

/// Number of points for a `width x height` viewport: `floor(width * height * density)`.
pub fn point_count(width: f64, height: f64, density: f64) -> usize {
    (width * height * density).floor() as usize
}

/// [`point_count`], rejecting counts above [`MAX_POINTS`].
fn checked_point_count(width: f64, height: f64, density: f64) -> Result<usize, FieldError> {
    let raw = (width * height * density).floor();
    if !raw.is_finite() || raw > MAX_POINTS as f64 {
        return Err(FieldError::invalid_param(
            "density",
            format!("{width}x{height} at density {density} exceeds {MAX_POINTS} points"),
        ));
    }
    Ok(point_count(width, height, density))
}

/// Animated field of points joined by proximity lines.
#[derive(Debug, Clone)]
pub struct PointField<R = Xorshift64> {
    width: f64,
    height: f64,
    points: Vec<Point>,
    pointer: Option<DVec2>,
    config: FieldConfig,
    rng: R,
}

impl PointField<Xorshift64> {
    /// Creates a field seeded with a [`Xorshift64`].
    pub fn with_seed(
        width: f64,
        height: f64,
        config: FieldConfig,
        seed: u64,
    ) -> Result<Self, FieldError> {
        Self::new(width, height, config, Xorshift64::new(seed))
    }

    /// Creates a field from a JSON params object (see [`FieldConfig::from_json`]).
    pub fn from_json(
        width: f64,
        height: f64,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FieldError> {
        Self::with_seed(width, height, FieldConfig::from_json(params)?, seed)
    }
}

impl<R: RandomSource> PointField<R> {
    /// Creates a field of `point_count(width, height, config.density)` random
    /// points.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero,
    /// negative or non-finite, and `FieldError::InvalidParam` if the viewport
    /// would hold more than [`MAX_POINTS`] points.
    pub fn new(width: f64, height: f64, config: FieldConfig, rng: R) -> Result<Self, FieldError> {
        config.validate()?;
        let mut field = Self {
            width: 0.0,
            height: 0.0,
            points: Vec::new(),
            pointer: None,
            config,
            rng,
        };
        field.populate(width, height)?;
        Ok(field)
    }

    /// Creates a field from explicit points, keeping the given dimensions.
    ///
    /// No points are generated; `rng` only drives sparkle rolls.
    pub fn from_points(
        width: f64,
        height: f64,
        points: Vec<Point>,
        config: FieldConfig,
        rng: R,
    ) -> Result<Self, FieldError> {
        check_dimensions(width, height)?;
        config.validate()?;
        Ok(Self {
            width,
            height,
            points,
            pointer: None,
            config,
            rng,
        })
    }

    fn populate(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        check_dimensions(width, height)?;
        let count = checked_point_count(width, height, self.config.density)?;
        let config = &self.config;
        let rng = &mut self.rng;
        self.points = (0..count)
            .map(|_| Point::random(rng, width, height, config))
            .collect();
        self.width = width;
        self.height = height;
        log::debug!("point field {width}x{height}: {count} points");
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    /// Sets the pointer used for point-to-pointer lines.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some(DVec2::new(x, y));
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    /// Discards every point and regenerates the field for a new viewport.
    ///
    /// The point count is recomputed from the new area. The pointer is kept.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        self.populate(width, height)
    }

    /// Draws every point once without moving it.
    pub fn draw_initial(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, FieldError> {
        let mut stats = FrameStats::default();
        for i in 0..self.points.len() {
            self.draw_point(i, surface, &mut stats)?;
        }
        Ok(stats)
    }

    /// Runs one animation frame: clear, move and draw points, then draw lines.
    pub fn frame(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, FieldError> {
        surface.clear(self.width, self.height)?;

        let mut stats = FrameStats::default();
        for i in 0..self.points.len() {
            self.points[i].advance(self.width, self.height);
            self.draw_point(i, surface, &mut stats)?;
        }

        stats.links = self.draw_links(surface)?;
        if let Some(pointer) = self.pointer {
            stats.pointer_links = self.draw_pointer_links(pointer, surface)?;
        }
        Ok(stats)
    }

    /// Fills point `i`, rolling the sparkle once for this draw.
    fn draw_point(
        &mut self,
        i: usize,
        surface: &mut dyn Surface,
        stats: &mut FrameStats,
    ) -> Result<(), FieldError> {
        let sparkle = self.rng.chance(self.config.sparkle_chance);
        let alpha = if sparkle {
            stats.sparkles += 1;
            self.config.sparkle_alpha
        } else {
            self.config.point_alpha
        };
        let p = &self.points[i];
        surface.fill_circle(p.position, f64::from(p.radius), p.color(), alpha)?;
        stats.points += 1;
        Ok(())
    }

    fn draw_links(&self, surface: &mut dyn Surface) -> Result<usize, FieldError> {
        let mut drawn = 0;
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                if within(a.position, b.position, self.config.link_distance) {
                    surface.stroke_line(&GradientLine {
                        from: a.position,
                        to: b.position,
                        stops: vec![
                            ColorStop::new(0.0, a.color()),
                            ColorStop::new(1.0, b.color()),
                        ],
                        alpha: self.config.link_alpha,
                        width: self.config.line_width,
                    })?;
                    drawn += 1;
                }
            }
        }
        Ok(drawn)
    }

    fn draw_pointer_links(
        &self,
        pointer: DVec2,
        surface: &mut dyn Surface,
    ) -> Result<usize, FieldError> {
        let mut drawn = 0;
        for p in &self.points {
            if within(p.position, pointer, self.config.pointer_distance) {
                surface.stroke_line(&GradientLine {
                    from: p.position,
                    to: pointer,
                    stops: vec![
                        ColorStop::new(0.0, p.color()),
                        ColorStop::new(self.config.accent_stop, self.config.accent),
                    ],
                    alpha: self.config.pointer_alpha,
                    width: self.config.line_width,
                })?;
                drawn += 1;
            }
        }
        Ok(drawn)
    }
}

fn check_dimensions(width: f64, height: f64) -> Result<(), FieldError> {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(FieldError::InvalidDimensions);
    }
    Ok(())
}

impl<R: RandomSource> Effect for PointField<R> {
    fn draw_initial(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, FieldError> {
        PointField::draw_initial(self, surface)
    }

    fn frame(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, FieldError> {
        PointField::frame(self, surface)
    }

    fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        PointField::resize(self, width, height)
    }

    fn set_pointer(&mut self, pointer: Option<DVec2>) {
        self.pointer = pointer;
    }

    fn params(&self) -> Value {
        self.config.to_json()
    }

    fn param_schema(&self) -> Value {
        FieldConfig::param_schema()
    }
}

#![deny(unsafe_code)]
//! Software rendering of the point field.
//!
//! [`Raster`] implements [`Surface`] over an RGBA8 buffer so the field can be
//! rendered without a browser: the CLI uses it for PNG snapshots, tests use
//! it to check what actually lands on pixels. Circles are filled by
//! pixel-center coverage; lines are sampled at sub-pixel steps with their
//! gradient color and an alpha scaled by stroke width.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use glam::DVec2;
use point_field_core::{FieldError, GradientLine, Rgb, Surface};

/// Distance between consecutive samples along a stroked line, in pixels.
const LINE_STEP: f64 = 0.5;

/// An RGBA8 pixel buffer with an opaque background color.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a raster filled with `background`.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero or
    /// the buffer size overflows.
    pub fn new(width: usize, height: usize, background: Rgb) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        let mut pixels = vec![0u8; len];
        pixel::fill(&mut pixels, background);
        Ok(Self {
            width,
            height,
            background,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes, `width * height * 4` long.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Index of the pixel containing `pos`, if it lies inside the raster.
    fn index_of(&self, pos: DVec2) -> Option<usize> {
        if pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let (x, y) = (pos.x.floor() as usize, pos.y.floor() as usize);
        (x < self.width && y < self.height).then(|| (y * self.width + x) * 4)
    }
}

impl Surface for Raster {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        let w = (width.max(0.0).ceil() as usize).min(self.width);
        let h = (height.max(0.0).ceil() as usize).min(self.height);
        for row in self.pixels.chunks_exact_mut(self.width * 4).take(h) {
            pixel::fill(&mut row[..w * 4], self.background);
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Rgb,
        alpha: f64,
    ) -> Result<(), FieldError> {
        if radius <= 0.0 {
            return Ok(());
        }
        let r_sq = radius * radius;
        let x0 = (center.x - radius).floor().max(0.0) as usize;
        let y0 = (center.y - radius).floor().max(0.0) as usize;
        let x1 = ((center.x + radius).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((center.y + radius).ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                if pixel_center.distance_squared(center) <= r_sq {
                    let i = (y * self.width + x) * 4;
                    pixel::blend(&mut self.pixels[i..i + 4], color, alpha);
                }
            }
        }
        Ok(())
    }

    fn stroke_line(&mut self, line: &GradientLine) -> Result<(), FieldError> {
        let alpha = line.alpha * line.width.min(1.0);
        let steps = (line.length() / LINE_STEP).ceil().max(1.0) as usize;
        let mut last = None;
        for k in 0..=steps {
            let t = k as f64 / steps as f64;
            let Some(i) = self.index_of(line.from.lerp(line.to, t)) else {
                continue;
            };
            if last == Some(i) {
                continue;
            }
            last = Some(i);
            pixel::blend(&mut self.pixels[i..i + 4], line.color_at(t), alpha);
        }
        Ok(())
    }
}

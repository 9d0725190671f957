//! The drawing target abstraction.
//!
//! A [`Surface`] exposes the handful of 2D primitives the field needs:
//! clearing, filled circles and gradient-stroked segments. The browser host
//! implements it over a canvas context, the raster crate over an RGBA
//! buffer, and [`Recorder`] captures the calls for tests and statistics.

use glam::DVec2;

use crate::color::Rgb;
use crate::error::FieldError;

/// One color stop of a linear gradient, `offset` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(offset: f64, color: Rgb) -> Self {
        Self { offset, color }
    }
}

/// A line segment stroked with a linear gradient running from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientLine {
    pub from: DVec2,
    pub to: DVec2,
    /// Stops in ascending offset order.
    pub stops: Vec<ColorStop>,
    pub alpha: f64,
    pub width: f64,
}

impl GradientLine {
    /// Color at parameter `t` along the segment (0 at `from`, 1 at `to`).
    ///
    /// Before the first stop the first color holds, after the last stop the
    /// last color holds, in between neighbouring stops are interpolated.
    /// A line with no stops samples as black.
    pub fn color_at(&self, t: f64) -> Rgb {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Rgb::BLACK,
        };
        if t <= first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }
        self.stops
            .windows(2)
            .find(|pair| t <= pair[1].offset)
            .map(|pair| {
                let span = pair[1].offset - pair[0].offset;
                if span <= 0.0 {
                    pair[1].color
                } else {
                    pair[0].color.lerp(pair[1].color, (t - pair[0].offset) / span)
                }
            })
            .unwrap_or(last.color)
    }

    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// A 2D drawing target.
///
/// Every primitive is independent: implementations must not let state such
/// as alpha or stroke style leak from one call into the next.
pub trait Surface {
    /// Clears the rectangle `(0, 0)..(width, height)`.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), FieldError>;

    /// Fills a circle with a solid color at the given opacity.
    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Rgb,
        alpha: f64,
    ) -> Result<(), FieldError>;

    /// Strokes a gradient line.
    fn stroke_line(&mut self, line: &GradientLine) -> Result<(), FieldError>;
}

/// A primitive captured by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: DVec2,
        radius: f64,
        color: Rgb,
        alpha: f64,
    },
    Line(GradientLine),
}

/// A surface that remembers every call.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drops everything recorded so far.
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = (DVec2, f64, Rgb, f64)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Circle {
                center,
                radius,
                color,
                alpha,
            } => Some((*center, *radius, *color, *alpha)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &GradientLine> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Rgb,
        alpha: f64,
    ) -> Result<(), FieldError> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
        Ok(())
    }

    fn stroke_line(&mut self, line: &GradientLine) -> Result<(), FieldError> {
        self.commands.push(DrawCommand::Line(line.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(stops: Vec<ColorStop>) -> GradientLine {
        GradientLine {
            from: DVec2::ZERO,
            to: DVec2::new(10.0, 0.0),
            stops,
            alpha: 1.0,
            width: 0.5,
        }
    }

    #[test]
    fn two_stop_gradient_interpolates() {
        let l = line(vec![
            ColorStop::new(0.0, Rgb::new(0, 0, 0)),
            ColorStop::new(1.0, Rgb::new(200, 100, 50)),
        ]);
        assert_eq!(l.color_at(0.0), Rgb::new(0, 0, 0));
        assert_eq!(l.color_at(0.5), Rgb::new(100, 50, 25));
        assert_eq!(l.color_at(1.0), Rgb::new(200, 100, 50));
    }

    #[test]
    fn color_past_last_stop_is_clamped() {
        let accent = Rgb::new(1, 158, 229);
        let l = line(vec![
            ColorStop::new(0.0, Rgb::new(255, 255, 255)),
            ColorStop::new(0.8, accent),
        ]);
        assert_eq!(l.color_at(0.8), accent);
        assert_eq!(l.color_at(0.95), accent);
        assert_eq!(l.color_at(1.0), accent);
    }

    #[test]
    fn color_before_first_stop_is_clamped() {
        let l = line(vec![
            ColorStop::new(0.3, Rgb::new(9, 9, 9)),
            ColorStop::new(1.0, Rgb::new(0, 0, 0)),
        ]);
        assert_eq!(l.color_at(0.1), Rgb::new(9, 9, 9));
    }

    #[test]
    fn empty_gradient_samples_black() {
        assert_eq!(line(Vec::new()).color_at(0.5), Rgb::BLACK);
    }

    #[test]
    fn recorder_keeps_call_order() {
        let mut r = Recorder::new();
        r.clear(10.0, 10.0).unwrap();
        r.fill_circle(DVec2::ONE, 2.0, Rgb::BLACK, 0.47).unwrap();
        r.stroke_line(&line(Vec::new())).unwrap();
        assert_eq!(r.commands().len(), 3);
        assert!(matches!(r.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(r.circles().count(), 1);
        assert_eq!(r.lines().count(), 1);
        r.reset();
        assert!(r.commands().is_empty());
    }

    #[test]
    fn surface_is_object_safe() {
        let mut r = Recorder::new();
        let s: &mut dyn Surface = &mut r;
        s.clear(1.0, 1.0).unwrap();
        assert_eq!(r.commands().len(), 1);
    }
}

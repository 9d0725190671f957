//! [`Surface`] over a browser `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use glam::DVec2;
use point_field_core::{FieldError, GradientLine, Rgb, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Runs `draw` between `save()` and `restore()` so alpha and styles never
    /// leak into the next primitive, even when `draw` fails.
    fn isolated(
        &self,
        draw: impl FnOnce(&CanvasRenderingContext2d) -> Result<(), JsValue>,
    ) -> Result<(), FieldError> {
        self.ctx.save();
        let result = draw(&self.ctx);
        self.ctx.restore();
        result.map_err(surface_error)
    }
}

fn surface_error(e: JsValue) -> FieldError {
    FieldError::Surface(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) -> Result<(), FieldError> {
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Rgb,
        alpha: f64,
    ) -> Result<(), FieldError> {
        self.isolated(|ctx| {
            ctx.set_global_alpha(alpha);
            ctx.set_fill_style_str(&color.to_css());
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
            ctx.close_path();
            ctx.fill();
            Ok(())
        })
    }

    fn stroke_line(&mut self, line: &GradientLine) -> Result<(), FieldError> {
        self.isolated(|ctx| {
            let gradient = ctx.create_linear_gradient(line.from.x, line.from.y, line.to.x, line.to.y);
            for stop in &line.stops {
                gradient.add_color_stop(stop.offset as f32, &stop.color.to_css())?;
            }
            ctx.set_global_alpha(line.alpha);
            ctx.set_stroke_style_canvas_gradient(&gradient);
            ctx.set_line_width(line.width);
            ctx.begin_path();
            ctx.move_to(line.from.x, line.from.y);
            ctx.line_to(line.to.x, line.to.y);
            ctx.stroke();
            Ok(())
        })
    }
}

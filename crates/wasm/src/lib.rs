#![deny(unsafe_code)]
//! WASM bindings for the point field.
//!
//! `start(canvas_id, params)` sizes the canvas to the window, builds the
//! field, draws it once and hands it to the browser's animation-frame loop
//! (or a ~2 Hz timer where no native callback exists).

mod canvas;
mod host;

use std::cell::RefCell;
use std::rc::Rc;

use point_field_core::{FieldConfig, FieldError, FrameScheduler, PointField};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::canvas::CanvasSurface;
use crate::host::Host;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Starts the point field on the canvas with id `canvas_id`.
///
/// `params` is a JSON object of field parameters (empty string means
/// defaults) plus an optional integer `seed`.
#[wasm_bindgen]
pub fn start(canvas_id: &str, params: &str) -> Result<(), JsValue> {
    let params = parse_params(params).map_err(to_js)?;
    let config = FieldConfig::from_json(&params).map_err(to_js)?;
    let seed = seed_from(&params, || (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{canvas_id}")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{canvas_id} is not a canvas")))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| JsValue::from_str("unexpected 2d context type"))?;

    let (width, height) = host::viewport(&window)?;
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);

    let track_pointer = config.track_pointer;
    let resize = config.resize;
    let mut field = PointField::with_seed(width, height, config, seed).map_err(to_js)?;
    let mut surface = CanvasSurface::new(ctx);
    field.draw_initial(&mut surface).map_err(to_js)?;
    log::info!(
        "point field started: {}x{}, {} points, seed {seed}",
        width,
        height,
        field.points().len()
    );

    let host = Rc::new(RefCell::new(Host {
        field,
        surface,
        canvas,
    }));
    if track_pointer {
        host::listen_pointer(&window, host.clone())?;
    }
    host::listen_resize(&window, host.clone(), resize)?;

    let scheduler = FrameScheduler::detect(host::has_animation_frame(&window));
    host::start_loop(window, host, scheduler)
}

/// Parses the params argument; blank input means "all defaults".
fn parse_params(text: &str) -> Result<Value, FieldError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    let value: Value = serde_json::from_str(text)
        .map_err(|e| FieldError::invalid_param("params", e.to_string()))?;
    if !value.is_object() {
        return Err(FieldError::invalid_param("params", "expected a JSON object"));
    }
    Ok(value)
}

/// `params.seed` when present, otherwise whatever `fallback` produces.
fn seed_from(params: &Value, fallback: impl FnOnce() -> u64) -> u64 {
    params
        .get("seed")
        .and_then(Value::as_u64)
        .unwrap_or_else(fallback)
}

fn to_js(e: FieldError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_params_mean_defaults() {
        assert_eq!(parse_params("").unwrap(), json!({}));
        assert_eq!(parse_params("   ").unwrap(), json!({}));
    }

    #[test]
    fn params_must_be_an_object() {
        assert!(parse_params("[1, 2]").is_err());
        assert!(parse_params("{broken").is_err());
    }

    #[test]
    fn params_parse_into_config() {
        let params = parse_params(r#"{"track_pointer": true, "resize": "rebuild"}"#).unwrap();
        let config = FieldConfig::from_json(&params).unwrap();
        assert!(config.track_pointer);
        assert_eq!(config.resize, point_field_core::ResizePolicy::Rebuild);
    }

    #[test]
    fn explicit_seed_wins_over_fallback() {
        assert_eq!(seed_from(&json!({"seed": 9}), || 1), 9);
        assert_eq!(seed_from(&json!({}), || 1), 1);
        assert_eq!(seed_from(&json!({"seed": "x"}), || 1), 1);
    }
}

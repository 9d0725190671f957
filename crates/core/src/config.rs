//! Tunable constants of the point field and their JSON representation.
//!
//! Parameters arrive as a loose JSON object (CLI `--params`, scene files, the
//! browser host's start call). Missing or mistyped keys fall back to their
//! defaults; present values that make no sense are rejected by
//! [`FieldConfig::validate`].

use crate::color::Rgb;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Points per square unit of viewport area.
pub const DEFAULT_DENSITY: f64 = 0.00028;
/// Velocity components are drawn from `[-DEFAULT_MAX_SPEED, DEFAULT_MAX_SPEED)`.
pub const DEFAULT_MAX_SPEED: f64 = 0.3;
pub const DEFAULT_MIN_RADIUS: u32 = 2;
pub const DEFAULT_MAX_RADIUS: u32 = 6;
/// Inclusive upper bound of each color channel.
pub const DEFAULT_MAX_CHANNEL: u32 = 253;
pub const DEFAULT_LINK_DISTANCE: f64 = 55.0;
pub const DEFAULT_POINTER_DISTANCE: f64 = 100.0;
pub const DEFAULT_POINT_ALPHA: f64 = 0.47;
pub const DEFAULT_SPARKLE_ALPHA: f64 = 0.9;
pub const DEFAULT_SPARKLE_CHANCE: f64 = 0.009;
pub const DEFAULT_LINK_ALPHA: f64 = 0.9;
pub const DEFAULT_POINTER_ALPHA: f64 = 0.5;
pub const DEFAULT_LINE_WIDTH: f64 = 0.5;
pub const DEFAULT_ACCENT: Rgb = Rgb::new(0x01, 0x9e, 0xe5);
/// Gradient offset at which pointer lines reach the accent color.
pub const DEFAULT_ACCENT_STOP: f64 = 0.8;

/// What a host does when the viewport changes size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizePolicy {
    /// Throw everything away and reload the host page.
    #[default]
    Reload,
    /// Rebuild the field in place for the new viewport.
    Rebuild,
}

impl ResizePolicy {
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "reload" => Ok(ResizePolicy::Reload),
            "rebuild" => Ok(ResizePolicy::Rebuild),
            other => Err(FieldError::invalid_param(
                "resize",
                format!("expected 'reload' or 'rebuild', got '{other}'"),
            )),
        }
    }
}

/// Every constant that shapes the field's look and motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub density: f64,
    pub max_speed: f64,
    pub min_radius: u32,
    pub max_radius: u32,
    pub max_channel: u32,
    pub link_distance: f64,
    pub pointer_distance: f64,
    pub point_alpha: f64,
    pub sparkle_alpha: f64,
    pub sparkle_chance: f64,
    pub link_alpha: f64,
    pub pointer_alpha: f64,
    pub line_width: f64,
    pub accent: Rgb,
    pub accent_stop: f64,
    pub track_pointer: bool,
    pub resize: ResizePolicy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            max_speed: DEFAULT_MAX_SPEED,
            min_radius: DEFAULT_MIN_RADIUS,
            max_radius: DEFAULT_MAX_RADIUS,
            max_channel: DEFAULT_MAX_CHANNEL,
            link_distance: DEFAULT_LINK_DISTANCE,
            pointer_distance: DEFAULT_POINTER_DISTANCE,
            point_alpha: DEFAULT_POINT_ALPHA,
            sparkle_alpha: DEFAULT_SPARKLE_ALPHA,
            sparkle_chance: DEFAULT_SPARKLE_CHANCE,
            link_alpha: DEFAULT_LINK_ALPHA,
            pointer_alpha: DEFAULT_POINTER_ALPHA,
            line_width: DEFAULT_LINE_WIDTH,
            accent: DEFAULT_ACCENT,
            accent_stop: DEFAULT_ACCENT_STOP,
            track_pointer: false,
            resize: ResizePolicy::Reload,
        }
    }
}

impl FieldConfig {
    /// Builds a config from a JSON params object, then validates it.
    ///
    /// Keys that are missing or carry the wrong JSON type keep their
    /// defaults. `accent` and `resize` are strings that must parse.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let d = Self::default();
        let accent = match params.get("accent").and_then(Value::as_str) {
            Some(hex) => Rgb::from_hex(hex)?,
            None => d.accent,
        };
        let resize = match params.get("resize").and_then(Value::as_str) {
            Some(name) => ResizePolicy::from_name(name)?,
            None => d.resize,
        };
        let config = Self {
            density: param_f64(params, "density", d.density),
            max_speed: param_f64(params, "max_speed", d.max_speed),
            min_radius: param_u32(params, "min_radius", d.min_radius),
            max_radius: param_u32(params, "max_radius", d.max_radius),
            max_channel: param_u32(params, "max_channel", d.max_channel),
            link_distance: param_f64(params, "link_distance", d.link_distance),
            pointer_distance: param_f64(params, "pointer_distance", d.pointer_distance),
            point_alpha: param_f64(params, "point_alpha", d.point_alpha),
            sparkle_alpha: param_f64(params, "sparkle_alpha", d.sparkle_alpha),
            sparkle_chance: param_f64(params, "sparkle_chance", d.sparkle_chance),
            link_alpha: param_f64(params, "link_alpha", d.link_alpha),
            pointer_alpha: param_f64(params, "pointer_alpha", d.pointer_alpha),
            line_width: param_f64(params, "line_width", d.line_width),
            accent,
            accent_stop: param_f64(params, "accent_stop", d.accent_stop),
            track_pointer: param_bool(params, "track_pointer", d.track_pointer),
            resize,
        };
        config.validate()?;
        Ok(config)
    }

    /// Current values as a JSON object, in the shape `from_json` accepts.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| json!({}))
    }

    /// Rejects values that would break the field's invariants.
    pub fn validate(&self) -> Result<(), FieldError> {
        let finite = [
            ("density", self.density),
            ("max_speed", self.max_speed),
            ("link_distance", self.link_distance),
            ("pointer_distance", self.pointer_distance),
            ("line_width", self.line_width),
        ];
        for (name, value) in finite {
            if !value.is_finite() || value < 0.0 {
                return Err(FieldError::invalid_param(
                    name,
                    format!("must be a finite non-negative number, got {value}"),
                ));
            }
        }

        let unit = [
            ("point_alpha", self.point_alpha),
            ("sparkle_alpha", self.sparkle_alpha),
            ("sparkle_chance", self.sparkle_chance),
            ("link_alpha", self.link_alpha),
            ("pointer_alpha", self.pointer_alpha),
            ("accent_stop", self.accent_stop),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(FieldError::invalid_param(
                    name,
                    format!("must lie in [0, 1], got {value}"),
                ));
            }
        }

        if self.min_radius > self.max_radius {
            return Err(FieldError::invalid_param(
                "min_radius",
                format!(
                    "min_radius ({}) exceeds max_radius ({})",
                    self.min_radius, self.max_radius
                ),
            ));
        }
        if self.max_channel > 255 {
            return Err(FieldError::invalid_param(
                "max_channel",
                format!("must be at most 255, got {}", self.max_channel),
            ));
        }
        Ok(())
    }

    /// Schema describing every parameter: type, default, range, description.
    pub fn param_schema() -> Value {
        json!({
            "density": {
                "type": "number", "default": DEFAULT_DENSITY, "min": 0.0,
                "description": "Points per square unit of viewport area"
            },
            "max_speed": {
                "type": "number", "default": DEFAULT_MAX_SPEED, "min": 0.0,
                "description": "Velocity components are drawn from [-max_speed, max_speed)"
            },
            "min_radius": {
                "type": "integer", "default": DEFAULT_MIN_RADIUS,
                "description": "Smallest point radius (inclusive)"
            },
            "max_radius": {
                "type": "integer", "default": DEFAULT_MAX_RADIUS,
                "description": "Largest point radius (inclusive)"
            },
            "max_channel": {
                "type": "integer", "default": DEFAULT_MAX_CHANNEL, "min": 0, "max": 255,
                "description": "Inclusive upper bound of each color channel"
            },
            "link_distance": {
                "type": "number", "default": DEFAULT_LINK_DISTANCE, "min": 0.0,
                "description": "Points closer than this are joined by a line"
            },
            "pointer_distance": {
                "type": "number", "default": DEFAULT_POINTER_DISTANCE, "min": 0.0,
                "description": "Points closer than this to the pointer are joined to it"
            },
            "point_alpha": {
                "type": "number", "default": DEFAULT_POINT_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Opacity of a point on a normal draw"
            },
            "sparkle_alpha": {
                "type": "number", "default": DEFAULT_SPARKLE_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Opacity of a point on a sparkle draw"
            },
            "sparkle_chance": {
                "type": "number", "default": DEFAULT_SPARKLE_CHANCE, "min": 0.0, "max": 1.0,
                "description": "Probability that a single draw sparkles"
            },
            "link_alpha": {
                "type": "number", "default": DEFAULT_LINK_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Opacity of point-to-point lines"
            },
            "pointer_alpha": {
                "type": "number", "default": DEFAULT_POINTER_ALPHA, "min": 0.0, "max": 1.0,
                "description": "Opacity of point-to-pointer lines"
            },
            "line_width": {
                "type": "number", "default": DEFAULT_LINE_WIDTH, "min": 0.0,
                "description": "Stroke width of every line"
            },
            "accent": {
                "type": "string", "default": DEFAULT_ACCENT.to_hex(),
                "description": "Far-end color of pointer lines"
            },
            "accent_stop": {
                "type": "number", "default": DEFAULT_ACCENT_STOP, "min": 0.0, "max": 1.0,
                "description": "Gradient offset where pointer lines reach the accent color"
            },
            "track_pointer": {
                "type": "boolean", "default": false,
                "description": "Browser host follows pointer-move events"
            },
            "resize": {
                "type": "string", "default": "reload", "enum": ["reload", "rebuild"],
                "description": "Reload the page or rebuild the field when the viewport resizes"
            }
        })
    }
}

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing,
/// negative, fractional, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_produce_defaults() {
        let config = FieldConfig::from_json(&json!({})).unwrap();
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn defaults_match_the_reference_look() {
        let c = FieldConfig::default();
        assert!((c.density - 0.00028).abs() < f64::EPSILON);
        assert!((c.link_distance - 55.0).abs() < f64::EPSILON);
        assert!((c.pointer_distance - 100.0).abs() < f64::EPSILON);
        assert_eq!(c.accent.to_hex(), "#019ee5");
        assert_eq!((c.min_radius, c.max_radius), (2, 6));
        assert_eq!(c.max_channel, 253);
        assert_eq!(c.resize, ResizePolicy::Reload);
        assert!(!c.track_pointer);
    }

    #[test]
    fn from_json_overrides_known_keys() {
        let config = FieldConfig::from_json(&json!({
            "link_distance": 80,
            "accent": "#ff0000",
            "track_pointer": true,
            "resize": "rebuild",
            "max_radius": 9
        }))
        .unwrap();
        assert!((config.link_distance - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.accent, Rgb::new(255, 0, 0));
        assert!(config.track_pointer);
        assert_eq!(config.resize, ResizePolicy::Rebuild);
        assert_eq!(config.max_radius, 9);
    }

    #[test]
    fn mistyped_values_fall_back_to_defaults() {
        let config = FieldConfig::from_json(&json!({
            "density": "lots",
            "min_radius": -1,
            "track_pointer": 1
        }))
        .unwrap();
        assert_eq!(config, FieldConfig::default());
    }

    #[test]
    fn unknown_resize_policy_is_rejected() {
        let err = FieldConfig::from_json(&json!({"resize": "shrink"})).unwrap_err();
        assert!(err.to_string().contains("resize"), "got: {err}");
    }

    #[test]
    fn bad_accent_is_rejected() {
        let err = FieldConfig::from_json(&json!({"accent": "blue"})).unwrap_err();
        assert!(matches!(err, FieldError::InvalidColor(_)));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let err = FieldConfig::from_json(&json!({"link_distance": -5.0})).unwrap_err();
        assert!(err.to_string().contains("link_distance"), "got: {err}");
    }

    #[test]
    fn alpha_above_one_is_rejected() {
        assert!(FieldConfig::from_json(&json!({"point_alpha": 1.5})).is_err());
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let err = FieldConfig::from_json(&json!({"min_radius": 8, "max_radius": 3})).unwrap_err();
        assert!(err.to_string().contains("min_radius"), "got: {err}");
    }

    #[test]
    fn channel_bound_above_255_is_rejected() {
        assert!(FieldConfig::from_json(&json!({"max_channel": 300})).is_err());
    }

    #[test]
    fn to_json_round_trips_through_from_json() {
        let mut config = FieldConfig::default();
        config.sparkle_chance = 0.25;
        config.resize = ResizePolicy::Rebuild;
        let restored = FieldConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(restored, config);
    }

    #[test]
    fn schema_lists_every_serialized_key() {
        let schema = FieldConfig::param_schema();
        let params = FieldConfig::default().to_json();
        for key in params.as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema is missing '{key}'");
        }
    }

    #[test]
    fn param_u32_rejects_out_of_range_integers() {
        let params = json!({"n": 5_000_000_000u64, "m": 2.5});
        assert_eq!(param_u32(&params, "n", 7), 7);
        assert_eq!(param_u32(&params, "m", 7), 7);
    }

    #[test]
    fn param_helpers_return_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "x", 3.0) - 3.0).abs() < f64::EPSILON);
        assert!(param_bool(&params, "x", true));
    }
}

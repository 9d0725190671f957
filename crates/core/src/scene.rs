//! Reproducible description of a rendered point field.
//!
//! A [`Scene`] captures everything needed to recreate a frame exactly:
//! viewport size, parameter overrides, PRNG seed, frame count and an optional
//! pointer position.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::field::PointField;
use crate::prng::Xorshift64;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<[f64; 2]>,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Scene {
    /// Creates a scene with default params (`{}`), no frames and no pointer.
    pub fn new(width: u32, height: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            params: empty_params(),
            seed,
            frames: 0,
            pointer: None,
        }
    }

    /// Validates that the viewport is non-empty and that its RGBA8 buffer
    /// size fits in a `usize`.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let width = usize::try_from(self.width).map_err(|_| FieldError::InvalidDimensions)?;
        let height = usize::try_from(self.height).map_err(|_| FieldError::InvalidDimensions)?;
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        Ok(())
    }

    /// Builds the field this scene describes, pointer included, before any
    /// frame has run.
    pub fn build(&self) -> Result<PointField<Xorshift64>, FieldError> {
        self.validate()?;
        let mut field = PointField::from_json(
            f64::from(self.width),
            f64::from(self.height),
            self.seed,
            &self.params,
        )?;
        if let Some([x, y]) = self.pointer {
            field.set_pointer(x, y);
        }
        Ok(field)
    }
}

#![deny(unsafe_code)]
//! Core types for the point field animation.
//!
//! Provides the [`PointField`] animator and its [`Point`]s, the object-safe
//! [`Effect`] trait hosts drive frame by frame, the [`Surface`] drawing
//! abstraction, [`FieldConfig`] parameters, the [`Scene`] reproducible
//! description, [`Rgb`] colors, the [`Xorshift64`] PRNG behind the
//! [`RandomSource`] seam, and the host [`FrameScheduler`] policy.

pub mod color;
pub mod config;
pub mod effect;
pub mod error;
pub mod field;
pub mod point;
pub mod prng;
pub mod scene;
pub mod schedule;
pub mod surface;

pub use color::Rgb;
pub use config::{FieldConfig, ResizePolicy};
pub use effect::{Effect, FrameStats};
pub use error::FieldError;
pub use field::PointField;
pub use point::Point;
pub use prng::{RandomSource, Xorshift64};
pub use scene::Scene;
pub use schedule::FrameScheduler;
pub use surface::{ColorStop, DrawCommand, GradientLine, Recorder, Surface};

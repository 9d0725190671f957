//! Error types for the point field core.

use thiserror::Error;

/// Errors produced by point field operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero (or non-finite) when creating a field or surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A configuration parameter was present but held an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The drawing surface rejected a primitive.
    #[error("surface error: {0}")]
    Surface(String),

    /// Reading or writing an external resource failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl FieldError {
    /// Shorthand for [`FieldError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        FieldError::InvalidParam {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = FieldError::InvalidDimensions.to_string();
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_param_includes_name_and_reason() {
        let err = FieldError::invalid_param("link_distance", "must be non-negative");
        let msg = err.to_string();
        assert!(msg.contains("link_distance"), "missing param name in: {msg}");
        assert!(msg.contains("non-negative"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_color_includes_message() {
        let msg = FieldError::InvalidColor("bad hex".into()).to_string();
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn surface_and_io_include_message() {
        assert!(FieldError::Surface("arc failed".into())
            .to_string()
            .contains("arc failed"));
        assert!(FieldError::Io("disk full".into())
            .to_string()
            .contains("disk full"));
    }

    #[test]
    fn field_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FieldError>();
    }

    #[test]
    fn field_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FieldError>();
    }
}

//! Error types for the procart core.
//!
//! Rendering itself never fails: unknown selectors fall back to defaults and
//! degenerate numbers produce sparse frames. These errors surface only when
//! building surfaces and palettes, and from the export collaborators.

use thiserror::Error;

/// Errors produced by surface construction, palette parsing and export.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero (or too large) when creating a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// A parameter fell outside its documented range.
    #[error("parameter '{name}' out of range: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A palette name was not one of the built-in palettes.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Per-pixel content was found where only vector drawing commands are supported.
    #[error("raster-only content cannot be written as vector output: {0}")]
    RasterOnly(String),

    /// File or encoder failure in an export path.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let err = EngineError::InvalidDimensions;
        let msg = format!("{err}");
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn invalid_color_includes_message() {
        let err = EngineError::InvalidColor("bad hex".into());
        let msg = format!("{err}");
        assert!(msg.contains("bad hex"), "missing message in: {msg}");
    }

    #[test]
    fn unknown_palette_includes_name() {
        let err = EngineError::UnknownPalette("aurora".into());
        assert!(err.to_string().contains("aurora"));
    }

    #[test]
    fn invalid_parameter_includes_name_and_reason() {
        let err = EngineError::InvalidParameter {
            name: "opacity".into(),
            reason: "must be in (0, 1]".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("opacity"), "missing name in: {msg}");
        assert!(msg.contains("(0, 1]"), "missing reason in: {msg}");
    }

    #[test]
    fn raster_only_names_the_content() {
        let err = EngineError::RasterOnly("mandelbrot".into());
        let msg = err.to_string();
        assert!(msg.contains("mandelbrot"), "missing content in: {msg}");
        assert!(msg.contains("vector"), "missing reason in: {msg}");
    }

    #[test]
    fn engine_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EngineError>();
    }

    #[test]
    fn engine_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<EngineError>();
    }
}

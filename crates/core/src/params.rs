//! The [`ArtParameters`] vector that drives every renderer, plus pure helpers
//! for extracting typed values from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail; they always produce a usable value.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

use crate::background::{Background, DEFAULT_BACKGROUND};
use crate::color::Srgb;
use crate::error::EngineError;
use crate::palette::PaletteSelector;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer; values above
/// `u32::MAX` saturate.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v.min(u32::MAX as u64) as u32)
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Which renderer family draws the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Pattern {
    #[default]
    Circles,
    Triangles,
    Lines,
    Stars,
    Spiral,
    Fractal,
}

impl Pattern {
    pub const ALL: [Pattern; 6] = [
        Pattern::Circles,
        Pattern::Triangles,
        Pattern::Lines,
        Pattern::Stars,
        Pattern::Spiral,
        Pattern::Fractal,
    ];

    /// Parses a pattern key, falling back to [`Pattern::Circles`] for unknown keys.
    pub fn from_name(name: &str) -> Self {
        match name {
            "circles" => Pattern::Circles,
            "triangles" => Pattern::Triangles,
            "lines" => Pattern::Lines,
            "stars" => Pattern::Stars,
            "spiral" => Pattern::Spiral,
            "fractal" => Pattern::Fractal,
            other => {
                warn!(pattern = %other, fallback = "circles", "unknown pattern");
                Pattern::Circles
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Circles => "circles",
            Pattern::Triangles => "triangles",
            Pattern::Lines => "lines",
            Pattern::Stars => "stars",
            Pattern::Spiral => "spiral",
            Pattern::Fractal => "fractal",
        }
    }
}

impl From<String> for Pattern {
    fn from(name: String) -> Self {
        Pattern::from_name(&name)
    }
}

impl From<Pattern> for &'static str {
    fn from(pattern: Pattern) -> Self {
        pattern.name()
    }
}

/// Which fractal algorithm draws the frame when the pattern is `fractal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum FractalType {
    Mandelbrot,
    Julia,
    Sierpinski,
    Koch,
    Dragon,
    #[default]
    Mandala,
}

impl FractalType {
    pub const ALL: [FractalType; 6] = [
        FractalType::Mandelbrot,
        FractalType::Julia,
        FractalType::Sierpinski,
        FractalType::Koch,
        FractalType::Dragon,
        FractalType::Mandala,
    ];

    /// Parses a fractal key, falling back to [`FractalType::Mandelbrot`] for unknown keys.
    pub fn from_name(name: &str) -> Self {
        match name {
            "mandelbrot" => FractalType::Mandelbrot,
            "julia" => FractalType::Julia,
            "sierpinski" => FractalType::Sierpinski,
            "koch" => FractalType::Koch,
            "dragon" => FractalType::Dragon,
            "mandala" => FractalType::Mandala,
            other => {
                warn!(fractal = %other, fallback = "mandelbrot", "unknown fractal type");
                FractalType::Mandelbrot
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FractalType::Mandelbrot => "mandelbrot",
            FractalType::Julia => "julia",
            FractalType::Sierpinski => "sierpinski",
            FractalType::Koch => "koch",
            FractalType::Dragon => "dragon",
            FractalType::Mandala => "mandala",
        }
    }

    /// True for the escape-time variants, which write pixels directly and so
    /// only work on raster surfaces.
    pub fn is_raster_only(self) -> bool {
        matches!(self, FractalType::Mandelbrot | FractalType::Julia)
    }
}

impl From<String> for FractalType {
    fn from(name: String) -> Self {
        FractalType::from_name(&name)
    }
}

impl From<FractalType> for &'static str {
    fn from(fractal: FractalType) -> Self {
        fractal.name()
    }
}

const DEFAULT_SHAPE_COUNT: u32 = 50;
const DEFAULT_SHAPE_SIZE: f64 = 20.0;
const DEFAULT_ANIMATION_SPEED: f64 = 1.0;
const DEFAULT_ROTATION_SPEED: f64 = 1.0;
const DEFAULT_OPACITY: f64 = 0.7;
const DEFAULT_COMPLEXITY: u32 = 3;
const DEFAULT_FRACTAL_ITERATIONS: u32 = 100;
const DEFAULT_FRACTAL_SCALE: f64 = 0.5;
const DEFAULT_FRACTAL_ANGLE: f64 = 0.5;

/// Inclusive ranges exposed to control panels and sampled by the randomizer.
pub mod ranges {
    pub const SHAPE_COUNT: (u32, u32) = (20, 119);
    pub const SHAPE_SIZE: (u32, u32) = (10, 49);
    pub const SPEED: (f64, f64) = (0.5, 3.5);
    pub const OPACITY: (f64, f64) = (0.3, 0.8);
    pub const COMPLEXITY: (u32, u32) = (1, 5);
    pub const FRACTAL_ITERATIONS: (u32, u32) = (50, 249);
    pub const FRACTAL_SCALE: (f64, f64) = (0.2, 1.0);
    pub const FRACTAL_ANGLE: (f64, f64) = (0.0, std::f64::consts::PI);
}

/// The single configuration object read by every renderer on every frame.
///
/// `fractal_scale` and `fractal_angle` are carried for compatibility with
/// saved parameter sets; no renderer reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtParameters {
    pub pattern: Pattern,
    pub color_palette: PaletteSelector,
    pub shape_count: u32,
    pub shape_size: f64,
    pub animation_speed: f64,
    pub rotation_speed: f64,
    pub opacity: f64,
    pub complexity: u32,
    pub is_animated: bool,
    pub audio_reactive: bool,
    pub background_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_background: Option<Background>,
    pub fractal_type: FractalType,
    pub fractal_iterations: u32,
    pub fractal_scale: f64,
    pub fractal_angle: f64,
}

impl Default for ArtParameters {
    fn default() -> Self {
        Self {
            pattern: Pattern::Circles,
            color_palette: PaletteSelector::default(),
            shape_count: DEFAULT_SHAPE_COUNT,
            shape_size: DEFAULT_SHAPE_SIZE,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            opacity: DEFAULT_OPACITY,
            complexity: DEFAULT_COMPLEXITY,
            is_animated: true,
            audio_reactive: false,
            background_color: DEFAULT_BACKGROUND.to_string(),
            custom_background: None,
            fractal_type: FractalType::Mandala,
            fractal_iterations: DEFAULT_FRACTAL_ITERATIONS,
            fractal_scale: DEFAULT_FRACTAL_SCALE,
            fractal_angle: DEFAULT_FRACTAL_ANGLE,
        }
    }
}

impl ArtParameters {
    /// Extracts parameters from a camelCase JSON object, falling back to
    /// defaults for every missing or mistyped key.
    pub fn from_json(params: &Value) -> Self {
        let d = Self::default();
        Self {
            pattern: Pattern::from_name(&param_string(params, "pattern", d.pattern.name())),
            color_palette: palette_selector(params.get("colorPalette")),
            shape_count: param_u32(params, "shapeCount", d.shape_count),
            shape_size: param_f64(params, "shapeSize", d.shape_size),
            animation_speed: param_f64(params, "animationSpeed", d.animation_speed),
            rotation_speed: param_f64(params, "rotationSpeed", d.rotation_speed),
            opacity: param_f64(params, "opacity", d.opacity),
            complexity: param_u32(params, "complexity", d.complexity),
            is_animated: param_bool(params, "isAnimated", d.is_animated),
            audio_reactive: param_bool(params, "audioReactive", d.audio_reactive),
            background_color: param_string(params, "backgroundColor", &d.background_color),
            custom_background: params
                .get("customBackground")
                .and_then(|v| serde_json::from_value(v.clone()).ok()),
            fractal_type: FractalType::from_name(&param_string(
                params,
                "fractalType",
                d.fractal_type.name(),
            )),
            fractal_iterations: param_u32(params, "fractalIterations", d.fractal_iterations),
            fractal_scale: param_f64(params, "fractalScale", d.fractal_scale),
            fractal_angle: param_f64(params, "fractalAngle", d.fractal_angle),
        }
    }

    /// Current values as a camelCase JSON object.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Schema describing every field: type, range and default.
    pub fn schema() -> Value {
        json!({
            "pattern": {
                "type": "enum",
                "values": Pattern::ALL.iter().map(|p| p.name()).collect::<Vec<_>>(),
                "default": Pattern::default().name(),
            },
            "colorPalette": {
                "type": "palette",
                "description": "built-in palette name or a list of hex colors",
                "default": crate::palette::DEFAULT_PALETTE,
            },
            "shapeCount": {
                "type": "integer",
                "min": ranges::SHAPE_COUNT.0,
                "max": ranges::SHAPE_COUNT.1,
                "default": DEFAULT_SHAPE_COUNT,
            },
            "shapeSize": {
                "type": "number",
                "min": ranges::SHAPE_SIZE.0,
                "max": ranges::SHAPE_SIZE.1,
                "default": DEFAULT_SHAPE_SIZE,
            },
            "animationSpeed": {
                "type": "number",
                "min": ranges::SPEED.0,
                "max": ranges::SPEED.1,
                "default": DEFAULT_ANIMATION_SPEED,
            },
            "rotationSpeed": {
                "type": "number",
                "min": ranges::SPEED.0,
                "max": ranges::SPEED.1,
                "default": DEFAULT_ROTATION_SPEED,
            },
            "opacity": {
                "type": "number",
                "min": ranges::OPACITY.0,
                "max": ranges::OPACITY.1,
                "default": DEFAULT_OPACITY,
            },
            "complexity": {
                "type": "integer",
                "min": ranges::COMPLEXITY.0,
                "max": ranges::COMPLEXITY.1,
                "default": DEFAULT_COMPLEXITY,
            },
            "isAnimated": { "type": "boolean", "default": true },
            "audioReactive": { "type": "boolean", "default": false },
            "backgroundColor": {
                "type": "enum",
                "values": Background::list_names(),
                "default": DEFAULT_BACKGROUND,
            },
            "fractalType": {
                "type": "enum",
                "values": FractalType::ALL.iter().map(|f| f.name()).collect::<Vec<_>>(),
                "default": FractalType::default().name(),
            },
            "fractalIterations": {
                "type": "integer",
                "min": ranges::FRACTAL_ITERATIONS.0,
                "max": ranges::FRACTAL_ITERATIONS.1,
                "default": DEFAULT_FRACTAL_ITERATIONS,
            },
            "fractalScale": {
                "type": "number",
                "min": ranges::FRACTAL_SCALE.0,
                "max": ranges::FRACTAL_SCALE.1,
                "default": DEFAULT_FRACTAL_SCALE,
                "description": "accepted but not read by any renderer",
            },
            "fractalAngle": {
                "type": "number",
                "min": ranges::FRACTAL_ANGLE.0,
                "max": PI,
                "default": DEFAULT_FRACTAL_ANGLE,
                "description": "accepted but not read by any renderer",
            },
        })
    }

    /// Checks the field constraints renderers are designed around.
    ///
    /// Renderers tolerate violations (they never panic); this exists for
    /// callers that want to reject bad input up front.
    pub fn validate(&self) -> Result<(), EngineError> {
        fn check(ok: bool, name: &str, reason: &str) -> Result<(), EngineError> {
            if ok {
                Ok(())
            } else {
                Err(EngineError::InvalidParameter {
                    name: name.to_string(),
                    reason: reason.to_string(),
                })
            }
        }
        check(self.shape_count >= 1, "shapeCount", "must be at least 1")?;
        check(
            self.shape_size.is_finite() && self.shape_size > 0.0,
            "shapeSize",
            "must be positive",
        )?;
        check(
            self.animation_speed.is_finite() && self.animation_speed > 0.0,
            "animationSpeed",
            "must be positive",
        )?;
        check(
            self.rotation_speed.is_finite() && self.rotation_speed > 0.0,
            "rotationSpeed",
            "must be positive",
        )?;
        check(
            self.opacity > 0.0 && self.opacity <= 1.0,
            "opacity",
            "must be in (0, 1]",
        )?;
        check(self.complexity >= 1, "complexity", "must be at least 1")?;
        check(
            self.fractal_iterations >= 1,
            "fractalIterations",
            "must be at least 1",
        )?;
        if let PaletteSelector::Literal(colors) = &self.color_palette {
            check(!colors.is_empty(), "colorPalette", "must not be empty")?;
        }
        Ok(())
    }
}

fn palette_selector(value: Option<&Value>) -> PaletteSelector {
    match value {
        Some(Value::String(name)) => PaletteSelector::Named(name.clone()),
        Some(list @ Value::Array(_)) => serde_json::from_value::<Vec<Srgb>>(list.clone())
            .map(PaletteSelector::Literal)
            .unwrap_or_else(|e| {
                warn!(error = %e, "unparseable literal palette, using default");
                PaletteSelector::default()
            }),
        _ => PaletteSelector::default(),
    }
}

#![deny(unsafe_code)]
//! Browser bindings: a [`Surface`] over a canvas 2D context and the exported
//! entry points the page calls once per animation frame.
//!
//! Parameters cross the boundary as JSON strings in the same camelCase shape
//! the CLI accepts.

mod canvas;

pub use canvas::CanvasSurface;

use procart_core::{ArtParameters, AudioData, CustomPalettes, Xorshift64};
use procart_render::RendererKind;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Parses a parameter object, filling absent or mistyped keys with defaults.
fn parse_params(json: &str) -> Result<ArtParameters, String> {
    let value: Value = serde_json::from_str(json).map_err(|e| format!("invalid params JSON: {e}"))?;
    Ok(ArtParameters::from_json(&value))
}

fn parse_custom_palettes(json: &str) -> Result<CustomPalettes, String> {
    if json.trim().is_empty() {
        return Ok(CustomPalettes::new());
    }
    serde_json::from_str(json).map_err(|e| format!("invalid palettes JSON: {e}"))
}

/// Draws one frame onto `canvas`.
///
/// A canvas without a 2D context is left untouched. Only malformed
/// parameter JSON is reported as an error.
#[wasm_bindgen(js_name = renderFrame)]
pub fn render_frame(
    canvas: &HtmlCanvasElement,
    time: f64,
    params_json: &str,
    volume: f64,
    frequency: f64,
) -> Result<(), JsValue> {
    let params = parse_params(params_json).map_err(|e| JsValue::from_str(&e))?;
    let Some(ctx) = context_2d(canvas) else {
        return Ok(());
    };
    let mut surface = CanvasSurface::new(ctx, canvas.width(), canvas.height());
    procart_render::render_frame(&mut surface, time, &params, AudioData { volume, frequency });
    Ok(())
}

/// Draws a random parameter set seeded by `seed` and returns it as JSON.
#[wasm_bindgen(js_name = randomizeParams)]
pub fn randomize_params(seed: u64, custom_palettes_json: &str) -> Result<String, JsValue> {
    let custom = parse_custom_palettes(custom_palettes_json).map_err(|e| JsValue::from_str(&e))?;
    let params = procart_core::randomize(&mut Xorshift64::new(seed), &custom);
    Ok(params.to_json().to_string())
}

/// Parameter defaults as JSON.
#[wasm_bindgen(js_name = defaultParams)]
pub fn default_params() -> String {
    ArtParameters::default().to_json().to_string()
}

/// Per-field types, ranges and defaults for building controls.
#[wasm_bindgen(js_name = paramSchema)]
pub fn param_schema() -> String {
    RendererKind::param_schema().to_string()
}

/// Pattern, fractal, palette and background names.
#[wasm_bindgen]
pub fn catalog() -> String {
    RendererKind::catalog().to_string()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{Pattern, Srgb};

    #[test]
    fn params_json_is_lenient() {
        let params = parse_params(r#"{"pattern": "stars", "shapeCount": "many"}"#).unwrap();
        assert_eq!(params.pattern, Pattern::Stars);
        assert_eq!(params.shape_count, ArtParameters::default().shape_count);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_params("{pattern").is_err());
    }

    #[test]
    fn empty_palette_json_means_no_custom_palettes() {
        assert!(parse_custom_palettes("  ").unwrap().is_empty());
        let custom = parse_custom_palettes(r##"{"mine": ["#010203"]}"##).unwrap();
        assert_eq!(custom["mine"], vec![Srgb::from_rgb8(1, 2, 3)]);
    }

    #[test]
    fn randomize_is_seeded() {
        assert_eq!(randomize_params(7, "").unwrap(), randomize_params(7, "").unwrap());
    }

    #[test]
    fn default_params_round_trip() {
        let json = default_params();
        assert_eq!(parse_params(&json).unwrap(), ArtParameters::default());
    }
}

#![deny(unsafe_code)]
//! Renderer registry, frame compositor and export collaborators.
//!
//! This crate sits between `procart-core` (which defines the `Renderer` and
//! `Surface` traits) and the renderer crates (`procart-patterns`,
//! `procart-fractals`). Both the CLI and the WASM binding depend on it so the
//! pattern dispatch lives in one place.
//!
//! The tiny-skia raster surface is behind the `raster` feature and the
//! PNG/GIF writers behind `png` (default on), so browser builds can use the
//! compositor without pulling in either.

pub mod compositor;
pub mod driver;
pub mod svg;

#[cfg(feature = "raster")]
pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

pub use compositor::{render_frame, render_frame_with_extent};
pub use driver::{
    AnimationDriver, AudioSource, CancelToken, FixedRateClock, FrameClock, FrameInfo,
    RealtimeClock,
};

use procart_core::{Frame, Pattern, Renderer, Surface};
use procart_fractals::Fractal;
use procart_patterns::{Circles, Lines, Spiral, Stars, Triangles};
use serde_json::{json, Value};

/// All renderer families, in `Pattern::ALL` order.
const RENDERER_NAMES: &[&str] = &["circles", "triangles", "lines", "stars", "spiral", "fractal"];

/// Enumeration of every renderer family the compositor can dispatch to.
///
/// Wraps each implementation and delegates the `Renderer` trait. Use
/// [`RendererKind::from_pattern`] to select from parameters.
#[derive(Debug, Clone, Copy)]
pub enum RendererKind {
    Circles(Circles),
    Triangles(Triangles),
    Lines(Lines),
    Stars(Stars),
    Spiral(Spiral),
    /// Delegates again on `fractalType`.
    Fractal(Fractal),
}

impl RendererKind {
    pub fn from_pattern(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Circles => RendererKind::Circles(Circles),
            Pattern::Triangles => RendererKind::Triangles(Triangles),
            Pattern::Lines => RendererKind::Lines(Lines),
            Pattern::Stars => RendererKind::Stars(Stars),
            Pattern::Spiral => RendererKind::Spiral(Spiral),
            Pattern::Fractal => RendererKind::Fractal(Fractal),
        }
    }

    /// Looks a renderer up by its pattern key. Unknown keys fall back to
    /// circles with a warning.
    pub fn from_name(name: &str) -> Self {
        Self::from_pattern(Pattern::from_name(name))
    }

    /// Returns a slice of all renderer family names.
    pub fn list_renderers() -> &'static [&'static str] {
        RENDERER_NAMES
    }

    /// Parameter schema for the control panel, shared by every renderer.
    pub fn param_schema() -> Value {
        procart_core::ArtParameters::schema()
    }

    /// Renderer names with their fractal sub-types, as JSON.
    pub fn catalog() -> Value {
        let fractals: Vec<&str> = procart_core::FractalType::ALL
            .iter()
            .map(|f| f.name())
            .collect();
        json!({
            "patterns": RENDERER_NAMES,
            "fractals": fractals,
            "palettes": procart_core::Palette::list_names(),
            "backgrounds": procart_core::Background::list_names(),
        })
    }
}

impl Renderer for RendererKind {
    fn name(&self) -> &'static str {
        match self {
            RendererKind::Circles(r) => r.name(),
            RendererKind::Triangles(r) => r.name(),
            RendererKind::Lines(r) => r.name(),
            RendererKind::Stars(r) => r.name(),
            RendererKind::Spiral(r) => r.name(),
            RendererKind::Fractal(r) => r.name(),
        }
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        match self {
            RendererKind::Circles(r) => r.render(surface, frame),
            RendererKind::Triangles(r) => r.render(surface, frame),
            RendererKind::Lines(r) => r.render(surface, frame),
            RendererKind::Stars(r) => r.render(surface, frame),
            RendererKind::Spiral(r) => r.render(surface, frame),
            RendererKind::Fractal(r) => r.render(surface, frame),
        }
    }
}

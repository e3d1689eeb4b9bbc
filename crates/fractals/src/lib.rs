#![deny(unsafe_code)]
//! Fractal renderers.
//!
//! Three strategies live here:
//! - per-pixel escape time ([`Mandelbrot`], [`Julia`]), raster-only;
//! - bounded geometric recursion ([`Sierpinski`], [`Koch`], [`Dragon`]);
//! - time-driven radial point generation ([`Mandala`]).
//!
//! Every renderer reads `fractalIterations` as its work bound. The recursive
//! ones clamp depth so any iteration count terminates quickly.

mod dragon;
mod escape;
mod koch;
mod mandala;
mod sierpinski;

pub use dragon::{Dragon, MAX_DRAGON_DEPTH};
pub use escape::{escape_count, Julia, Mandelbrot, ESCAPE_RADIUS_SQ};
pub use koch::{Koch, MAX_KOCH_DEPTH};
pub use mandala::{mandala_colors, Mandala};
pub use sierpinski::Sierpinski;

use glam::DVec2;
use procart_core::{Frame, FractalType, Paint, Renderer, Shape, Surface};
use tracing::debug;

/// Dispatches to the renderer selected by `fractalType`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fractal;

impl Renderer for Fractal {
    fn name(&self) -> &'static str {
        "fractal"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let renderer = fractal_renderer(frame.params.fractal_type);
        debug!(fractal = renderer.name(), time = frame.time, "render fractal");
        renderer.render(surface, frame);
    }
}

/// The renderer for one fractal type.
pub fn fractal_renderer(kind: FractalType) -> &'static dyn Renderer {
    match kind {
        FractalType::Mandelbrot => &Mandelbrot,
        FractalType::Julia => &Julia,
        FractalType::Sierpinski => &Sierpinski,
        FractalType::Koch => &Koch,
        FractalType::Dragon => &Dragon,
        FractalType::Mandala => &Mandala,
    }
}

/// Stroke style shared by the line-drawing curves.
struct Pen<'a> {
    surface: &'a mut dyn Surface,
    paint: Paint,
    line_width: f64,
}

impl Pen<'_> {
    fn line(&mut self, from: DVec2, to: DVec2) {
        self.surface
            .stroke(&Shape::Segment { from, to }, &self.paint, self.line_width);
    }
}

//! Per-pixel escape-time fractals.
//!
//! Both renderers write a full-surface [`PixelBuffer`] through
//! [`Surface::put_pixels`], replacing whatever the compositor painted
//! underneath. They are raster-only: on a recording surface the pixels are
//! captured as a single opaque command that vector export rejects.

use glam::DVec2;
use procart_core::renderer::min_dim;
use procart_core::{Frame, Palette, PixelBuffer, Renderer, Srgb, Surface};
use tracing::warn;

/// Squared magnitude beyond which an orbit counts as escaped.
pub const ESCAPE_RADIUS_SQ: f64 = 16.0;

/// Complex-plane span covered by the shorter side of the surface.
const PLANE_SPAN: f64 = 4.0;

/// Iterates `z ← z² + c` from `z0` and returns how many steps stayed bounded.
///
/// The result is always in `[0, max_iter]`.
pub fn escape_count(z0: DVec2, c: DVec2, max_iter: u32) -> u32 {
    let mut z = z0;
    let mut n = 0;
    while n < max_iter {
        z = DVec2::new(z.x * z.x - z.y * z.y + c.x, 2.0 * z.x * z.y + c.y);
        if z.length_squared() > ESCAPE_RADIUS_SQ {
            break;
        }
        n += 1;
    }
    n
}

/// Mandelbrot set with a slowly drifting center and breathing zoom.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandelbrot;

impl Renderer for Mandelbrot {
    fn name(&self) -> &'static str {
        "mandelbrot"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let t = frame.time;
        let view = View {
            center: DVec2::new(-0.5, 0.0) + DVec2::new((t * 0.001).sin(), (t * 0.001).cos()) * 0.1,
            scale: PLANE_SPAN / min_dim(surface) * (1.0 + (t * 0.002).sin() * 0.2),
        };
        let max_iter = frame.params.fractal_iterations;
        render_escape(surface, frame, view, |p| escape_count(p, p, max_iter));
    }
}

/// Julia set whose constant orbits a circle of radius 0.8 over time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Julia;

impl Renderer for Julia {
    fn name(&self) -> &'static str {
        "julia"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let t = frame.time;
        let c = DVec2::new((t * 0.001).sin(), (t * 0.001).cos()) * 0.8;
        let view = View {
            center: DVec2::ZERO,
            scale: PLANE_SPAN / min_dim(surface),
        };
        let max_iter = frame.params.fractal_iterations;
        render_escape(surface, frame, view, |p| escape_count(p, c, max_iter));
    }
}

/// Mapping from surface pixels to the complex plane.
#[derive(Debug, Clone, Copy)]
struct View {
    center: DVec2,
    /// Plane units per pixel.
    scale: f64,
}

fn render_escape<F>(surface: &mut dyn Surface, frame: &Frame<'_>, view: View, count: F)
where
    F: Fn(DVec2) -> u32,
{
    if !surface.is_raster() {
        warn!("escape-time fractal drawn on a vector surface; output is raster-only");
    }
    let (width, height) = (surface.width(), surface.height());
    let Ok(mut buffer) = PixelBuffer::new(width, height) else {
        return;
    };

    let half = DVec2::new(width as f64 / 2.0, height as f64 / 2.0);
    let alpha = (255.0 * frame.opacity()).floor() as u8;
    let max_iter = frame.params.fractal_iterations;

    for y in 0..height {
        for x in 0..width {
            let pixel = DVec2::new(x as f64, y as f64);
            let point = (pixel - half) * view.scale + view.center;
            let n = count(point);
            let [r, g, b] = escape_color(&frame.palette, n, max_iter).to_rgb8();
            buffer.set(x, y, [r, g, b, alpha]);
        }
    }
    surface.put_pixels(&buffer);
}

/// Palette color for an escape count: `floor(n / max · len) mod len`.
fn escape_color(palette: &Palette, n: u32, max_iter: u32) -> Srgb {
    if max_iter == 0 {
        return palette.color(0);
    }
    let index = (n as f64 / max_iter as f64 * palette.len() as f64).floor() as usize;
    palette.color(index)
}

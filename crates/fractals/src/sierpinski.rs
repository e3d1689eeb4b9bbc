use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Palette, Renderer, Shape, Surface};

const SIZE_FRACTION: f64 = 0.6;
/// Triangles smaller than this many pixels are not subdivided further.
const MIN_SIZE: f64 = 2.0;

/// Sierpinski triangle by recursive subdivision.
///
/// Every level draws its own filled triangle, fading linearly with depth and
/// cycling through the palette, so shallow levels show through the gaps of
/// deeper ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sierpinski;

impl Renderer for Sierpinski {
    fn name(&self) -> &'static str {
        "sierpinski"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let size = min_dim(surface) * SIZE_FRACTION;
        let apex = surface_center(surface) + DVec2::new(0.0, size / 4.0);
        let mut ctx = Subdivision {
            surface,
            palette: &frame.palette,
            opacity: frame.opacity(),
            max_depth: frame.params.fractal_iterations,
        };
        ctx.subdivide(apex, size, 0);
    }
}

struct Subdivision<'a> {
    surface: &'a mut dyn Surface,
    palette: &'a Palette,
    opacity: f64,
    max_depth: u32,
}

impl Subdivision<'_> {
    fn subdivide(&mut self, center: DVec2, size: f64, depth: u32) {
        if depth >= self.max_depth || size < MIN_SIZE {
            return;
        }

        let fade = 1.0 - depth as f64 / self.max_depth as f64;
        let half = size / 2.0;
        let triangle = Shape::Polygon(vec![
            center + DVec2::new(0.0, -half),
            center + DVec2::new(-half, half),
            center + DVec2::new(half, half),
        ]);
        self.surface.fill(
            &triangle,
            &Paint::new(self.palette.color(depth as usize), self.opacity * fade),
        );

        let quarter = size / 4.0;
        self.subdivide(center + DVec2::new(0.0, -quarter), half, depth + 1);
        self.subdivide(center + DVec2::new(-quarter, quarter), half, depth + 1);
        self.subdivide(center + DVec2::new(quarter, quarter), half, depth + 1);
    }
}

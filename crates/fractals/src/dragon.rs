use std::f64::consts::{FRAC_PI_4, SQRT_2, TAU};

use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Surface};

use crate::Pen;

/// Depth cap; the curve has 2^depth segments.
pub const MAX_DRAGON_DEPTH: u32 = 12;

const LENGTH_FRACTION: f64 = 0.3;
const LINE_WIDTH: f64 = 3.0;

/// Heighway dragon curve.
///
/// Each segment is replaced by two segments `1/√2` as long, turned ±45°, with
/// the turn sign alternating between the two halves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dragon;

impl Renderer for Dragon {
    fn name(&self) -> &'static str {
        "dragon"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let length = min_dim(surface) * LENGTH_FRACTION;
        let start = surface_center(surface) - DVec2::new(length / 2.0, 0.0);
        let heading = (frame.time * 0.001) % TAU;
        let depth = frame.params.fractal_iterations.min(MAX_DRAGON_DEPTH);
        let mut pen = Pen {
            surface,
            paint: Paint::new(frame.palette.color(0), frame.opacity()),
            line_width: LINE_WIDTH,
        };
        dragon_curve(&mut pen, start, length, heading, depth, 1.0);
    }
}

/// Draws the curve and returns where it ends.
fn dragon_curve(
    pen: &mut Pen<'_>,
    start: DVec2,
    length: f64,
    heading: f64,
    depth: u32,
    direction: f64,
) -> DVec2 {
    if depth == 0 {
        let end = start + DVec2::from_angle(heading) * length;
        pen.line(start, end);
        return end;
    }
    let sub = length / SQRT_2;
    let mid = dragon_curve(pen, start, sub, heading - FRAC_PI_4 * direction, depth - 1, 1.0);
    dragon_curve(pen, mid, sub, heading + FRAC_PI_4 * direction, depth - 1, -1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{ArtParameters, AudioData, RecordingSurface};

    fn render(iterations: u32) -> RecordingSurface {
        let params = ArtParameters {
            fractal_iterations: iterations,
            ..ArtParameters::default()
        };
        let mut surface = RecordingSurface::new(200, 200);
        Dragon.render(&mut surface, &Frame::new(0.0, &params, AudioData::neutral()));
        surface
    }

    #[test]
    fn segment_count_doubles_per_level() {
        assert_eq!(render(0).shape_count(), 1);
        assert_eq!(render(5).shape_count(), 32);
    }

    #[test]
    fn huge_iteration_count_is_clamped() {
        assert_eq!(render(10_000).shape_count(), 1 << MAX_DRAGON_DEPTH);
    }

    #[test]
    fn endpoints_match_the_straight_segment() {
        // Subdivision keeps the chord, so the curve ends where depth 0 would.
        let params = ArtParameters::default();
        let frame = Frame::new(0.0, &params, AudioData::neutral());
        let mut rec = RecordingSurface::new(10, 10);
        let mut pen = Pen {
            surface: &mut rec,
            paint: Paint::new(frame.palette.color(0), 1.0),
            line_width: 1.0,
        };
        let end = dragon_curve(&mut pen, DVec2::ZERO, 100.0, 0.0, 8, 1.0);
        assert!((end - DVec2::new(100.0, 0.0)).length() < 1e-6, "end {end}");
    }
}

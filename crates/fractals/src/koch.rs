use std::f64::consts::{FRAC_PI_3, TAU};

use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Surface};

use crate::Pen;

/// Depth cap; segment count grows as 4^depth per side.
pub const MAX_KOCH_DEPTH: u32 = 5;

const SIZE_FRACTION: f64 = 0.3;
const LINE_WIDTH: f64 = 2.0;

/// Koch snowflake rotating slowly about the surface center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Koch;

impl Renderer for Koch {
    fn name(&self) -> &'static str {
        "koch"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let center = surface_center(surface);
        let size = min_dim(surface) * SIZE_FRACTION;
        let rotation = (frame.time * 0.001) % TAU;
        let depth = frame.params.fractal_iterations.min(MAX_KOCH_DEPTH);
        let mut pen = Pen {
            surface,
            paint: Paint::new(frame.palette.color(0), frame.opacity()),
            line_width: LINE_WIDTH,
        };

        let corner = |k: u32| center + DVec2::from_angle(rotation + k as f64 * TAU / 3.0) * size;
        for side in 0..3 {
            koch_curve(&mut pen, corner(side), corner(side + 1), depth);
        }
    }
}

/// Replaces the middle third of `a → b` with an outward bump, `depth` times.
fn koch_curve(pen: &mut Pen<'_>, a: DVec2, b: DVec2, depth: u32) {
    if depth == 0 {
        pen.line(a, b);
        return;
    }
    let d = b - a;
    let first = a + d / 3.0;
    let second = a + d * (2.0 / 3.0);
    let peak = first + DVec2::from_angle(d.y.atan2(d.x) - FRAC_PI_3) * (d.length() / 3.0);

    koch_curve(pen, a, first, depth - 1);
    koch_curve(pen, first, peak, depth - 1);
    koch_curve(pen, peak, second, depth - 1);
    koch_curve(pen, second, b, depth - 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{ArtParameters, AudioData, DrawCommand, RecordingSurface, Shape};

    fn render(iterations: u32, time: f64) -> RecordingSurface {
        let params = ArtParameters {
            fractal_iterations: iterations,
            ..ArtParameters::default()
        };
        let mut surface = RecordingSurface::new(300, 300);
        Koch.render(&mut surface, &Frame::new(time, &params, AudioData::neutral()));
        surface
    }

    #[test]
    fn depth_zero_is_a_triangle() {
        let surface = render(0, 0.0);
        assert_eq!(surface.shape_count(), 3);
        let DrawCommand::Stroke {
            shape: Shape::Segment { from, .. },
            line_width,
            ..
        } = &surface.commands()[0]
        else {
            panic!("expected stroked segment");
        };
        assert!((*from - DVec2::new(240.0, 150.0)).length() < 1e-9);
        assert_eq!(*line_width, 2.0);
    }

    #[test]
    fn each_level_multiplies_segments_by_four() {
        assert_eq!(render(2, 0.0).shape_count(), 3 * 16);
    }

    #[test]
    fn huge_iteration_count_is_clamped() {
        assert_eq!(render(10_000, 500.0).shape_count(), 3 * 4usize.pow(MAX_KOCH_DEPTH));
    }

    #[test]
    fn segments_chain_end_to_end() {
        let surface = render(3, 1234.0);
        let segments: Vec<(DVec2, DVec2)> = surface
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Stroke {
                    shape: Shape::Segment { from, to },
                    ..
                } => (*from, *to),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        for pair in segments.windows(2) {
            assert!((pair[0].1 - pair[1].0).length() < 1e-6);
        }
    }
}

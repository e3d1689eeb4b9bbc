use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Shape, Surface};

use crate::{locus_angle, TWIST_RATE};

/// Inner end of every ray, in pixels, before audio scaling.
const INNER_RADIUS: f64 = 50.0;
const OUTER_FRACTION: f64 = 0.4;
const LINE_WIDTH: f64 = 3.0;

/// Rays whose outer ends lag behind their inner ends, twisting the fan.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lines;

impl Renderer for Lines {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let p = frame.params;
        let center = surface_center(surface);
        let volume = frame.modulation.volume_factor;
        let inner = INNER_RADIUS * volume;
        let outer = min_dim(surface) * OUTER_FRACTION * volume;
        let twist = frame.time * p.rotation_speed * TWIST_RATE;
        let alpha = frame.opacity();

        for i in 0..p.shape_count {
            let angle = locus_angle(
                i,
                p.shape_count,
                p.complexity as f64,
                frame.time,
                p.animation_speed,
            );
            let segment = Shape::Segment {
                from: center + DVec2::from_angle(angle) * inner,
                to: center + DVec2::from_angle(angle + twist) * outer,
            };
            surface.stroke(
                &segment,
                &Paint::new(frame.shape_color(i as usize), alpha),
                LINE_WIDTH,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{ArtParameters, AudioData, DrawCommand, RecordingSurface};

    #[test]
    fn rays_run_from_fixed_inner_radius_to_outer_fraction() {
        let params = ArtParameters {
            shape_count: 8,
            ..ArtParameters::default()
        };
        let frame = Frame::new(777.0, &params, AudioData::neutral());
        let mut surface = RecordingSurface::new(500, 500);
        Lines.render(&mut surface, &frame);

        let center = DVec2::splat(250.0);
        assert_eq!(surface.shape_count(), 8);
        for cmd in surface.commands() {
            let DrawCommand::Stroke {
                shape: Shape::Segment { from, to },
                line_width,
                ..
            } = cmd
            else {
                panic!("expected stroked segment, got {cmd:?}");
            };
            assert!(((*from - center).length() - 50.0).abs() < 1e-9);
            assert!(((*to - center).length() - 200.0).abs() < 1e-9);
            assert_eq!(*line_width, 3.0);
        }
    }

    #[test]
    fn untwisted_at_time_zero() {
        let params = ArtParameters {
            shape_count: 3,
            ..ArtParameters::default()
        };
        let frame = Frame::new(0.0, &params, AudioData::neutral());
        let mut surface = RecordingSurface::new(400, 400);
        Lines.render(&mut surface, &frame);
        let center = DVec2::splat(200.0);
        for cmd in surface.commands() {
            if let DrawCommand::Stroke {
                shape: Shape::Segment { from, to },
                ..
            } = cmd
            {
                let a = (*from - center).normalize();
                let b = (*to - center).normalize();
                assert!(a.dot(b) > 1.0 - 1e-9, "segment is not radial");
            }
        }
    }
}

use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Shape, Surface};

use crate::{locus_angle, pulse, TWIST_RATE};

const OUTER_FRACTION: f64 = 0.4;

/// Discs on an Archimedean spiral: radius grows linearly with the shape index.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spiral;

impl Renderer for Spiral {
    fn name(&self) -> &'static str {
        "spiral"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let p = frame.params;
        let center = surface_center(surface);
        let volume = frame.modulation.volume_factor;
        let outer = min_dim(surface) * OUTER_FRACTION * volume;
        let twist = frame.time * p.rotation_speed * TWIST_RATE;
        let alpha = frame.opacity();

        for i in 0..p.shape_count {
            let t = locus_angle(
                i,
                p.shape_count,
                p.complexity as f64,
                frame.time,
                p.animation_speed,
            );
            let radius = (i as f64 / p.shape_count as f64) * outer;
            let size = p.shape_size * (0.3 + pulse(frame.time, i) * 0.2) * volume;

            surface.fill(
                &Shape::Circle {
                    center: center + DVec2::from_angle(t + twist) * radius,
                    radius: size,
                },
                &Paint::new(frame.shape_color(i as usize), alpha),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{ArtParameters, AudioData, DrawCommand, RecordingSurface};

    #[test]
    fn radius_grows_with_index() {
        let params = ArtParameters {
            shape_count: 20,
            ..ArtParameters::default()
        };
        let frame = Frame::new(42.0, &params, AudioData::neutral());
        let mut surface = RecordingSurface::new(300, 300);
        Spiral.render(&mut surface, &frame);

        let center = DVec2::splat(150.0);
        let distances: Vec<f64> = surface
            .commands()
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Fill {
                    shape: Shape::Circle { center: c, .. },
                    ..
                } => (*c - center).length(),
                other => panic!("expected circle, got {other:?}"),
            })
            .collect();
        assert_eq!(distances.len(), 20);
        assert!(distances[0].abs() < 1e-9, "first disc sits at the center");
        assert!(distances.windows(2).all(|w| w[1] > w[0]));
        assert!(distances[19] < 0.4 * 300.0);
    }

    #[test]
    fn disc_sizes_stay_within_pulse_band() {
        let params = ArtParameters {
            shape_count: 50,
            shape_size: 10.0,
            ..ArtParameters::default()
        };
        let frame = Frame::new(3000.0, &params, AudioData::neutral());
        let mut surface = RecordingSurface::new(200, 200);
        Spiral.render(&mut surface, &frame);
        for cmd in surface.commands() {
            if let DrawCommand::Fill {
                shape: Shape::Circle { radius, .. },
                ..
            } = cmd
            {
                assert!(*radius >= 1.0 - 1e-9 && *radius <= 5.0 + 1e-9, "radius {radius}");
            }
        }
    }
}

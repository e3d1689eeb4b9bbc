use glam::{DAffine2, DVec2};
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Shape, Surface};

use crate::{locus_angle, pulse, SPIN_RATE};

const LOCUS_FRACTION: f64 = 0.25;
/// cos(30°): half-width of an equilateral triangle relative to its circumradius.
const HALF_WIDTH: f64 = 0.866;

/// Spinning equilateral triangles on a fixed ring.
#[derive(Debug, Clone, Copy, Default)]
pub struct Triangles;

impl Renderer for Triangles {
    fn name(&self) -> &'static str {
        "triangles"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let p = frame.params;
        let center = surface_center(surface);
        let volume = frame.modulation.volume_factor;
        let radius = min_dim(surface) * LOCUS_FRACTION * volume;
        let alpha = frame.opacity();

        for i in 0..p.shape_count {
            let angle = locus_angle(
                i,
                p.shape_count,
                p.complexity as f64,
                frame.time,
                p.animation_speed,
            );
            let position = center + DVec2::from_angle(angle) * radius;
            let spin = angle + frame.time * p.rotation_speed * SPIN_RATE;
            let size = p.shape_size * (0.5 + pulse(frame.time, i) * 0.5) * volume;

            let to_surface = DAffine2::from_angle_translation(spin, position);
            let vertices = [
                DVec2::new(0.0, -size),
                DVec2::new(-size * HALF_WIDTH, size * 0.5),
                DVec2::new(size * HALF_WIDTH, size * 0.5),
            ]
            .into_iter()
            .map(|v| to_surface.transform_point2(v))
            .collect();

            surface.fill(
                &Shape::Polygon(vertices),
                &Paint::new(frame.shape_color(i as usize), alpha),
            );
        }
    }
}

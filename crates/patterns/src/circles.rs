use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Shape, Surface};

use crate::{locus_angle, pulse, TWIST_RATE};

/// Fraction of the shorter side used as the locus radius.
const LOCUS_FRACTION: f64 = 0.3;

/// Pulsing discs on a wobbling ring.
///
/// Each disc's distance from the center breathes between 0.2 and 0.8 of the
/// locus radius, with independent sine/cosine wobble on the two axes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circles;

impl Renderer for Circles {
    fn name(&self) -> &'static str {
        "circles"
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
            let wobble = frame.time * p.rotation_speed * TWIST_RATE + i as f64;
            let offset = DVec2::new(
                angle.cos() * radius * (0.5 + wobble.sin() * 0.3),
                angle.sin() * radius * (0.5 + wobble.cos() * 0.3),
            );
            let size = p.shape_size * (0.5 + pulse(frame.time, i) * 0.5) * volume;

            surface.fill(
                &Shape::Circle {
                    center: center + offset,
                    radius: size,
                },
                &Paint::new(frame.shape_color(i as usize), alpha),
            );
        }
    }
}

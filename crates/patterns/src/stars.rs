use std::f64::consts::PI;

use glam::{DAffine2, DVec2};
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Shape, Surface};

use crate::{locus_angle, SPIN_RATE};

const LOCUS_FRACTION: f64 = 0.35;
const BASE_POINTS: u32 = 5;
/// Bounds the outline length for absurd complexity values.
const MAX_POINTS: u32 = 1024;

/// Spinning star polygons on a ring.
///
/// Stars ignore audio modulation entirely: no size scaling, no palette shift.
/// The ring has one turn regardless of complexity, which instead adds points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stars;

impl Renderer for Stars {
    fn name(&self) -> &'static str {
        "stars"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let p = frame.params;
        let center = surface_center(surface);
        let radius = min_dim(surface) * LOCUS_FRACTION;
        let points = BASE_POINTS.saturating_add(p.complexity).min(MAX_POINTS);
        let outline = star_outline(points, p.shape_size, p.shape_size * 0.5);
        let alpha = frame.opacity();

        for i in 0..p.shape_count {
            let angle = locus_angle(i, p.shape_count, 1.0, frame.time, p.animation_speed);
            let position = center + DVec2::from_angle(angle) * radius;
            let spin = angle + frame.time * p.rotation_speed * SPIN_RATE;
            let to_surface = DAffine2::from_angle_translation(spin, position);

            let vertices = outline
                .iter()
                .map(|&v| to_surface.transform_point2(v))
                .collect();
            surface.fill(
                &Shape::Polygon(vertices),
                &Paint::new(frame.palette.color(i as usize), alpha),
            );
        }
    }
}

/// Star vertices around the origin, alternating outer and inner radius,
/// starting on the positive x axis.
fn star_outline(points: u32, outer: f64, inner: f64) -> Vec<DVec2> {
    let step = PI / points as f64;
    (0..points * 2)
        .map(|j| {
            let r = if j % 2 == 0 { outer } else { inner };
            DVec2::from_angle(j as f64 * step) * r
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{ArtParameters, AudioData, DrawCommand, RecordingSurface};

    #[test]
    fn outline_alternates_radii() {
        let outline = star_outline(5, 10.0, 5.0);
        assert_eq!(outline.len(), 10);
        for (j, v) in outline.iter().enumerate() {
            let expected = if j % 2 == 0 { 10.0 } else { 5.0 };
            assert!((v.length() - expected).abs() < 1e-9);
        }
        assert!((outline[0] - DVec2::new(10.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn complexity_adds_points() {
        let params = ArtParameters {
            shape_count: 4,
            complexity: 3,
            ..ArtParameters::default()
        };
        let frame = Frame::new(0.0, &params, AudioData::neutral());
        let mut surface = RecordingSurface::new(200, 200);
        Stars.render(&mut surface, &frame);
        assert_eq!(surface.shape_count(), 4);
        for cmd in surface.commands() {
            let DrawCommand::Fill {
                shape: Shape::Polygon(v),
                ..
            } = cmd
            else {
                panic!("expected polygon");
            };
            assert_eq!(v.len(), 16, "5 + 3 points gives 16 vertices");
        }
    }

    #[test]
    fn huge_complexity_is_capped() {
        let params = ArtParameters {
            shape_count: 1,
            complexity: u32::MAX,
            ..ArtParameters::default()
        };
        let mut surface = RecordingSurface::new(50, 50);
        Stars.render(&mut surface, &Frame::new(0.0, &params, AudioData::neutral()));
        let DrawCommand::Fill {
            shape: Shape::Polygon(v),
            ..
        } = &surface.commands()[0]
        else {
            panic!("expected polygon");
        };
        assert_eq!(v.len(), 2 * MAX_POINTS as usize);
    }

    #[test]
    fn stars_ignore_audio() {
        let mut params = ArtParameters {
            shape_count: 6,
            ..ArtParameters::default()
        };
        let loud = AudioData {
            volume: 1.0,
            frequency: 0.9,
        };
        let mut quiet_surface = RecordingSurface::new(120, 120);
        Stars.render(
            &mut quiet_surface,
            &Frame::new(900.0, &params, AudioData::neutral()),
        );
        params.audio_reactive = true;
        let mut loud_surface = RecordingSurface::new(120, 120);
        Stars.render(&mut loud_surface, &Frame::new(900.0, &params, loud));
        assert_eq!(quiet_surface.commands(), loud_surface.commands());
    }
}

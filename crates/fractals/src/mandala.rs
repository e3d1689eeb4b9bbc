use std::f64::consts::TAU;

use glam::DVec2;
use procart_core::renderer::{min_dim, surface_center};
use procart_core::{Frame, Paint, Renderer, Shape, Srgb, Surface};

const PETALS: u32 = 8;
const RINGS: u32 = 4;
const MAX_SUB_DEPTH: u32 = 6;
const RADIUS_FRACTION: f64 = 0.4;
const PETAL_FRACTION: f64 = 0.3;
/// Pixels of radial jitter on ring points.
const RING_JITTER: f64 = 10.0;

const MANDALA_HEX: [&str; 8] = [
    "#00ffff", "#00ff00", "#ff0000", "#ffff00", "#ff00ff", "#0080ff", "#ff8000", "#8000ff",
];

/// The fixed high-saturation colors the mandala uses instead of the
/// selected palette.
pub fn mandala_colors() -> [Srgb; 8] {
    MANDALA_HEX.map(|hex| Srgb::from_hex(hex).expect("mandala colors are valid"))
}

/// Glowing radial mandala: eight petals with nested sub-points and four
/// rings of linked points.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mandala;

impl Renderer for Mandala {
    fn name(&self) -> &'static str {
        "mandala"
    }

    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
        let layout = Layout {
            center: surface_center(surface),
            max_radius: min_dim(surface) * RADIUS_FRACTION,
            colors: mandala_colors(),
            time: frame.time,
            opacity: frame.opacity(),
            iterations: frame.params.fractal_iterations,
        };
        layout.petals(surface);
        layout.rings(surface);
    }
}

struct Layout {
    center: DVec2,
    max_radius: f64,
    colors: [Srgb; 8],
    time: f64,
    opacity: f64,
    iterations: u32,
}

impl Layout {
    fn color(&self, index: u64) -> Srgb {
        self.colors[(index % self.colors.len() as u64) as usize]
    }

    /// Point at `radius` along `angle`, pushed in and out by a travelling wave.
    fn wavy_point(&self, angle: f64, radius: f64) -> DVec2 {
        let wave = (self.time * 0.002 + angle * 8.0).sin() * 0.1;
        self.center + DVec2::from_angle(angle) * radius * (1.0 + wave)
    }

    fn petals(&self, surface: &mut dyn Surface) {
        let radius = self.max_radius * PETAL_FRACTION;
        let sub_depths = self.iterations.min(MAX_SUB_DEPTH);

        for i in 0..PETALS {
            let angle = i as f64 / PETALS as f64 * TAU + self.time * 0.001;
            self.jewel(surface, self.wavy_point(angle, radius));

            for depth in 1..sub_depths {
                let d = depth as f64;
                let sub_radius = radius * (0.5 + d * 0.2);
                let sub_angle = angle + (self.time * 0.003 + d).sin() * 0.5;
                let tip = self.wavy_point(sub_angle, sub_radius);

                // Negative times would give a negative floor; wrap instead.
                let shift = (self.time * 0.01).floor().rem_euclid(8.0) as u64;
                let color = self.color(depth as u64 + shift);
                let fade = 1.0 - d / self.iterations as f64;
                let paint = Paint::new(color, self.opacity * fade).with_glow(color, 5.0 + d * 2.0);
                surface.stroke(
                    &Shape::Segment {
                        from: self.center,
                        to: tip,
                    },
                    &paint,
                    2.0 + d * 0.5,
                );
            }
        }
    }

    /// Three nested glowing discs marking a petal.
    fn jewel(&self, surface: &mut dyn Surface, at: DVec2) {
        let glow = self.colors[0];
        // (radius, color index, alpha scale, blur)
        let layers: [(f64, usize, f64, f64); 3] =
            [(8.0, 0, 1.0, 20.0), (4.0, 2, 0.8, 10.0), (1.5, 3, 1.0, 5.0)];
        for (radius, color, alpha, blur) in layers {
            surface.fill(
                &Shape::Circle { center: at, radius },
                &Paint::new(self.colors[color], self.opacity * alpha).with_glow(glow, blur),
            );
        }
    }

    fn rings(&self, surface: &mut dyn Surface) {
        for ring in 1..=RINGS {
            let r = ring as f64;
            let ring_radius = self.max_radius * (0.1 + r * 0.15);
            let points = PETALS * (ring + 1);
            let point = |i: u32| {
                let angle = i as f64 / points as f64 * TAU + self.time * 0.002;
                let radius = ring_radius + (self.time * 0.001 + i as f64).sin() * RING_JITTER;
                self.center + DVec2::from_angle(angle) * radius
            };

            for i in 0..points {
                let color = self.color(u64::from(i + ring));
                let paint =
                    Paint::new(color, self.opacity * (0.8 - r * 0.1)).with_glow(color, 3.0 + r);
                let width = 1.0 + r * 0.5;
                let here = point(i);

                surface.stroke(
                    &Shape::Circle {
                        center: here,
                        radius: 2.0 + r,
                    },
                    &paint,
                    width,
                );
                if i > 0 {
                    surface.stroke(
                        &Shape::Segment {
                            from: point(i - 1),
                            to: here,
                        },
                        &paint,
                        width,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::{
        ArtParameters, AudioData, DrawCommand, Palette, PaletteSelector, RecordingSurface,
    };

    fn render(iterations: u32, time: f64) -> RecordingSurface {
        let params = ArtParameters {
            fractal_iterations: iterations,
            ..ArtParameters::default()
        };
        let mut surface = RecordingSurface::new(400, 400);
        Mandala.render(&mut surface, &Frame::new(time, &params, AudioData::neutral()));
        surface
    }

    /// Circles plus links across the four rings: 16, 24, 32 and 40 points.
    const RING_SHAPES: usize = (16 + 15) + (24 + 23) + (32 + 31) + (40 + 39);

    #[test]
    fn shape_count_follows_sub_depth_cap() {
        // Eight petals of three discs each, plus min(iter, 6) - 1 sub-strokes.
        assert_eq!(render(1, 0.0).shape_count(), 8 * 3 + RING_SHAPES);
        assert_eq!(render(4, 0.0).shape_count(), 8 * (3 + 3) + RING_SHAPES);
        assert_eq!(render(500, 0.0).shape_count(), 8 * (3 + 5) + RING_SHAPES);
    }

    #[test]
    fn zero_iterations_still_draws_petals_and_rings() {
        assert_eq!(render(0, 100.0).shape_count(), 8 * 3 + RING_SHAPES);
    }

    #[test]
    fn ignores_the_selected_palette() {
        let mut params = ArtParameters {
            fractal_iterations: 3,
            ..ArtParameters::default()
        };
        let mut a = RecordingSurface::new(200, 200);
        Mandala.render(&mut a, &Frame::new(50.0, &params, AudioData::neutral()));
        params.color_palette = PaletteSelector::Named("ocean".into());
        let mut b = RecordingSurface::new(200, 200);
        Mandala.render(&mut b, &Frame::new(50.0, &params, AudioData::neutral()));
        assert_eq!(a.commands(), b.commands());

        let sunset = Palette::sunset();
        let colors = mandala_colors();
        for cmd in a.commands() {
            let paint = match cmd {
                DrawCommand::Fill { paint, .. } | DrawCommand::Stroke { paint, .. } => paint,
                other => panic!("unexpected {other:?}"),
            };
            assert!(colors.contains(&paint.color));
            assert!(!sunset.colors().contains(&paint.color));
            assert!(paint.glow.is_some());
        }
    }

    #[test]
    fn first_jewel_has_three_nested_discs() {
        let surface = render(1, 0.0);
        let radii: Vec<f64> = surface.commands()[..3]
            .iter()
            .map(|cmd| match cmd {
                DrawCommand::Fill {
                    shape: Shape::Circle { radius, .. },
                    ..
                } => *radius,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(radii, vec![8.0, 4.0, 1.5]);
    }

    #[test]
    fn negative_time_does_not_panic() {
        assert!(render(6, -12_345.0).shape_count() > 0);
    }
}

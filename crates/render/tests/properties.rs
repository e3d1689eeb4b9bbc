//! End-to-end properties of the compositor over both surface kinds.

use glam::DVec2;
use procart_core::{
    ArtParameters, AudioData, DrawCommand, FractalType, Palette, Pattern, PaletteSelector,
    RecordingSurface, Shape,
};
use procart_render::raster::RasterSurface;
use procart_render::render_frame;
use procart_render::svg::to_svg;
use proptest::prelude::*;

fn fractal(kind: FractalType, iterations: u32) -> ArtParameters {
    ArtParameters {
        pattern: Pattern::Fractal,
        fractal_type: kind,
        fractal_iterations: iterations,
        ..ArtParameters::default()
    }
}

fn raster(params: &ArtParameters, time: f64, audio: AudioData) -> Vec<u8> {
    let mut surface = RasterSurface::new(96, 64).unwrap();
    render_frame(&mut surface, time, params, audio);
    surface.to_rgba()
}

fn recorded(params: &ArtParameters, time: f64) -> RecordingSurface {
    let mut surface = RecordingSurface::new(400, 300);
    render_frame(&mut surface, time, params, AudioData::neutral());
    surface
}

#[test]
fn identical_inputs_give_identical_pixels() {
    for pattern in Pattern::ALL {
        let params = ArtParameters {
            pattern,
            fractal_type: FractalType::Julia,
            fractal_iterations: 40,
            ..ArtParameters::default()
        };
        let a = raster(&params, 1234.5, AudioData::neutral());
        let b = raster(&params, 1234.5, AudioData::neutral());
        assert_eq!(a, b, "{} is not deterministic", pattern.name());
    }
}

#[test]
fn silent_audio_matches_disabled_audio() {
    for pattern in Pattern::ALL {
        let off = ArtParameters {
            pattern,
            audio_reactive: false,
            ..ArtParameters::default()
        };
        let on = ArtParameters {
            audio_reactive: true,
            ..off.clone()
        };
        assert_eq!(
            raster(&off, 800.0, AudioData::neutral()),
            raster(&on, 800.0, AudioData::neutral()),
            "{} differs under silent audio",
            pattern.name()
        );
    }
}

#[test]
fn koch_and_dragon_terminate_with_bounded_segments() {
    let koch = recorded(&fractal(FractalType::Koch, 10_000), 0.0);
    assert_eq!(koch.shape_count(), 3 * 4usize.pow(5));

    let dragon = recorded(&fractal(FractalType::Dragon, 10_000), 0.0);
    assert!(dragon.shape_count() <= 1 << 12);
}

#[test]
fn escape_time_alpha_is_uniform_on_raster() {
    for kind in [FractalType::Mandelbrot, FractalType::Julia] {
        let params = ArtParameters {
            opacity: 0.55,
            ..fractal(kind, 25)
        };
        let pixels = raster(&params, 300.0, AudioData::neutral());
        let expected = (255.0_f64 * 0.55).floor() as u8;
        assert!(pixels.chunks_exact(4).all(|px| px[3] == expected));
    }
}

#[test]
fn sierpinski_single_iteration_draws_one_triangle() {
    let surface = recorded(&fractal(FractalType::Sierpinski, 1), 0.0);
    assert_eq!(surface.shape_count(), 1);
}

#[test]
fn static_circle_lands_on_the_expected_point() {
    let params = ArtParameters {
        pattern: Pattern::Circles,
        shape_count: 1,
        complexity: 1,
        ..ArtParameters::default()
    };
    let surface = recorded(&params, 0.0);
    let expected = DVec2::new(200.0 + 0.3 * 300.0 * 0.5, 150.0);
    match &surface.commands()[1] {
        DrawCommand::Fill {
            shape: Shape::Circle { center, .. },
            paint,
        } => {
            assert!((*center - expected).length() < 1e-9);
            assert_eq!(paint.color, Palette::sunset().color(0));
        }
        other => panic!("expected circle, got {other:?}"),
    }
}

#[test]
fn vector_export_covers_every_geometric_renderer() {
    let mut cases: Vec<ArtParameters> = [
        Pattern::Circles,
        Pattern::Triangles,
        Pattern::Lines,
        Pattern::Stars,
        Pattern::Spiral,
    ]
    .into_iter()
    .map(|pattern| ArtParameters {
        pattern,
        ..ArtParameters::default()
    })
    .collect();
    for kind in [
        FractalType::Sierpinski,
        FractalType::Koch,
        FractalType::Dragon,
        FractalType::Mandala,
    ] {
        cases.push(fractal(kind, 4));
    }

    for params in cases {
        let surface = recorded(&params, 500.0);
        let svg = to_svg(&surface).unwrap();
        assert!(svg.contains("<radialGradient"));
        assert!(svg.matches("/>").count() >= surface.shape_count());
    }
}

#[test]
fn vector_export_rejects_escape_time_fractals() {
    for kind in [FractalType::Mandelbrot, FractalType::Julia] {
        let mut surface = RecordingSurface::new(20, 20);
        render_frame(&mut surface, 0.0, &fractal(kind, 10), AudioData::neutral());
        assert!(to_svg(&surface).is_err());
    }
}

#[test]
fn literal_palette_is_used_verbatim() {
    let colors = Palette::fire().colors().to_vec();
    let params = ArtParameters {
        pattern: Pattern::Spiral,
        shape_count: 7,
        color_palette: PaletteSelector::Literal(colors.clone()),
        ..ArtParameters::default()
    };
    let surface = recorded(&params, 0.0);
    let fills: Vec<_> = surface
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Fill { paint, .. } => Some(paint.color),
            _ => None,
        })
        .collect();
    for (i, color) in fills.iter().enumerate() {
        assert_eq!(*color, colors[i % colors.len()]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn palette_index_cycles_for_any_shape_count(
        shape_count in 6u32..200,
        time in 0.0f64..10_000.0,
        pattern_index in 0usize..4,
    ) {
        let patterns = [
            Pattern::Circles,
            Pattern::Triangles,
            Pattern::Lines,
            Pattern::Spiral,
        ];
        let pattern = patterns[pattern_index];
        let params = ArtParameters {
            pattern,
            shape_count,
            ..ArtParameters::default()
        };
        let surface = recorded(&params, time);
        let palette = Palette::sunset();
        let colors: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Fill { paint, .. } | DrawCommand::Stroke { paint, .. } => {
                    Some(paint.color)
                }
                _ => None,
            })
            .collect();
        prop_assert_eq!(colors.len(), shape_count as usize);
        for (i, color) in colors.into_iter().enumerate() {
            prop_assert_eq!(color, palette.color(i % palette.len()));
        }
    }

    #[test]
    fn frequency_shifts_palette_by_bucket(
        frequency in 0.0f64..1.0,
        shape_count in 1u32..40,
    ) {
        let params = ArtParameters {
            pattern: Pattern::Circles,
            shape_count,
            audio_reactive: true,
            ..ArtParameters::default()
        };
        let audio = AudioData { volume: 0.0, frequency };
        let mut surface = RecordingSurface::new(100, 100);
        render_frame(&mut surface, 0.0, &params, audio);
        let palette = Palette::sunset();
        let offset = (frequency * palette.len() as f64).floor() as usize;
        let fills = surface.commands().iter().filter_map(|cmd| match cmd {
            DrawCommand::Fill { paint, .. } => Some(paint.color),
            _ => None,
        });
        for (i, color) in fills.enumerate() {
            prop_assert_eq!(color, palette.color(i + offset));
        }
    }
}

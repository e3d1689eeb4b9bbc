//! The "shuffle" action: a uniformly sampled, independently valid parameter vector.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::background::Background;
use crate::color::Srgb;
use crate::palette::{Palette, PaletteSelector};
use crate::params::{ranges, ArtParameters, FractalType, Pattern};
use crate::prng::Xorshift64;

/// Probability that a shuffled artwork is animated.
const ANIMATED_PROBABILITY: f64 = 0.7;

/// User-defined palettes keyed by name.
pub type CustomPalettes = BTreeMap<String, Vec<Srgb>>;

/// Samples every field of [`ArtParameters`] independently.
///
/// The palette is drawn uniformly from the built-in names plus every
/// non-empty custom palette; a custom pick becomes a literal color list.
/// Audio reactivity is always left off.
pub fn randomize(rng: &mut Xorshift64, custom_palettes: &CustomPalettes) -> ArtParameters {
    let pattern = *rng.pick(&Pattern::ALL).unwrap_or(&Pattern::Circles);
    let color_palette = pick_palette(rng, custom_palettes);
    let shape_count = rng.next_u32_inclusive(ranges::SHAPE_COUNT.0, ranges::SHAPE_COUNT.1);
    let shape_size = rng.next_u32_inclusive(ranges::SHAPE_SIZE.0, ranges::SHAPE_SIZE.1) as f64;
    let animation_speed = round_to(rng.next_range(ranges::SPEED.0, ranges::SPEED.1), 1);
    let rotation_speed = round_to(rng.next_range(ranges::SPEED.0, ranges::SPEED.1), 1);
    let opacity = round_to(rng.next_range(ranges::OPACITY.0, ranges::OPACITY.1), 2);
    let complexity = rng.next_u32_inclusive(ranges::COMPLEXITY.0, ranges::COMPLEXITY.1);
    let is_animated = rng.next_bool(ANIMATED_PROBABILITY);
    let background_color = rng
        .pick(Background::list_names())
        .map(|s| s.to_string())
        .unwrap_or_else(|| crate::background::DEFAULT_BACKGROUND.to_string());
    let fractal_type = *rng.pick(&FractalType::ALL).unwrap_or(&FractalType::Mandelbrot);
    let fractal_iterations = rng.next_u32_inclusive(
        ranges::FRACTAL_ITERATIONS.0,
        ranges::FRACTAL_ITERATIONS.1,
    );
    let fractal_scale = round_to(
        rng.next_range(ranges::FRACTAL_SCALE.0, ranges::FRACTAL_SCALE.1),
        2,
    );
    let fractal_angle = round_to(rng.next_range(0.0, PI), 2);

    ArtParameters {
        pattern,
        color_palette,
        shape_count,
        shape_size,
        animation_speed,
        rotation_speed,
        opacity,
        complexity,
        is_animated,
        audio_reactive: false,
        background_color,
        custom_background: None,
        fractal_type,
        fractal_iterations,
        fractal_scale,
        fractal_angle,
    }
}

fn pick_palette(rng: &mut Xorshift64, custom: &CustomPalettes) -> PaletteSelector {
    let builtin = Palette::list_names();
    let usable: Vec<&Vec<Srgb>> = custom.values().filter(|c| !c.is_empty()).collect();
    let choice = rng.next_usize(builtin.len() + usable.len());
    match builtin.get(choice) {
        Some(name) => PaletteSelector::Named(name.to_string()),
        None => PaletteSelector::Literal(usable[choice - builtin.len()].clone()),
    }
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale
}

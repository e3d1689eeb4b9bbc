#![deny(unsafe_code)]
//! Shape pattern renderers.
//!
//! Each renderer places `shapeCount` primitives along a locus that turns
//! with time. Shape `i` sits at angle
//! `θᵢ = (i / shapeCount)·2π·complexity + time·animationSpeed·0.01`
//! (stars drop the complexity factor). Color is `palette[i + offset]`
//! and alpha is the frame opacity for every shape.

mod circles;
mod lines;
mod spiral;
mod stars;
mod triangles;

pub use circles::Circles;
pub use lines::Lines;
pub use spiral::Spiral;
pub use stars::Stars;
pub use triangles::Triangles;

use std::f64::consts::TAU;

/// Time scale for the drift of the whole locus.
const DRIFT_RATE: f64 = 0.01;
/// Time scale for pulsing primitive sizes.
const PULSE_RATE: f64 = 0.01;
/// Time scale for wobble and twist driven by `rotationSpeed`.
const TWIST_RATE: f64 = 0.005;
/// Time scale for per-shape spin driven by `rotationSpeed`.
const SPIN_RATE: f64 = 0.01;

/// Angle of shape `i` on the locus.
fn locus_angle(i: u32, count: u32, turns: f64, time: f64, speed: f64) -> f64 {
    (i as f64 / count as f64) * TAU * turns + time * speed * DRIFT_RATE
}

/// `sin(time·0.01 + i)`, the per-shape size pulse.
fn pulse(time: f64, i: u32) -> f64 {
    (time * PULSE_RATE + i as f64).sin()
}

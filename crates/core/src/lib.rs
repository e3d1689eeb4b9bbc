#![deny(unsafe_code)]
//! Core types and traits for procart, a procedural 2-D art renderer.
//!
//! Provides the `ArtParameters` vector, palette and background resolution,
//! audio modulation, the `Surface` drawing trait (with a vector-recording
//! implementation), the `Renderer` trait, the `Xorshift64` PRNG, and the
//! parameter randomizer.

pub mod audio;
pub mod background;
pub mod color;
pub mod error;
pub mod palette;
pub mod params;
pub mod prng;
pub mod randomize;
pub mod renderer;
pub mod surface;

pub use audio::{AudioData, Modulation};
pub use background::Background;
pub use color::Srgb;
pub use error::EngineError;
pub use palette::{Palette, PaletteSelector};
pub use params::{ArtParameters, FractalType, Pattern};
pub use prng::Xorshift64;
pub use randomize::{randomize, CustomPalettes};
pub use renderer::{Frame, Renderer};
pub use surface::{DrawCommand, Glow, Paint, PixelBuffer, RecordingSurface, Shape, Surface};

//! The 2-D drawing surface renderers draw into.
//!
//! [`Surface`] is an immediate-mode API with no hidden style state: every
//! call carries its complete [`Paint`], so no renderer depends on attributes
//! left behind by another. Geometry is expressed in surface pixels.
//!
//! Only the escape-time fractals use [`Surface::put_pixels`]; everything else
//! goes through shapes, which is what lets a [`RecordingSurface`] stand in for
//! a raster one and be serialized as vector output.

use glam::DVec2;

use crate::color::Srgb;
use crate::error::EngineError;

/// A drawable primitive in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle { center: DVec2, radius: f64 },
    /// Closed polygon; the last vertex connects back to the first.
    Polygon(Vec<DVec2>),
    Segment { from: DVec2, to: DVec2 },
}

/// Soft halo drawn around a primitive, like a canvas shadow with zero offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Srgb,
    pub blur: f64,
}

/// Complete style for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Srgb,
    /// Global alpha in [0, 1].
    pub alpha: f64,
    pub glow: Option<Glow>,
}

impl Paint {
    pub fn new(color: Srgb, alpha: f64) -> Self {
        Self {
            color,
            alpha,
            glow: None,
        }
    }

    pub fn with_glow(mut self, color: Srgb, blur: f64) -> Self {
        self.glow = Some(Glow { color, blur });
        self
    }
}

/// Straight (non-premultiplied) RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Creates a transparent buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Writes one pixel. Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Reads one pixel, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Immediate-mode drawing target.
///
/// Object-safe: renderers take `&mut dyn Surface`.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Erases the whole surface to transparent.
    fn clear(&mut self);

    /// Fills the whole surface with a radial gradient from `inner` at
    /// `center` to `outer` at distance `radius`; beyond it the outer color holds.
    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Srgb, outer: Srgb);

    /// Fills a shape. Segments have no area and draw nothing.
    fn fill(&mut self, shape: &Shape, paint: &Paint);

    /// Strokes a shape's outline with the given line width.
    fn stroke(&mut self, shape: &Shape, paint: &Paint, line_width: f64);

    /// Replaces pixels with `pixels`, anchored at the origin, without blending.
    fn put_pixels(&mut self, pixels: &PixelBuffer);

    /// False for surfaces that keep drawing commands rather than pixels.
    fn is_raster(&self) -> bool {
        true
    }
}

/// One recorded call on a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    RadialGradient {
        center: DVec2,
        radius: f64,
        inner: Srgb,
        outer: Srgb,
    },
    Fill {
        shape: Shape,
        paint: Paint,
    },
    Stroke {
        shape: Shape,
        paint: Paint,
        line_width: f64,
    },
    PutPixels(PixelBuffer),
}

/// Vector-recording surface: keeps every draw call instead of pixels.
///
/// `clear` discards what was recorded, matching what clearing does to a
/// raster surface.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last clear, in call order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded fill and stroke calls.
    pub fn shape_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill { .. } | DrawCommand::Stroke { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Srgb, outer: Srgb) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            inner,
            outer,
        });
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        self.commands.push(DrawCommand::Fill {
            shape: shape.clone(),
            paint: *paint,
        });
    }

    fn stroke(&mut self, shape: &Shape, paint: &Paint, line_width: f64) {
        self.commands.push(DrawCommand::Stroke {
            shape: shape.clone(),
            paint: *paint,
            line_width,
        });
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        self.commands.push(DrawCommand::PutPixels(pixels.clone()));
    }

    fn is_raster(&self) -> bool {
        false
    }
}

//! CPU raster [`Surface`] backed by a tiny-skia pixmap.
//!
//! Geometry arrives in logical pixels. A surface created with
//! [`RasterSurface::with_scale`] keeps reporting the logical size to renderers
//! and scales every draw call onto a larger pixmap, which is how high
//! resolution stills are produced.
//!
//! Glow is approximated with translucent halo strokes drawn under the shape.

use glam::DVec2;
use procart_core::{EngineError, Glow, Paint, PixelBuffer, Shape, Srgb, Surface};
use tiny_skia as sk;

/// Number of halo strokes drawn for a glow.
const HALO_PASSES: u32 = 3;
/// Alpha of the innermost halo relative to the shape's alpha.
const HALO_ALPHA: f64 = 0.3;

pub struct RasterSurface {
    pixmap: sk::Pixmap,
    width: u32,
    height: u32,
    scale: u32,
}

impl RasterSurface {
    /// Creates a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, EngineError> {
        Self::with_scale(width, height, 1)
    }

    /// Creates a surface of logical size `width × height` whose pixmap is
    /// `scale` times larger in each direction.
    pub fn with_scale(width: u32, height: u32, scale: u32) -> Result<Self, EngineError> {
        if scale == 0 {
            return Err(EngineError::InvalidParameter {
                name: "scale".into(),
                reason: "must be at least 1".into(),
            });
        }
        let pw = width.checked_mul(scale).ok_or(EngineError::InvalidDimensions)?;
        let ph = height.checked_mul(scale).ok_or(EngineError::InvalidDimensions)?;
        let pixmap = sk::Pixmap::new(pw, ph).ok_or(EngineError::InvalidDimensions)?;
        Ok(Self {
            pixmap,
            width,
            height,
            scale,
        })
    }

    /// Width of the backing pixmap in device pixels.
    pub fn pixel_width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height of the backing pixmap in device pixels.
    pub fn pixel_height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha RGBA8 copy of the device pixels, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Straight-alpha color of one device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    fn transform(&self) -> sk::Transform {
        let s = self.scale as f32;
        sk::Transform::from_scale(s, s)
    }

    fn stroke_path(&mut self, path: &sk::Path, color: Srgb, alpha: f64, width: f64) {
        let stroke = sk::Stroke {
            width: width as f32,
            ..sk::Stroke::default()
        };
        let transform = self.transform();
        self.pixmap
            .stroke_path(path, &solid(color, alpha), &stroke, transform, None);
    }

    fn halo(&mut self, path: &sk::Path, glow: &Glow, alpha: f64, base_width: f64) {
        if glow.blur <= 0.0 {
            return;
        }
        for pass in (1..=HALO_PASSES).rev() {
            let spread = glow.blur * pass as f64 / HALO_PASSES as f64;
            let halo_alpha = alpha * HALO_ALPHA / pass as f64;
            self.stroke_path(path, glow.color, halo_alpha, base_width + spread);
        }
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.pixmap.fill(sk::Color::TRANSPARENT);
    }

    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Srgb, outer: Srgb) {
        let Some(rect) = sk::Rect::from_xywh(0.0, 0.0, self.width as f32, self.height as f32)
        else {
            return;
        };
        let c = sk::Point::from_xy(center.x as f32, center.y as f32);
        let shader = sk::RadialGradient::new(
            c,
            c,
            radius as f32,
            vec![
                sk::GradientStop::new(0.0, skia_color(inner, 1.0)),
                sk::GradientStop::new(1.0, skia_color(outer, 1.0)),
            ],
            sk::SpreadMode::Pad,
            sk::Transform::identity(),
        )
        // A degenerate radius has no gradient; the rim color covers everything.
        .unwrap_or(sk::Shader::SolidColor(skia_color(outer, 1.0)));

        let paint = sk::Paint {
            shader,
            ..sk::Paint::default()
        };
        let transform = self.transform();
        self.pixmap.fill_rect(rect, &paint, transform, None);
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        if matches!(shape, Shape::Segment { .. }) {
            return;
        }
        let Some(path) = shape_path(shape) else {
            return;
        };
        if let Some(glow) = &paint.glow {
            self.halo(&path, glow, paint.alpha, 0.0);
        }
        let transform = self.transform();
        self.pixmap.fill_path(
            &path,
            &solid(paint.color, paint.alpha),
            sk::FillRule::Winding,
            transform,
            None,
        );
    }

    fn stroke(&mut self, shape: &Shape, paint: &Paint, line_width: f64) {
        let Some(path) = shape_path(shape) else {
            return;
        };
        if let Some(glow) = &paint.glow {
            self.halo(&path, glow, paint.alpha, line_width);
        }
        self.stroke_path(&path, paint.color, paint.alpha, line_width);
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        let mut data = pixels.data().to_vec();
        premultiply_rgba_in_place(&mut data);

        if self.scale == 1 {
            copy_rows(&mut self.pixmap, pixels.width(), pixels.height(), &data);
            return;
        }

        let Some(size) = sk::IntSize::from_wh(pixels.width(), pixels.height()) else {
            return;
        };
        let Some(source) = sk::Pixmap::from_vec(data, size) else {
            return;
        };
        let paint = sk::PixmapPaint {
            opacity: 1.0,
            blend_mode: sk::BlendMode::Source,
            quality: sk::FilterQuality::Nearest,
        };
        let transform = self.transform();
        self.pixmap
            .draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }
}

/// Copies premultiplied rows into the top-left corner of `pixmap`, clipped
/// to its bounds.
fn copy_rows(pixmap: &mut sk::Pixmap, width: u32, height: u32, data: &[u8]) {
    let dst_stride = pixmap.width() as usize * 4;
    let src_stride = width as usize * 4;
    let row_len = src_stride.min(dst_stride);
    let rows = height.min(pixmap.height()) as usize;
    let dst = pixmap.data_mut();
    for y in 0..rows {
        dst[y * dst_stride..y * dst_stride + row_len]
            .copy_from_slice(&data[y * src_stride..y * src_stride + row_len]);
    }
}

fn premultiply_rgba_in_place(bytes: &mut [u8]) {
    for pixel in bytes.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        pixel[0] = ((pixel[0] as u16 * alpha + 127) / 255) as u8;
        pixel[1] = ((pixel[1] as u16 * alpha + 127) / 255) as u8;
        pixel[2] = ((pixel[2] as u16 * alpha + 127) / 255) as u8;
    }
}

fn skia_color(color: Srgb, alpha: f64) -> sk::Color {
    let [r, g, b] = color.to_rgb8();
    let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    sk::Color::from_rgba8(r, g, b, (a * 255.0).round() as u8)
}

fn solid(color: Srgb, alpha: f64) -> sk::Paint<'static> {
    let mut paint = sk::Paint::default();
    paint.set_color(skia_color(color, alpha));
    paint
}

/// Builds a path for a shape, or `None` when it has no drawable geometry.
fn shape_path(shape: &Shape) -> Option<sk::Path> {
    match shape {
        Shape::Circle { center, radius } => {
            sk::PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32)
        }
        Shape::Polygon(vertices) => {
            let (first, rest) = vertices.split_first()?;
            let mut pb = sk::PathBuilder::new();
            pb.move_to(first.x as f32, first.y as f32);
            for v in rest {
                pb.line_to(v.x as f32, v.y as f32);
            }
            pb.close();
            pb.finish()
        }
        Shape::Segment { from, to } => {
            let mut pb = sk::PathBuilder::new();
            pb.move_to(from.x as f32, from.y as f32);
            pb.line_to(to.x as f32, to.y as f32);
            pb.finish()
        }
    }
}

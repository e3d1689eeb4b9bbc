use std::f64::consts::TAU;

use glam::DVec2;
use procart_core::{Paint, PixelBuffer, Shape, Srgb, Surface};
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, ImageData};

/// [`Surface`] over a canvas 2D context.
///
/// Each call sets every style attribute it uses and resets the shadow
/// afterwards, so no state leaks between calls. Canvas errors (which only
/// occur for invalid geometry such as a negative radius) are ignored.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        Self { ctx, width, height }
    }

    fn apply(&self, paint: &Paint) {
        self.ctx.set_global_alpha(paint.alpha.clamp(0.0, 1.0));
        match &paint.glow {
            Some(glow) => {
                self.ctx.set_shadow_color(&glow.color.to_hex());
                self.ctx.set_shadow_blur(glow.blur);
            }
            None => self.ctx.set_shadow_blur(0.0),
        }
    }

    fn reset(&self) {
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_global_alpha(1.0);
    }

    fn trace(&self, shape: &Shape) {
        self.ctx.begin_path();
        match shape {
            Shape::Circle { center, radius } => {
                let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
            }
            Shape::Polygon(vertices) => {
                if let Some((first, rest)) = vertices.split_first() {
                    self.ctx.move_to(first.x, first.y);
                    for v in rest {
                        self.ctx.line_to(v.x, v.y);
                    }
                    self.ctx.close_path();
                }
            }
            Shape::Segment { from, to } => {
                self.ctx.move_to(from.x, from.y);
                self.ctx.line_to(to.x, to.y);
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill_radial_gradient(&mut self, center: DVec2, radius: f64, inner: Srgb, outer: Srgb) {
        let (x, y) = (center.x, center.y);
        let Ok(gradient) = self
            .ctx
            .create_radial_gradient(x, y, 0.0, x, y, radius.max(0.0))
        else {
            return;
        };
        let _ = gradient.add_color_stop(0.0, &inner.to_hex());
        let _ = gradient.add_color_stop(1.0, &outer.to_hex());
        self.reset();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn fill(&mut self, shape: &Shape, paint: &Paint) {
        if matches!(shape, Shape::Segment { .. }) {
            return;
        }
        self.apply(paint);
        self.ctx.set_fill_style_str(&paint.color.to_hex());
        self.trace(shape);
        self.ctx.fill();
        self.reset();
    }

    fn stroke(&mut self, shape: &Shape, paint: &Paint, line_width: f64) {
        self.apply(paint);
        self.ctx.set_stroke_style_str(&paint.color.to_hex());
        self.ctx.set_line_width(line_width);
        self.trace(shape);
        self.ctx.stroke();
        self.reset();
    }

    fn put_pixels(&mut self, pixels: &PixelBuffer) {
        let Ok(image) = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(pixels.data()),
            pixels.width(),
            pixels.height(),
        ) else {
            return;
        };
        let _ = self.ctx.put_image_data(&image, 0.0, 0.0);
    }
}

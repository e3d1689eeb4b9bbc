//! Vector export: serializes a [`RecordingSurface`] as SVG text.
//!
//! Every recorded shape becomes one SVG element in call order, so the output
//! mirrors the drawing commands one to one. Glows become drop-shadow filters
//! shared between elements with the same color and blur. Pixel content from
//! the escape-time fractals cannot be expressed and fails the export.

use std::collections::BTreeMap;

use glam::DVec2;
use procart_core::{DrawCommand, EngineError, Glow, Paint, RecordingSurface, Shape, Srgb, Surface};

/// Renders the recorded commands as a standalone SVG document.
///
/// Returns `EngineError::RasterOnly` if any command carries raw pixels.
pub fn to_svg(surface: &RecordingSurface) -> Result<String, EngineError> {
    let mut doc = SvgDocument::default();
    for command in surface.commands() {
        match command {
            DrawCommand::RadialGradient {
                center,
                radius,
                inner,
                outer,
            } => doc.gradient_rect(surface, *center, *radius, *inner, *outer),
            DrawCommand::Fill { shape, paint } => doc.shape(shape, paint, None),
            DrawCommand::Stroke {
                shape,
                paint,
                line_width,
            } => doc.shape(shape, paint, Some(*line_width)),
            DrawCommand::PutPixels(_) => {
                return Err(EngineError::RasterOnly(
                    "escape-time fractal pixels have no vector form".into(),
                ))
            }
        }
    }
    Ok(doc.finish(surface.width(), surface.height()))
}

#[derive(Default)]
struct SvgDocument {
    defs: String,
    body: String,
    gradients: usize,
    /// Filter ids keyed by `color/blur`.
    filters: BTreeMap<String, String>,
}

impl SvgDocument {
    fn gradient_rect(
        &mut self,
        surface: &RecordingSurface,
        center: DVec2,
        radius: f64,
        inner: Srgb,
        outer: Srgb,
    ) {
        let id = format!("bg{}", self.gradients);
        self.gradients += 1;
        self.defs.push_str(&format!(
            "<radialGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" \
             cx=\"{}\" cy=\"{}\" r=\"{}\">\
             <stop offset=\"0\" stop-color=\"{}\"/>\
             <stop offset=\"1\" stop-color=\"{}\"/></radialGradient>\n",
            num(center.x),
            num(center.y),
            num(radius.max(0.0)),
            inner.to_hex(),
            outer.to_hex(),
        ));
        self.body.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"url(#{id})\"/>\n",
            surface.width(),
            surface.height(),
        ));
    }

    fn shape(&mut self, shape: &Shape, paint: &Paint, line_width: Option<f64>) {
        let geometry = match (shape, line_width) {
            (Shape::Segment { .. }, None) => return,
            (Shape::Circle { center, radius }, _) => format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                num(center.x),
                num(center.y),
                num(radius.abs())
            ),
            (Shape::Polygon(vertices), _) => {
                let points: Vec<String> = vertices
                    .iter()
                    .map(|v| format!("{},{}", num(v.x), num(v.y)))
                    .collect();
                format!("<polygon points=\"{}\"", points.join(" "))
            }
            (Shape::Segment { from, to }, Some(_)) => format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y)
            ),
        };

        let color = paint.color.to_hex();
        let alpha = num(paint.alpha.clamp(0.0, 1.0));
        let style = match line_width {
            Some(width) => format!(
                " fill=\"none\" stroke=\"{color}\" stroke-opacity=\"{alpha}\" stroke-width=\"{}\"",
                num(width)
            ),
            None => format!(" fill=\"{color}\" fill-opacity=\"{alpha}\""),
        };
        let filter = paint
            .glow
            .map(|glow| format!(" filter=\"url(#{})\"", self.glow_filter(&glow)))
            .unwrap_or_default();

        self.body.push_str(&geometry);
        self.body.push_str(&style);
        self.body.push_str(&filter);
        self.body.push_str("/>\n");
    }

    fn glow_filter(&mut self, glow: &Glow) -> String {
        let key = format!("{}/{}", glow.color.to_hex(), num(glow.blur));
        if let Some(id) = self.filters.get(&key) {
            return id.clone();
        }
        let id = format!("glow{}", self.filters.len());
        // Canvas shadow blur is roughly twice the Gaussian deviation.
        self.defs.push_str(&format!(
            "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
             <feDropShadow dx=\"0\" dy=\"0\" stdDeviation=\"{}\" flood-color=\"{}\"/></filter>\n",
            num(glow.blur.max(0.0) / 2.0),
            glow.color.to_hex(),
        ));
        self.filters.insert(key, id.clone());
        id
    }

    fn finish(self, width: u32, height: u32) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
             viewBox=\"0 0 {width} {height}\">\n"
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".into(),
        s => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use procart_core::PixelBuffer;

    fn red() -> Srgb {
        Srgb::from_rgb8(255, 0, 0)
    }

    #[test]
    fn num_trims_trailing_zeros() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(0.12345), "0.123");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(f64::NAN), "0");
    }

    #[test]
    fn empty_surface_is_a_bare_document() {
        let svg = to_svg(&RecordingSurface::new(30, 20)).unwrap();
        let header = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"30\" height=\"20\"";
        assert!(svg.starts_with(header));
        assert!(!svg.contains("<defs>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn one_element_per_shape_in_order() {
        let mut rec = RecordingSurface::new(100, 100);
        rec.fill_radial_gradient(DVec2::splat(50.0), 50.0, red(), red());
        rec.fill(
            &Shape::Circle {
                center: DVec2::new(10.0, 20.0),
                radius: 5.0,
            },
            &Paint::new(red(), 0.5),
        );
        rec.stroke(
            &Shape::Segment {
                from: DVec2::ZERO,
                to: DVec2::new(3.0, 4.0),
            },
            &Paint::new(red(), 1.0),
            3.0,
        );
        let svg = to_svg(&rec).unwrap();

        let rect = svg.find("<rect").unwrap();
        let circle = svg
            .find("<circle cx=\"10\" cy=\"20\" r=\"5\" fill=\"#ff0000\" fill-opacity=\"0.5\"/>")
            .unwrap();
        let line = svg.find("<line x1=\"0\" y1=\"0\" x2=\"3\" y2=\"4\" fill=\"none\"").unwrap();
        assert!(rect < circle && circle < line);
        assert!(svg.contains("stroke-width=\"3\""));
    }

    #[test]
    fn glows_share_filters() {
        let mut rec = RecordingSurface::new(10, 10);
        let paint = Paint::new(red(), 1.0).with_glow(red(), 10.0);
        let dot = Shape::Circle {
            center: DVec2::splat(5.0),
            radius: 1.0,
        };
        rec.fill(&dot, &paint);
        rec.fill(&dot, &paint);
        rec.fill(&dot, &Paint::new(red(), 1.0).with_glow(red(), 4.0));
        let svg = to_svg(&rec).unwrap();
        assert_eq!(svg.matches("<filter ").count(), 2);
        assert_eq!(svg.matches("filter=\"url(#glow0)\"").count(), 2);
        assert!(svg.contains("stdDeviation=\"5\""));
    }

    #[test]
    fn pixel_content_is_rejected() {
        let mut rec = RecordingSurface::new(4, 4);
        rec.put_pixels(&PixelBuffer::new(4, 4).unwrap());
        assert!(matches!(to_svg(&rec), Err(EngineError::RasterOnly(_))));
    }

    #[test]
    fn filled_segments_are_skipped() {
        let mut rec = RecordingSurface::new(4, 4);
        rec.fill(
            &Shape::Segment {
                from: DVec2::ZERO,
                to: DVec2::ONE,
            },
            &Paint::new(red(), 1.0),
        );
        assert!(!to_svg(&rec).unwrap().contains("<line"));
    }
}

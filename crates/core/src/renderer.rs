//! The `Renderer` trait every shape pattern and fractal implements, and the
//! per-frame input bundle handed to it.

use glam::DVec2;

use crate::audio::{AudioData, Modulation};
use crate::color::Srgb;
use crate::palette::Palette;
use crate::params::ArtParameters;
use crate::surface::Surface;

/// Everything a renderer needs for one frame.
///
/// The palette is resolved once here so renderers never look at the
/// named/literal selector themselves.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Timeline position in milliseconds.
    pub time: f64,
    pub params: &'a ArtParameters,
    pub palette: Palette,
    pub modulation: Modulation,
}

impl<'a> Frame<'a> {
    pub fn new(time: f64, params: &'a ArtParameters, audio: AudioData) -> Self {
        let palette = params.color_palette.resolve();
        let modulation = Modulation::new(params.audio_reactive, audio, palette.len());
        Self {
            time,
            params,
            palette,
            modulation,
        }
    }

    /// Palette color for shape `i`, shifted by the audio color offset.
    pub fn shape_color(&self, i: usize) -> Srgb {
        self.palette.color(i + self.modulation.color_offset)
    }

    /// Opacity clamped to [0, 1].
    pub fn opacity(&self) -> f64 {
        if self.params.opacity.is_nan() {
            0.0
        } else {
            self.params.opacity.clamp(0.0, 1.0)
        }
    }
}

/// Center of a surface in pixels.
pub fn surface_center(surface: &dyn Surface) -> DVec2 {
    DVec2::new(surface.width() as f64 / 2.0, surface.height() as f64 / 2.0)
}

/// The shorter side of a surface in pixels.
pub fn min_dim(surface: &dyn Surface) -> f64 {
    surface.width().min(surface.height()) as f64
}

/// Draws one frame of a pattern or fractal.
///
/// Implementations are pure functions of `(surface size, frame)`: no state
/// carries between calls. This trait is object-safe.
pub trait Renderer {
    /// Short key used in logs and listings.
    fn name(&self) -> &'static str;

    /// Draws on top of whatever the surface already holds.
    fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteSelector;
    use crate::surface::RecordingSurface;

    struct Dot;

    impl Renderer for Dot {
        fn name(&self) -> &'static str {
            "dot"
        }

        fn render(&self, surface: &mut dyn Surface, frame: &Frame<'_>) {
            let center = surface_center(surface);
            surface.fill(
                &crate::surface::Shape::Circle { center, radius: 1.0 },
                &crate::surface::Paint::new(frame.shape_color(0), frame.opacity()),
            );
        }
    }

    #[test]
    fn renderer_trait_is_object_safe() {
        let renderer: Box<dyn Renderer> = Box::new(Dot);
        let params = ArtParameters::default();
        let frame = Frame::new(0.0, &params, AudioData::neutral());
        let mut surface = RecordingSurface::new(10, 6);
        renderer.render(&mut surface, &frame);
        assert_eq!(renderer.name(), "dot");
        assert_eq!(surface.shape_count(), 1);
    }

    #[test]
    fn frame_resolves_palette_once() {
        let mut params = ArtParameters::default();
        params.color_palette = PaletteSelector::Named("fire".into());
        let frame = Frame::new(0.0, &params, AudioData::neutral());
        assert_eq!(frame.palette, Palette::fire());
    }

    #[test]
    fn shape_color_applies_audio_offset_only_when_reactive() {
        let mut params = ArtParameters::default();
        let audio = AudioData {
            volume: 0.0,
            frequency: 0.5,
        };
        let quiet = Frame::new(0.0, &params, audio);
        assert_eq!(quiet.shape_color(0), quiet.palette.color(0));

        params.audio_reactive = true;
        let loud = Frame::new(0.0, &params, audio);
        assert_eq!(loud.shape_color(0), loud.palette.color(2));
    }

    #[test]
    fn opacity_is_clamped() {
        let mut params = ArtParameters::default();
        params.opacity = 3.0;
        assert_eq!(Frame::new(0.0, &params, AudioData::neutral()).opacity(), 1.0);
    }

    #[test]
    fn geometry_helpers() {
        let s = RecordingSurface::new(200, 100);
        assert_eq!(surface_center(&s), DVec2::new(100.0, 50.0));
        assert_eq!(min_dim(&s), 100.0);
    }
}

//! The frame compositor: clear, paint the background gradient, dispatch.

use glam::DVec2;
use procart_core::renderer::surface_center;
use procart_core::{ArtParameters, AudioData, Background, Frame, Renderer, Surface};
use tracing::debug;

use crate::RendererKind;

/// Renders one complete frame onto `surface`.
///
/// Pure with respect to its inputs: the same time, parameters, audio and
/// surface size always produce the same drawing calls. A surface with no
/// area is left untouched.
pub fn render_frame(
    surface: &mut dyn Surface,
    time: f64,
    params: &ArtParameters,
    audio: AudioData,
) {
    render_frame_with_extent(surface, time, params, audio, None);
}

/// Like [`render_frame`], but sizes the background gradient from `extent`
/// instead of the surface size.
///
/// Callers that draw through a zoom transform pass the zoomed extent here so
/// the gradient still reaches the physical edges.
pub fn render_frame_with_extent(
    surface: &mut dyn Surface,
    time: f64,
    params: &ArtParameters,
    audio: AudioData,
    extent: Option<DVec2>,
) {
    let (width, height) = (surface.width(), surface.height());
    if width == 0 || height == 0 {
        debug!(width, height, "empty surface, skipping frame");
        return;
    }

    let frame = Frame::new(time, params, audio);
    let background = Background::resolve(
        &params.background_color,
        params.custom_background.as_ref(),
    );
    let extent = extent.unwrap_or_else(|| DVec2::new(width as f64, height as f64));

    surface.clear();
    surface.fill_radial_gradient(
        surface_center(surface),
        extent.max_element() / 2.0,
        background.primary,
        background.secondary,
    );

    let renderer = RendererKind::from_pattern(params.pattern);
    debug!(renderer = renderer.name(), time, width, height, "render frame");
    renderer.render(surface, &frame);
}

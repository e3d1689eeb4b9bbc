//! PNG, GIF and PNG-sequence writers for a [`RasterSurface`].
//!
//! This module is feature-gated behind `png` (default on) so that WASM builds
//! can depend on this crate without pulling in the `image` crate.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, RgbaImage};
use procart_core::EngineError;
use tracing::debug;

use crate::raster::RasterSurface;

/// Frames in an animated GIF export.
pub const GIF_FRAMES: u32 = 60;
/// Delay between GIF frames in milliseconds.
pub const GIF_DELAY_MS: u32 = 50;
/// Virtual frame rate of a PNG frame sequence meant for video muxing.
pub const SEQUENCE_FPS: u32 = 30;
/// Frames in a PNG sequence export: five seconds at [`SEQUENCE_FPS`].
pub const SEQUENCE_FRAMES: u32 = 150;

fn io_err(e: impl std::fmt::Display) -> EngineError {
    EngineError::Io(e.to_string())
}

/// Copies the surface's device pixels into an owned image.
pub fn to_image(surface: &RasterSurface) -> Result<RgbaImage, EngineError> {
    RgbaImage::from_raw(surface.pixel_width(), surface.pixel_height(), surface.to_rgba())
        .ok_or_else(|| EngineError::Io("RGBA buffer size mismatch".into()))
}

/// Writes the surface as a PNG image.
///
/// Returns `EngineError::Io` on encode or write failure.
pub fn write_png(surface: &RasterSurface, path: &Path) -> Result<(), EngineError> {
    let img = to_image(surface)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(io_err)
}

/// In-memory staging buffer the GIF encoder writes into.
///
/// Encoded bytes are drained to the real sink after every frame so write
/// failures surface as errors instead of vanishing in the encoder's `Drop`.
#[derive(Clone, Default)]
struct Staging(Rc<RefCell<Vec<u8>>>);

impl Staging {
    fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl Write for Staging {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Streams frames into a looping animated GIF with a fixed delay.
pub struct GifRecorder<W: Write> {
    encoder: GifEncoder<Staging>,
    staging: Staging,
    sink: W,
    delay: Delay,
    frames: usize,
}

impl GifRecorder<BufWriter<File>> {
    /// Creates (or truncates) a GIF file at `path`.
    pub fn create(path: &Path, delay_ms: u32) -> Result<Self, EngineError> {
        let file = File::create(path).map_err(io_err)?;
        Self::new(BufWriter::new(file), delay_ms)
    }
}

impl<W: Write> GifRecorder<W> {
    pub fn new(sink: W, delay_ms: u32) -> Result<Self, EngineError> {
        let staging = Staging::default();
        let mut encoder = GifEncoder::new(staging.clone());
        encoder.set_repeat(Repeat::Infinite).map_err(io_err)?;
        Ok(Self {
            encoder,
            staging,
            sink,
            delay: Delay::from_numer_denom_ms(delay_ms, 1),
            frames: 0,
        })
    }

    /// Appends the surface's current pixels as the next frame.
    pub fn add_frame(&mut self, surface: &RasterSurface) -> Result<(), EngineError> {
        let frame = image::Frame::from_parts(to_image(surface)?, 0, 0, self.delay);
        self.encoder.encode_frame(frame).map_err(io_err)?;
        self.sink.write_all(&self.staging.take()).map_err(io_err)?;
        self.frames += 1;
        debug!(frame = self.frames, "gif frame encoded");
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Writes the GIF trailer, flushes the sink and returns the frame count.
    pub fn finish(self) -> Result<usize, EngineError> {
        let Self {
            encoder,
            staging,
            mut sink,
            frames,
            ..
        } = self;
        // The encoder emits the trailer into staging when dropped.
        drop(encoder);
        sink.write_all(&staging.take()).map_err(io_err)?;
        sink.flush().map_err(io_err)?;
        Ok(frames)
    }
}

/// Writes numbered PNG frames into a directory for an external video muxer.
pub struct FrameSequence {
    dir: PathBuf,
    next: usize,
}

impl FrameSequence {
    /// Creates the directory if needed.
    pub fn create(dir: &Path) -> Result<Self, EngineError> {
        std::fs::create_dir_all(dir).map_err(io_err)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            next: 0,
        })
    }

    /// Path the `index`-th frame is written to.
    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }

    /// Writes the next frame and returns its path.
    pub fn write(&mut self, surface: &RasterSurface) -> Result<PathBuf, EngineError> {
        let path = self.frame_path(self.next);
        write_png(surface, &path)?;
        self.next += 1;
        Ok(path)
    }

    /// Number of frames written so far.
    pub fn len(&self) -> usize {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }
}

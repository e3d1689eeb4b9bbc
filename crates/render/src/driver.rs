//! The animation driver: feeds a timeline to the compositor one frame at a
//! time.
//!
//! A [`FrameClock`] decides when frames happen and what time they carry.
//! Exports use [`FixedRateClock`], a virtual timeline that never sleeps; live
//! playback uses [`RealtimeClock`], which paces frames against the monotonic
//! clock. Scheduling stops when the clock runs out, when the [`CancelToken`]
//! is cancelled, or when the frame callback breaks. A frame that has started
//! always completes before any of those is checked.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use procart_core::{ArtParameters, AudioData, Surface};
use tracing::{debug, trace};

use crate::compositor::render_frame;

/// Source of frame timestamps in milliseconds.
pub trait FrameClock {
    /// Time of the next frame, or `None` when the timeline is over.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Virtual timeline: `start + k · interval` for `k` in `0..frames`.
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    start: f64,
    interval: f64,
    frames: u64,
    next: u64,
}

impl FixedRateClock {
    /// `frames` frames at `fps` frames per second, starting at time 0.
    pub fn new(fps: u32, frames: u64) -> Self {
        Self::from_interval(0.0, 1000.0 / fps.max(1) as f64, frames)
    }

    pub fn from_interval(start: f64, interval: f64, frames: u64) -> Self {
        Self {
            start,
            interval,
            frames,
            next: 0,
        }
    }
}

impl FrameClock for FixedRateClock {
    fn next_frame(&mut self) -> Option<f64> {
        if self.next >= self.frames {
            return None;
        }
        let t = self.start + self.next as f64 * self.interval;
        self.next += 1;
        Some(t)
    }
}

/// Wall-clock pacing at a target refresh rate.
///
/// Time is milliseconds since the first frame. A late frame is not followed
/// by a burst of catch-up frames; the schedule restarts from now.
#[derive(Debug, Clone)]
pub struct RealtimeClock {
    interval: Duration,
    start: Option<Instant>,
    next_deadline: Option<Instant>,
}

impl RealtimeClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / fps.max(1),
            start: None,
            next_deadline: None,
        }
    }
}

impl FrameClock for RealtimeClock {
    fn next_frame(&mut self) -> Option<f64> {
        let now = Instant::now();
        let start = *self.start.get_or_insert(now);
        let deadline = self.next_deadline.unwrap_or(now);
        if deadline > now {
            thread::sleep(deadline - now);
        }
        self.next_deadline = Some(deadline.max(now) + self.interval);
        Some(start.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Shared flag that stops an [`AnimationDriver`] from scheduling more frames.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Supplies the audio snapshot for each frame time.
pub trait AudioSource {
    fn sample(&mut self, time: f64) -> AudioData;
}

impl<F> AudioSource for F
where
    F: FnMut(f64) -> AudioData,
{
    fn sample(&mut self, time: f64) -> AudioData {
        self(time)
    }
}

/// What the frame callback learns about the frame just drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Zero-based frame counter for this run.
    pub index: usize,
    /// Timeline position in milliseconds.
    pub time: f64,
}

/// Drives the compositor from a clock.
pub struct AnimationDriver<C> {
    clock: C,
    cancel: CancelToken,
}

impl<C: FrameClock> AnimationDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cancel: CancelToken::new(),
        }
    }

    /// Uses an existing token, e.g. one shared with a signal handler.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this driver.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Renders frames into `surface`, calling `on_frame` after each one.
    ///
    /// Static parameters (`isAnimated == false`) render a single frame at
    /// time 0 without consulting the clock. Returns the number of frames
    /// rendered.
    pub fn run<S, A, F>(
        &mut self,
        surface: &mut S,
        params: &ArtParameters,
        audio: &mut A,
        mut on_frame: F,
    ) -> usize
    where
        S: Surface,
        A: AudioSource,
        F: FnMut(&S, FrameInfo) -> ControlFlow<()>,
    {
        if self.cancel.is_cancelled() {
            return 0;
        }

        if !params.is_animated {
            render_frame(surface, 0.0, params, audio.sample(0.0));
            let _ = on_frame(surface, FrameInfo { index: 0, time: 0.0 });
            debug!("static frame rendered");
            return 1;
        }

        let mut index = 0;
        while !self.cancel.is_cancelled() {
            let Some(time) = self.clock.next_frame() else {
                break;
            };
            let started = Instant::now();
            render_frame(surface, time, params, audio.sample(time));
            trace!(index, time, elapsed_us = started.elapsed().as_micros() as u64, "frame");

            let flow = on_frame(surface, FrameInfo { index, time });
            index += 1;
            if flow.is_break() {
                break;
            }
        }
        debug!(frames = index, cancelled = self.cancel.is_cancelled(), "animation stopped");
        index
    }
}

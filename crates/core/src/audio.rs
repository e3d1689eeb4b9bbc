//! Audio modulation input.
//!
//! Signal analysis happens elsewhere; renderers only see a volume and a
//! normalized dominant-frequency bucket. With reactivity disabled, or with a
//! silent snapshot, the modulation is exactly the identity.

use serde::{Deserialize, Serialize};

/// Snapshot of the external audio analyser: both fields in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioData {
    pub volume: f64,
    pub frequency: f64,
}

impl AudioData {
    /// The silent snapshot `{0, 0}`.
    pub fn neutral() -> Self {
        Self::default()
    }

    fn clamped(self) -> Self {
        Self {
            volume: unit(self.volume),
            frequency: unit(self.frequency),
        }
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Per-frame scale and palette shift derived from [`AudioData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    /// Multiplier for locus radius and primitive size: `1 + volume`.
    pub volume_factor: f64,
    /// Palette index shift: `floor(frequency * palette_len)`.
    pub color_offset: usize,
}

impl Modulation {
    /// No scaling, no palette shift.
    pub const IDENTITY: Modulation = Modulation {
        volume_factor: 1.0,
        color_offset: 0,
    };

    /// Derives the modulation for one frame.
    ///
    /// Returns [`Modulation::IDENTITY`] when `reactive` is false.
    pub fn new(reactive: bool, audio: AudioData, palette_len: usize) -> Self {
        if !reactive {
            return Self::IDENTITY;
        }
        let audio = audio.clamped();
        Self {
            volume_factor: 1.0 + audio.volume,
            color_offset: (audio.frequency * palette_len as f64).floor() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_reactivity_is_identity_regardless_of_audio() {
        let loud = AudioData {
            volume: 0.9,
            frequency: 0.7,
        };
        assert_eq!(Modulation::new(false, loud, 5), Modulation::IDENTITY);
    }

    #[test]
    fn silent_audio_is_identity_when_reactive() {
        let m = Modulation::new(true, AudioData::neutral(), 5);
        assert_eq!(m, Modulation::IDENTITY);
        assert_eq!(m.volume_factor.to_bits(), 1.0_f64.to_bits());
    }

    #[test]
    fn volume_scales_and_frequency_shifts() {
        let audio = AudioData {
            volume: 0.5,
            frequency: 0.45,
        };
        let m = Modulation::new(true, audio, 5);
        assert!((m.volume_factor - 1.5).abs() < 1e-12);
        assert_eq!(m.color_offset, 2);
    }

    #[test]
    fn out_of_range_audio_is_clamped() {
        let audio = AudioData {
            volume: 4.0,
            frequency: f64::NAN,
        };
        let m = Modulation::new(true, audio, 5);
        assert!((m.volume_factor - 2.0).abs() < 1e-12);
        assert_eq!(m.color_offset, 0);
    }
}

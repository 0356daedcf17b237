//! Narrow adapter between the engine and an externally playing audio source.
//!
//! The engine never sees audio failures: when the source is missing or a
//! query fails, the adapter answers with zero energy and a flat waveform so
//! the scene falls back to ambient motion.

use crate::constants::{BAND_ENERGY_MAX, PLAYBACK_RATE_MAX, PLAYBACK_RATE_MIN, WAVEFORM_LEN};
use crate::error::ChoreoError;

/// Audio playback plus analysis of the current frame, provided by the host.
///
/// - `waveform` fills `out` with the latest time-domain samples in \[-1, 1\]
/// - `band_energy` returns spectral magnitude in `lo_hz..hi_hz`, 0..=255
pub trait AudioSource {
    fn start_loop(&mut self) -> Result<(), ChoreoError>;
    fn set_playback_rate(&mut self, rate: f32) -> Result<(), ChoreoError>;
    fn waveform(&mut self, out: &mut Vec<f32>) -> Result<(), ChoreoError>;
    fn band_energy(&mut self, lo_hz: f32, hi_hz: f32) -> Result<f32, ChoreoError>;
}

/// Clamp a drag-derived rate into the usable playback range.
#[inline]
pub fn clamp_playback_rate(rate: f32) -> f32 {
    if rate.is_finite() {
        rate.clamp(PLAYBACK_RATE_MIN, PLAYBACK_RATE_MAX)
    } else {
        1.0
    }
}

#[inline]
fn sanitize_energy(energy: f32) -> f32 {
    if energy.is_finite() && energy > 0.0 {
        energy.min(BAND_ENERGY_MAX)
    } else {
        0.0
    }
}

pub struct AudioCoupling {
    source: Option<Box<dyn AudioSource>>,
    waveform: Vec<f32>,
    scratch: Vec<f32>,
    playback_rate: f32,
    in_outage: bool,
}

impl AudioCoupling {
    pub fn new(source: Box<dyn AudioSource>) -> Self {
        Self {
            source: Some(source),
            ..Self::silent()
        }
    }

    /// Adapter with no source at all; every query is silent.
    pub fn silent() -> Self {
        Self {
            source: None,
            waveform: vec![0.0; WAVEFORM_LEN],
            scratch: Vec::with_capacity(WAVEFORM_LEN),
            playback_rate: 1.0,
            in_outage: false,
        }
    }

    pub fn is_available(&self) -> bool {
        self.source.is_some()
    }

    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    /// Begin looped playback. Failure leaves the adapter silent.
    pub fn start(&mut self) {
        let result = match self.source.as_mut() {
            Some(s) => s.start_loop(),
            None => return,
        };
        self.track(result);
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate;
        let result = match self.source.as_mut() {
            Some(s) => s.set_playback_rate(rate),
            None => return,
        };
        self.track(result);
    }

    /// Energy in `lo_hz..hi_hz` for the current analysis frame; 0 when unavailable.
    pub fn band_energy(&mut self, lo_hz: f32, hi_hz: f32) -> f32 {
        let result = match self.source.as_mut() {
            Some(s) => s.band_energy(lo_hz, hi_hz),
            None => return 0.0,
        };
        self.track(result).map(sanitize_energy).unwrap_or(0.0)
    }

    /// Pull the latest waveform from the source. On failure the stored
    /// waveform is flattened.
    pub fn refresh_waveform(&mut self) {
        self.scratch.clear();
        let result = match self.source.as_mut() {
            Some(s) => s.waveform(&mut self.scratch),
            None => {
                self.waveform.fill(0.0);
                return;
            }
        };
        if self.track(result).is_none() {
            self.waveform.fill(0.0);
            return;
        }
        for (i, w) in self.waveform.iter_mut().enumerate() {
            let s = self.scratch.get(i).copied().unwrap_or(0.0);
            *w = if s.is_finite() { s.clamp(-1.0, 1.0) } else { 0.0 };
        }
    }

    /// Fixed-length waveform from the last refresh, samples in \[-1, 1\].
    pub fn current_waveform(&self) -> &[f32] {
        &self.waveform
    }

    fn track<T>(&mut self, result: Result<T, ChoreoError>) -> Option<T> {
        match result {
            Ok(v) => {
                if self.in_outage {
                    log::info!("[audio] source recovered");
                    self.in_outage = false;
                }
                Some(v)
            }
            Err(e) => {
                if !self.in_outage {
                    log::warn!("[audio] {e}; continuing silent");
                    self.in_outage = true;
                }
                None
            }
        }
    }
}

impl Default for AudioCoupling {
    fn default() -> Self {
        Self::silent()
    }
}

// Native audio (cpal): a looped synthesized pattern plus a cheap analyzer
// that answers from what is currently sounding.

use choreo_core::{AudioSource, ChoreoError, BAND_ENERGY_MAX, WAVEFORM_LEN};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Sample;
use std::sync::{Arc, Mutex};

const LOOP_BPM: f64 = 96.0;
const LOOP_BEATS: f64 = 8.0;
const MASTER_GAIN: f32 = 0.35;
const ENVELOPE_SEC: f32 = 0.02;

#[derive(Clone, Copy)]
enum WaveKind {
    Sine,
    Saw,
    Triangle,
}

struct LoopStep {
    beat: f64,
    frequency_hz: f32,
    duration_beats: f64,
    velocity: f32,
    wave: WaveKind,
}

const fn step(
    beat: f64,
    frequency_hz: f32,
    duration_beats: f64,
    velocity: f32,
    wave: WaveKind,
) -> LoopStep {
    LoopStep {
        beat,
        frequency_hz,
        duration_beats,
        velocity,
        wave,
    }
}

// Pulse on every beat, a bass line in the jitter band, a sparse lead above it.
const LOOP_PATTERN: &[LoopStep] = &[
    step(0.0, 110.0, 0.25, 0.9, WaveKind::Sine),
    step(1.0, 110.0, 0.25, 0.7, WaveKind::Sine),
    step(2.0, 110.0, 0.25, 0.9, WaveKind::Sine),
    step(3.0, 110.0, 0.25, 0.7, WaveKind::Sine),
    step(4.0, 110.0, 0.25, 0.9, WaveKind::Sine),
    step(5.0, 110.0, 0.25, 0.7, WaveKind::Sine),
    step(6.0, 110.0, 0.25, 0.9, WaveKind::Sine),
    step(7.0, 110.0, 0.25, 0.7, WaveKind::Sine),
    step(0.5, 146.83, 1.0, 0.6, WaveKind::Triangle),
    step(2.5, 174.61, 1.0, 0.6, WaveKind::Triangle),
    step(4.5, 130.81, 1.0, 0.6, WaveKind::Triangle),
    step(6.5, 196.0, 1.0, 0.6, WaveKind::Triangle),
    step(0.0, 587.33, 1.5, 0.25, WaveKind::Saw),
    step(3.0, 698.46, 1.5, 0.25, WaveKind::Saw),
    step(5.5, 880.0, 1.5, 0.25, WaveKind::Saw),
];

#[derive(Clone)]
struct ActiveOscillator {
    amplitude: f32,
    frequency_hz: f32,
    phase: f32,     // radians
    phase_inc: f32, // radians per sample
    total_samples: u32,
    samples_emitted: u32,
    attack_samples: u32,
    release_samples: u32,
    wave: WaveKind,
    envelope: f32, // last envelope value, read by the analyzer
}

impl ActiveOscillator {
    fn envelope_at(&self, n: u32) -> f32 {
        if n < self.attack_samples {
            n as f32 / self.attack_samples.max(1) as f32
        } else if n > self.total_samples.saturating_sub(self.release_samples) {
            let rel_n = n.saturating_sub(self.total_samples - self.release_samples);
            1.0 - (rel_n as f32 / self.release_samples.max(1) as f32)
        } else {
            1.0
        }
    }
}

fn render_wave_sample(phase: f32, wave: WaveKind) -> f32 {
    use std::f32::consts::PI;
    let saw = || {
        let t = phase / (2.0 * PI);
        2.0 * (t - t.floor()) - 1.0
    };
    match wave {
        WaveKind::Sine => phase.sin(),
        WaveKind::Saw => saw(),
        WaveKind::Triangle => 1.0 - 2.0 * saw().abs(),
    }
}

struct SynthState {
    sample_rate: f32,
    playing: bool,
    rate: f32,
    loop_pos_beats: f64,
    oscillators: Vec<ActiveOscillator>,
    history: Vec<f32>,
    history_pos: usize,
}

impl SynthState {
    fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            playing: false,
            rate: 1.0,
            loop_pos_beats: 0.0,
            oscillators: Vec::new(),
            history: vec![0.0; WAVEFORM_LEN],
            history_pos: 0,
        }
    }

    fn trigger_between(&mut self, from: f64, to: f64) {
        let seconds_per_beat = 60.0 / LOOP_BPM / self.rate as f64;
        let sr = self.sample_rate;
        for s in LOOP_PATTERN.iter().filter(|s| s.beat >= from && s.beat < to) {
            let total = ((s.duration_beats * seconds_per_beat) as f32 * sr) as u32;
            let env = (ENVELOPE_SEC * sr) as u32;
            // Playback rate shifts pitch along with tempo, like a resampled track.
            let freq = s.frequency_hz * self.rate;
            self.oscillators.push(ActiveOscillator {
                amplitude: s.velocity,
                frequency_hz: freq,
                phase: 0.0,
                phase_inc: 2.0 * std::f32::consts::PI * freq / sr,
                total_samples: total.max(1),
                samples_emitted: 0,
                attack_samples: env.min(total),
                release_samples: env.min(total),
                wave: s.wave,
                envelope: 0.0,
            });
        }
    }

    fn advance_sequencer(&mut self) {
        let beats_per_sample = LOOP_BPM / 60.0 * self.rate as f64 / self.sample_rate as f64;
        let from = self.loop_pos_beats;
        let mut to = from + beats_per_sample;
        if to < LOOP_BEATS {
            self.trigger_between(from, to);
        } else {
            self.trigger_between(from, LOOP_BEATS);
            to -= LOOP_BEATS;
            self.trigger_between(0.0, to);
        }
        self.loop_pos_beats = to;
    }

    fn next_sample(&mut self) -> f32 {
        if self.playing {
            self.advance_sequencer();
        }
        let mut mix = 0.0f32;
        let mut i = 0usize;
        while i < self.oscillators.len() {
            let osc = &mut self.oscillators[i];
            osc.envelope = osc.envelope_at(osc.samples_emitted);
            mix += render_wave_sample(osc.phase, osc.wave) * osc.amplitude * osc.envelope;
            osc.phase += osc.phase_inc;
            if osc.phase > 2.0 * std::f32::consts::PI {
                osc.phase -= 2.0 * std::f32::consts::PI;
            }
            osc.samples_emitted += 1;
            if osc.samples_emitted >= osc.total_samples {
                self.oscillators.swap_remove(i);
                continue;
            }
            i += 1;
        }
        let out = (mix * MASTER_GAIN).tanh();
        self.history[self.history_pos] = out;
        self.history_pos = (self.history_pos + 1) % self.history.len();
        out
    }

    fn band_energy(&self, lo_hz: f32, hi_hz: f32) -> f32 {
        let level: f32 = self
            .oscillators
            .iter()
            .filter(|o| o.frequency_hz >= lo_hz && o.frequency_hz <= hi_hz)
            .map(|o| o.amplitude * o.envelope)
            .sum();
        level.min(1.0) * BAND_ENERGY_MAX
    }

    fn waveform(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend_from_slice(&self.history[self.history_pos..]);
        out.extend_from_slice(&self.history[..self.history_pos]);
    }
}

/// Handle to the running output stream; implements the engine's `AudioSource`.
pub struct NativeAudio {
    state: Arc<Mutex<SynthState>>,
    _stream: cpal::Stream,
}

fn poisoned<T>(_: T) -> ChoreoError {
    ChoreoError::AudioUnavailable("synth state poisoned".into())
}

impl AudioSource for NativeAudio {
    fn start_loop(&mut self) -> Result<(), ChoreoError> {
        self.state.lock().map_err(poisoned)?.playing = true;
        Ok(())
    }

    fn set_playback_rate(&mut self, rate: f32) -> Result<(), ChoreoError> {
        self.state.lock().map_err(poisoned)?.rate = rate;
        Ok(())
    }

    fn waveform(&mut self, out: &mut Vec<f32>) -> Result<(), ChoreoError> {
        self.state.lock().map_err(poisoned)?.waveform(out);
        Ok(())
    }

    fn band_energy(&mut self, lo_hz: f32, hi_hz: f32) -> Result<f32, ChoreoError> {
        Ok(self.state.lock().map_err(poisoned)?.band_energy(lo_hz, hi_hz))
    }
}

/// Open the default output device. `None` when no usable device exists.
pub fn start_native_audio() -> Option<NativeAudio> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    let state = Arc::new(Mutex::new(SynthState::new(sample_rate)));

    let err_fn = |err: cpal::StreamError| log::error!("audio stream error: {err}");
    let stream_config = config.config();
    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_stream::<f32>(&device, &stream_config, channels, Arc::clone(&state), err_fn)
        }
        cpal::SampleFormat::I16 => {
            build_stream::<i16>(&device, &stream_config, channels, Arc::clone(&state), err_fn)
        }
        cpal::SampleFormat::U16 => {
            build_stream::<u16>(&device, &stream_config, channels, Arc::clone(&state), err_fn)
        }
        other => {
            log::warn!("unsupported sample format {other:?}");
            return None;
        }
    }
    .map_err(|e| log::warn!("could not build output stream: {e}"))
    .ok()?;
    stream.play().ok()?;
    log::info!("[audio] output {sample_rate} Hz, {channels} ch");
    Some(NativeAudio {
        state,
        _stream: stream,
    })
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    state: Arc<Mutex<SynthState>>,
    err_fn: impl FnMut(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let Ok(mut synth) = state.lock() else {
                data.fill(T::EQUILIBRIUM);
                return;
            };
            for frame in data.chunks_mut(channels.max(1)) {
                let v = T::from_sample(synth.next_sample());
                frame.fill(v);
            }
        },
        err_fn,
        None,
    )
}

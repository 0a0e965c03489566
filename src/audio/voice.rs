//! Procedural voices for the wheel's sound effects.
//!
//! A [`Voice`] is a plain description of one tone: waveform, a frequency
//! ramp, an amplitude ramp, when it starts and how long it lives. Turning
//! it into samples is done by [`VoiceSource`], which owns all of its
//! synthesis state, so any number of voices can play at once without
//! sharing buffers.

use rodio::Source;
use std::f32::consts::PI;
use std::time::Duration;

/// Sample rate for synthesized voices (44.1 kHz standard).
pub const SAMPLE_RATE: u32 = 44100;

/// Tick sweep start frequency in Hz.
pub const TICK_START_HZ: f32 = 600.0;
/// Tick sweep end frequency in Hz.
pub const TICK_END_HZ: f32 = 300.0;
/// Tick amplitude at onset.
pub const TICK_START_GAIN: f32 = 0.1;
/// Tick amplitude at the end of the sweep.
pub const TICK_END_GAIN: f32 = 0.01;
/// Length of the tick's pitch and amplitude sweep.
pub const TICK_SWEEP: Duration = Duration::from_millis(50);
/// Total lifetime of a tick voice.
pub const TICK_LENGTH: Duration = Duration::from_millis(60);

/// Win fanfare: C major arpeggio C5 E5 G5 C6, then G5 C6 again.
pub const WIN_NOTES_HZ: [f32; 6] = [523.25, 659.25, 783.99, 1046.50, 783.99, 1046.50];
/// Length of each fanfare note; notes follow each other with no gap.
pub const WIN_NOTE_LENGTH: Duration = Duration::from_millis(150);
/// Fanfare note amplitude at onset.
pub const WIN_GAIN: f32 = 0.1;

/// Oscillator shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Pure tone.
    Sine,
    /// Odd harmonics falling off quickly; soft and woody.
    Triangle,
}

impl Waveform {
    /// Value at a phase in `[0, 1)`. Both shapes start at zero and rise.
    #[inline]
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (2.0 * PI * phase).sin(),
            Waveform::Triangle => {
                let shifted = (phase + 0.75).fract();
                4.0 * (shifted - 0.5).abs() - 1.0
            }
        }
    }
}

/// A parameter that moves from one value to another over time and then
/// holds the final value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ramp {
    Constant(f32),
    Linear { from: f32, to: f32, over: Duration },
    /// Geometric interpolation; `from` and `to` must share a sign and be
    /// non-zero.
    Exponential { from: f32, to: f32, over: Duration },
}

impl Ramp {
    /// Value `t` seconds after the ramp started.
    pub fn value_at(&self, t: f32) -> f32 {
        match *self {
            Ramp::Constant(v) => v,
            Ramp::Linear { from, to, over } => {
                let over = over.as_secs_f32();
                if t >= over || over <= 0.0 {
                    to
                } else {
                    from + (to - from) * (t / over)
                }
            }
            Ramp::Exponential { from, to, over } => {
                let over = over.as_secs_f32();
                if t >= over || over <= 0.0 {
                    to
                } else {
                    from * (to / from).powf(t / over)
                }
            }
        }
    }
}

/// One scheduled tone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub frequency: Ramp,
    pub gain: Ramp,
    /// Delay from the moment the voice is handed to the output.
    pub start: Duration,
    /// How long the voice sounds once started.
    pub length: Duration,
}

impl Voice {
    /// The short percussive click played while the wheel turns.
    pub fn tick() -> Self {
        Self {
            waveform: Waveform::Triangle,
            frequency: Ramp::Exponential {
                from: TICK_START_HZ,
                to: TICK_END_HZ,
                over: TICK_SWEEP,
            },
            gain: Ramp::Exponential {
                from: TICK_START_GAIN,
                to: TICK_END_GAIN,
                over: TICK_SWEEP,
            },
            start: Duration::ZERO,
            length: TICK_LENGTH,
        }
    }

    /// The six back-to-back notes of the win fanfare.
    pub fn win_fanfare() -> [Self; 6] {
        std::array::from_fn(|i| Self {
            waveform: Waveform::Sine,
            frequency: Ramp::Constant(WIN_NOTES_HZ[i]),
            gain: Ramp::Linear {
                from: WIN_GAIN,
                to: 0.0,
                over: WIN_NOTE_LENGTH,
            },
            start: WIN_NOTE_LENGTH * i as u32,
            length: WIN_NOTE_LENGTH,
        })
    }

    /// Time from hand-off until the voice has finished.
    pub fn end(&self) -> Duration {
        self.start + self.length
    }

    /// Creates a sample generator for this voice.
    pub fn source(&self, sample_rate: u32) -> VoiceSource {
        VoiceSource::new(*self, sample_rate)
    }
}

/// Mono sample generator for one [`Voice`].
///
/// Emits silence until the voice's start offset, then the enveloped tone,
/// then ends.
#[derive(Debug, Clone)]
pub struct VoiceSource {
    voice: Voice,
    sample_rate: u32,
    /// Sample index at which the tone begins.
    onset: u64,
    /// Sample index one past the last sample.
    total: u64,
    /// Index of the next sample to produce.
    position: u64,
    /// Oscillator phase in `[0, 1)`.
    phase: f32,
}

impl VoiceSource {
    fn new(voice: Voice, sample_rate: u32) -> Self {
        let to_samples = |d: Duration| (d.as_secs_f64() * sample_rate as f64).round() as u64;
        let onset = to_samples(voice.start);
        Self {
            voice,
            sample_rate,
            onset,
            total: onset + to_samples(voice.length),
            position: 0,
            phase: 0.0,
        }
    }
}

impl Iterator for VoiceSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total {
            return None;
        }
        let index = self.position;
        self.position += 1;

        if index < self.onset {
            return Some(0.0);
        }

        let t = (index - self.onset) as f32 / self.sample_rate as f32;
        let value = self.voice.waveform.sample(self.phase) * self.voice.gain.value_at(t);

        self.phase += self.voice.frequency.value_at(t) / self.sample_rate as f32;
        self.phase = self.phase.fract();

        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total - self.position) as usize;
        (remaining, Some(remaining))
    }
}

impl Source for VoiceSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total - self.position) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.voice.end())
    }
}

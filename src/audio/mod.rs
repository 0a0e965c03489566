//! Procedural audio feedback for the wheel.
//!
//! No audio assets are used. Both effects are built from oscillators with
//! explicit amplitude envelopes:
//! - A tick: a short triangle blip with a falling pitch sweep
//! - A win fanfare: six sine notes of a C major arpeggio
//!
//! Output goes through rodio and degrades to silence when no device is
//! available. The same voices can be rendered offline to WAV files.

pub mod engine;
pub mod export;
pub mod voice;

pub use engine::{AudioEngine, AudioError, RodioSink, VoiceSink};
pub use export::export_sound_effects;
pub use voice::{Voice, Waveform, SAMPLE_RATE};

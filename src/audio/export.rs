//! Offline rendering of the sound effects to WAV files.
//!
//! Uses the same voices the live engine plays, mixed sample by sample, so
//! the files sound exactly like the wheel.

use super::voice::{Voice, SAMPLE_RATE};
use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

/// Mixes a set of voices into one mono buffer.
///
/// The buffer is as long as the latest-ending voice. Overlapping voices are
/// summed; nothing is normalized.
pub fn render_mix(voices: &[Voice], sample_rate: u32) -> Vec<f32> {
    let mut mix: Vec<f32> = Vec::new();
    for voice in voices {
        for (i, sample) in voice.source(sample_rate).enumerate() {
            if i >= mix.len() {
                mix.resize(i + 1, 0.0);
            }
            mix[i] += sample;
        }
    }
    mix
}

/// Writes mono samples to a 16-bit WAV file.
///
/// # Arguments
///
/// * `path` - Output file path
/// * `samples` - Samples in -1.0..=1.0; values outside are clipped
/// * `sample_rate` - Sample rate of `samples`
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path.as_ref(), spec).with_context(|| {
        format!(
            "Failed to create output WAV file: {}",
            path.as_ref().display()
        )
    })?;

    for &sample in samples {
        let value = (sample * 32767.0).clamp(-32768.0, 32767.0) as i16;
        writer.write_sample(value)?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;
    Ok(())
}

/// Renders `tick.wav` and `win.wav` into `dir`, creating it if needed.
///
/// # Returns
///
/// The paths of the written files
pub fn export_sound_effects<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let effects: [(&str, Vec<Voice>); 2] = [
        ("tick.wav", vec![Voice::tick()]),
        ("win.wav", Voice::win_fanfare().to_vec()),
    ];

    let mut written = Vec::with_capacity(effects.len());
    for (name, voices) in effects {
        let path = dir.join(name);
        write_wav(&path, &render_mix(&voices, SAMPLE_RATE), SAMPLE_RATE)?;
        tracing::info!(path = %path.display(), "exported sound effect");
        written.push(path);
    }
    Ok(written)
}

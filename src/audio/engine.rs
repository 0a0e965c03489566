//! Audio feedback engine for spin ticks and the win fanfare.
//!
//! Sounds are synthesized from [`Voice`] descriptions and handed to a
//! [`VoiceSink`]. The real sink mixes voices into the default rodio
//! output. The output is opened lazily on first use and kept for the life
//! of the engine; if it cannot be opened the engine stays silent forever.
//!
//! Nothing in here returns an error to the caller. Audio is best-effort
//! and must never disturb spin timing.

use super::voice::{Voice, SAMPLE_RATE};
use rodio::{OutputStream, OutputStreamHandle};
use std::cell::{Cell, RefCell};
use thiserror::Error;

/// Failures inside the audio output.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio output: {0}")]
    Open(String),
    #[error("failed to play voice: {0}")]
    Play(String),
}

/// Destination for synthesized voices.
pub trait VoiceSink {
    /// Schedules one voice for playback. Must not block.
    fn play(&self, voice: &Voice) -> Result<(), AudioError>;

    /// Brings a suspended output back to a playable state.
    fn resume(&self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Voice sink backed by the default rodio output device.
pub struct RodioSink {
    /// Audio output stream (must be kept alive).
    _stream: OutputStream,
    /// Handle used to mix new voices into the stream.
    handle: OutputStreamHandle,
}

impl RodioSink {
    /// Opens the default output device.
    pub fn open() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Open(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl VoiceSink for RodioSink {
    fn play(&self, voice: &Voice) -> Result<(), AudioError> {
        self.handle
            .play_raw(voice.source(SAMPLE_RATE))
            .map_err(|e| AudioError::Play(e.to_string()))
    }
}

/// Deferred construction of the output sink.
pub type SinkOpener = Box<dyn FnOnce() -> Result<Box<dyn VoiceSink>, AudioError>>;

/// Lifecycle of the output capability.
enum Output {
    /// Not opened yet.
    Pending(SinkOpener),
    /// Open and usable.
    Ready(Box<dyn VoiceSink>),
    /// Opening failed or audio was disabled; every call is a no-op.
    Unavailable,
}

/// Synthesizes and plays the wheel's sound effects.
///
/// Single-threaded: share it with `Rc`. The mute flag is read before every
/// emission and can be flipped at any time.
pub struct AudioEngine {
    output: RefCell<Output>,
    muted: Cell<bool>,
}

impl AudioEngine {
    /// Creates an engine that opens the default rodio output on first use.
    pub fn new() -> Self {
        Self::with_opener(Box::new(|| {
            RodioSink::open().map(|sink| Box::new(sink) as Box<dyn VoiceSink>)
        }))
    }

    /// Creates an engine that builds its sink with `opener` on first use.
    pub fn with_opener(opener: SinkOpener) -> Self {
        Self {
            output: RefCell::new(Output::Pending(opener)),
            muted: Cell::new(false),
        }
    }

    /// Creates an engine around an already-open sink.
    pub fn with_sink(sink: Box<dyn VoiceSink>) -> Self {
        Self {
            output: RefCell::new(Output::Ready(sink)),
            muted: Cell::new(false),
        }
    }

    /// Creates an engine with no output at all.
    pub fn silent() -> Self {
        Self {
            output: RefCell::new(Output::Unavailable),
            muted: Cell::new(false),
        }
    }

    /// Sets the mute flag. Takes effect from the next emission; voices
    /// already handed to the output keep playing.
    pub fn set_muted(&self, muted: bool) {
        self.muted.set(muted);
        tracing::debug!(muted, "audio mute changed");
    }

    pub fn is_muted(&self) -> bool {
        self.muted.get()
    }

    /// Whether an output is open or may still be opened.
    pub fn is_available(&self) -> bool {
        !matches!(*self.output.borrow(), Output::Unavailable)
    }

    /// Ensures the output is open and playable. Idempotent.
    pub fn resume(&self) {
        self.with_sink_ready(|sink| {
            if let Err(e) = sink.resume() {
                tracing::debug!("audio resume failed: {}", e);
            }
        });
    }

    /// Plays one tick: a triangle blip sweeping 600 Hz to 300 Hz.
    pub fn play_tick(&self) {
        if self.is_muted() {
            return;
        }
        self.emit(&[Voice::tick()]);
    }

    /// Plays the six-note win fanfare.
    pub fn play_win(&self) {
        if self.is_muted() {
            return;
        }
        self.emit(&Voice::win_fanfare());
    }

    fn emit(&self, voices: &[Voice]) {
        self.with_sink_ready(|sink| {
            for voice in voices {
                if let Err(e) = sink.play(voice) {
                    tracing::debug!("dropped voice: {}", e);
                }
            }
        });
    }

    /// Opens the output if needed, then runs `f` on it. Does nothing when
    /// the output is unavailable.
    fn with_sink_ready(&self, f: impl FnOnce(&dyn VoiceSink)) {
        let mut output = self.output.borrow_mut();
        if matches!(*output, Output::Pending(_)) {
            if let Output::Pending(open) = std::mem::replace(&mut *output, Output::Unavailable) {
                match open() {
                    Ok(sink) => {
                        tracing::info!("audio output opened");
                        *output = Output::Ready(sink);
                    }
                    Err(e) => tracing::warn!("audio unavailable, continuing silently: {}", e),
                }
            }
        }
        if let Output::Ready(sink) = &*output {
            f(sink.as_ref());
        }
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Test sink that records every voice it is asked to play.
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    pub struct RecordingSink {
        pub played: Rc<RefCell<Vec<Voice>>>,
        pub resumes: Rc<Cell<usize>>,
    }

    impl RecordingSink {
        pub fn count(&self) -> usize {
            self.played.borrow().len()
        }
    }

    impl VoiceSink for RecordingSink {
        fn play(&self, voice: &Voice) -> Result<(), AudioError> {
            self.played.borrow_mut().push(*voice);
            Ok(())
        }

        fn resume(&self) -> Result<(), AudioError> {
            self.resumes.set(self.resumes.get() + 1);
            Ok(())
        }
    }
}

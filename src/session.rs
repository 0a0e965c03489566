//! Host-side glue around the spin scheduler.
//!
//! The session owns the part of the lifecycle the scheduler does not track:
//! it moves to `Celebrating` when the completion callback delivers a
//! winner, plays the fanfare, and returns to `Idle` when the result is
//! closed. It also guards the option list while a spin is running.

use crate::audio::AudioEngine;
use crate::wheel::{
    Clock, MonotonicClock, OptionError, OptionId, OptionList, SpinScheduler, SpinState,
    WheelOption,
};
use std::cell::RefCell;
use std::rc::Rc;

/// One wheel: its options, scheduler, audio and lifecycle state.
pub struct WheelSession<C: Clock = MonotonicClock> {
    options: OptionList,
    scheduler: SpinScheduler<C>,
    audio: Rc<AudioEngine>,
    state: SpinState,
    result: Option<WheelOption>,
    /// Filled by the completion callback, drained by `poll`.
    finished: Rc<RefCell<Option<WheelOption>>>,
}

impl WheelSession<MonotonicClock> {
    /// Creates a session on the wall clock.
    pub fn new(options: OptionList, audio: Rc<AudioEngine>) -> Self {
        let scheduler = SpinScheduler::new(Rc::clone(&audio));
        Self::with_scheduler(options, scheduler, audio)
    }
}

impl<C: Clock> WheelSession<C> {
    /// Creates a session around an existing scheduler.
    ///
    /// `audio` should be the engine the scheduler ticks through.
    pub fn with_scheduler(
        options: OptionList,
        scheduler: SpinScheduler<C>,
        audio: Rc<AudioEngine>,
    ) -> Self {
        Self {
            options,
            scheduler,
            audio,
            state: SpinState::Idle,
            result: None,
            finished: Rc::new(RefCell::new(None)),
        }
    }

    /// Spins the wheel if it is idle.
    ///
    /// # Returns
    ///
    /// true if a spin started
    pub fn spin(&mut self) -> bool {
        if self.state != SpinState::Idle {
            return false;
        }
        let finished = Rc::clone(&self.finished);
        let accepted = self
            .scheduler
            .request_spin(self.options.as_slice(), move |winner| {
                *finished.borrow_mut() = Some(winner);
            });
        if accepted {
            self.state = SpinState::Spinning;
            self.result = None;
        }
        accepted
    }

    /// Advances the running spin. Call every frame.
    ///
    /// # Returns
    ///
    /// The winner, on the frame the spin finishes
    pub fn poll(&mut self) -> Option<WheelOption> {
        self.scheduler.poll();
        let winner = self.finished.borrow_mut().take()?;
        self.audio.play_win();
        self.state = SpinState::Celebrating;
        self.result = Some(winner.clone());
        Some(winner)
    }

    /// Dismisses the winner and returns to idle.
    pub fn close_result(&mut self) {
        if self.state == SpinState::Celebrating {
            self.state = SpinState::Idle;
            self.result = None;
        }
    }

    /// Flips the mute flag.
    ///
    /// # Returns
    ///
    /// The new mute state
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.audio.is_muted();
        self.audio.set_muted(muted);
        muted
    }

    /// Adds an option. Refused while the wheel is spinning.
    pub fn add_option(&mut self, label: &str) -> Result<OptionId, OptionError> {
        if self.state == SpinState::Spinning {
            return Err(OptionError::Busy);
        }
        self.options.add(label)
    }

    /// Removes an option. Refused while the wheel is spinning.
    pub fn remove_option(&mut self, id: OptionId) -> Result<WheelOption, OptionError> {
        if self.state == SpinState::Spinning {
            return Err(OptionError::Busy);
        }
        self.options.remove(id)
    }

    /// Cancels any running spin. Its callback never fires.
    pub fn shutdown(&mut self) {
        if self.scheduler.cancel() {
            self.state = SpinState::Idle;
        }
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn result(&self) -> Option<&WheelOption> {
        self.result.as_ref()
    }

    pub fn options(&self) -> &OptionList {
        &self.options
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    /// Rotation to draw this frame.
    pub fn current_angle(&self) -> f64 {
        self.scheduler.current_angle()
    }

    /// Elapsed fraction of the running spin.
    pub fn progress(&self) -> Option<f64> {
        self.scheduler.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::engine::recording::RecordingSink;
    use crate::wheel::{ManualClock, SpinConfig, SPIN_DURATION};
    use std::time::Duration;

    fn session(seed: u64) -> (WheelSession<ManualClock>, ManualClock, RecordingSink) {
        let clock = ManualClock::new();
        let sink = RecordingSink::default();
        let audio = Rc::new(AudioEngine::with_sink(Box::new(sink.clone())));
        let scheduler = SpinScheduler::with_parts(
            clock.clone(),
            SpinConfig::default(),
            fastrand::Rng::with_seed(seed),
            Rc::clone(&audio),
        );
        let session = WheelSession::with_scheduler(OptionList::with_defaults(), scheduler, audio);
        (session, clock, sink)
    }

    #[test]
    fn test_full_lifecycle() {
        let (mut session, clock, sink) = session(1);
        assert_eq!(session.state(), SpinState::Idle);

        assert!(session.spin());
        assert_eq!(session.state(), SpinState::Spinning);
        assert!(!session.spin());

        clock.advance(Duration::from_millis(2500));
        assert!(session.poll().is_none());

        clock.advance(Duration::from_millis(2500));
        let winner = session.poll().expect("spin finished");
        assert_eq!(session.state(), SpinState::Celebrating);
        assert_eq!(session.result(), Some(&winner));
        assert!(session.options().as_slice().contains(&winner));

        // The last six voices are the fanfare.
        let played = sink.played.borrow();
        assert!(played.len() >= 6);
        assert_eq!(played[played.len() - 6..], crate::audio::Voice::win_fanfare());
        drop(played);

        // Celebrating blocks new spins until the result is closed.
        assert!(!session.spin());
        session.close_result();
        assert_eq!(session.state(), SpinState::Idle);
        assert!(session.result().is_none());
        assert!(session.spin());
    }

    #[test]
    fn test_options_locked_while_spinning() {
        let (mut session, clock, _) = session(2);
        session.spin();
        assert_eq!(session.add_option("Karaoke"), Err(OptionError::Busy));
        let first = session.options().get(0).unwrap().id;
        assert_eq!(session.remove_option(first), Err(OptionError::Busy));

        clock.advance(SPIN_DURATION);
        session.poll();
        assert!(session.add_option("Karaoke").is_ok());
        assert!(session.remove_option(first).is_ok());
    }

    #[test]
    fn test_toggle_mute_silences_fanfare() {
        let (mut session, clock, sink) = session(3);
        assert!(session.toggle_mute());
        assert!(session.is_muted());
        session.spin();
        clock.advance(SPIN_DURATION);
        assert!(session.poll().is_some());
        assert_eq!(sink.count(), 0);
        assert!(!session.toggle_mute());
    }

    #[test]
    fn test_shutdown_drops_pending_winner() {
        let (mut session, clock, _) = session(4);
        session.spin();
        session.shutdown();
        assert_eq!(session.state(), SpinState::Idle);
        clock.advance(SPIN_DURATION * 2);
        assert!(session.poll().is_none());
        assert_eq!(session.state(), SpinState::Idle);
    }
}

//! The spin scheduler.
//!
//! Picks the winner, commits the rotation, runs the tick loop and fires
//! the completion callback exactly once per accepted spin. It is driven
//! cooperatively: the host calls [`SpinScheduler::poll`] from its event
//! loop (every frame is fine, late polls catch up).

use super::timer::{Clock, MonotonicClock, PeriodicTimer, Timeout};
use super::trajectory::{plan_spin, Trajectory};
use super::{SpinState, WheelOption, MIN_OPTIONS, SPIN_DURATION, TICK_INTERVAL, TICK_PROBABILITY};
use crate::audio::AudioEngine;
use std::rc::Rc;
use std::time::Duration;

/// Timing of a spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    /// Length of the animation and delay before completion.
    pub duration: Duration,
    /// Sampling period of the tick loop.
    pub tick_interval: Duration,
    /// Tick chance per sample at full speed.
    pub tick_probability: f64,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            duration: SPIN_DURATION,
            tick_interval: TICK_INTERVAL,
            tick_probability: TICK_PROBABILITY,
        }
    }
}

/// Apparent wheel speed at an elapsed fraction of the spin.
///
/// A cubic ease-out proxy: 1 at the start, 0 at the end.
#[inline]
pub fn tick_speed(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - p * p * p
}

/// Called once with the winning option when a spin finishes.
type CompletionFn = Box<dyn FnOnce(WheelOption)>;

/// Per-spin state. Dropping it drops the callback unfired.
struct ActiveSpin {
    started_at: Duration,
    winner: WheelOption,
    trajectory: Trajectory,
    ticker: PeriodicTimer,
    completion: Timeout,
    on_complete: Option<CompletionFn>,
}

impl ActiveSpin {
    fn cancel_timers(&mut self) {
        self.ticker.cancel();
        self.completion.cancel();
    }
}

/// Owns the spin state machine and the wheel's cumulative rotation.
///
/// The rotation persists across spins and only ever grows, so the wheel
/// always turns forward from where it stopped.
pub struct SpinScheduler<C: Clock = MonotonicClock> {
    clock: C,
    config: SpinConfig,
    rng: fastrand::Rng,
    audio: Rc<AudioEngine>,
    /// Rotation the last accepted spin lands on.
    committed_angle: f64,
    active: Option<ActiveSpin>,
}

impl SpinScheduler<MonotonicClock> {
    /// Creates a scheduler on the wall clock with default timing and a
    /// randomly seeded generator.
    pub fn new(audio: Rc<AudioEngine>) -> Self {
        Self::with_parts(
            MonotonicClock::new(),
            SpinConfig::default(),
            fastrand::Rng::new(),
            audio,
        )
    }
}

impl<C: Clock> SpinScheduler<C> {
    /// Creates a scheduler from explicit parts.
    ///
    /// # Arguments
    ///
    /// * `clock` - Time source read on every request and poll
    /// * `config` - Spin timing
    /// * `rng` - Random source for outcomes, trajectories and ticks
    /// * `audio` - Engine the tick loop plays through
    pub fn with_parts(
        clock: C,
        config: SpinConfig,
        rng: fastrand::Rng,
        audio: Rc<AudioEngine>,
    ) -> Self {
        Self {
            clock,
            config,
            rng,
            audio,
            committed_angle: 0.0,
            active: None,
        }
    }

    /// Starts a spin over `options`.
    ///
    /// Ignored (returns `false`, changes nothing) while a spin is running
    /// or when there are fewer than two options. Otherwise the winner is
    /// drawn uniformly, the landing rotation is committed, the tick loop
    /// starts and `on_complete` is scheduled for the end of the spin.
    ///
    /// # Returns
    ///
    /// true if the spin was accepted
    pub fn request_spin<F>(&mut self, options: &[WheelOption], on_complete: F) -> bool
    where
        F: FnOnce(WheelOption) + 'static,
    {
        if self.active.is_some() {
            tracing::debug!("spin ignored: already spinning");
            return false;
        }
        if options.len() < MIN_OPTIONS {
            tracing::debug!(count = options.len(), "spin ignored: not enough options");
            return false;
        }

        self.audio.resume();

        let plan = plan_spin(&mut self.rng, options.len(), self.committed_angle);
        self.committed_angle = plan.trajectory.target_angle;

        let now = self.clock.now();
        self.active = Some(ActiveSpin {
            started_at: now,
            winner: options[plan.winner_index].clone(),
            trajectory: plan.trajectory,
            ticker: PeriodicTimer::start(now, self.config.tick_interval),
            completion: Timeout::start(now, self.config.duration),
            on_complete: Some(Box::new(on_complete)),
        });

        tracing::info!(
            options = options.len(),
            extra_turns = plan.extra_turns,
            target = plan.trajectory.target_angle,
            "spin started"
        );
        true
    }

    /// Advances the running spin to the current time.
    ///
    /// Runs every tick sample that has fallen due, in order. Once the spin
    /// duration has elapsed the tick loop is cancelled first and only then
    /// is the completion callback invoked, exactly once.
    pub fn poll(&mut self) {
        let now = self.clock.now();
        let Some(spin) = self.active.as_mut() else {
            return;
        };

        let duration = self.config.duration.as_secs_f64();
        while let Some(at) = spin.ticker.next_due(now) {
            let progress = (at - spin.started_at).as_secs_f64() / duration;
            if progress >= 1.0 {
                spin.ticker.cancel();
                break;
            }
            if self.rng.f64() < tick_speed(progress) * self.config.tick_probability {
                self.audio.play_tick();
            }
        }

        if !spin.completion.is_due(now) {
            return;
        }

        if let Some(mut spin) = self.active.take() {
            spin.cancel_timers();
            tracing::info!(winner = %spin.winner.label, "spin finished");
            if let Some(on_complete) = spin.on_complete.take() {
                on_complete(spin.winner);
            }
        }
    }

    /// Abandons the running spin without firing its callback.
    ///
    /// The committed rotation is kept, so the next spin still turns forward.
    ///
    /// # Returns
    ///
    /// true if a spin was running
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(mut spin) => {
                spin.cancel_timers();
                tracing::debug!("spin cancelled");
                true
            }
            None => false,
        }
    }

    /// `Spinning` while a spin is running, `Idle` otherwise.
    ///
    /// The scheduler never reports `Celebrating`; that belongs to the host.
    pub fn state(&self) -> SpinState {
        if self.active.is_some() {
            SpinState::Spinning
        } else {
            SpinState::Idle
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.active.is_some()
    }

    /// Rotation to draw right now.
    ///
    /// Follows the eased trajectory during a spin and rests on the
    /// committed rotation otherwise.
    pub fn current_angle(&self) -> f64 {
        match &self.active {
            Some(spin) => spin.trajectory.angle_at(self.progress_of(spin)),
            None => self.committed_angle,
        }
    }

    /// Elapsed fraction of the running spin, clamped to `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        self.active.as_ref().map(|spin| self.progress_of(spin))
    }

    /// Rotation the most recently accepted spin lands on.
    pub fn committed_angle(&self) -> f64 {
        self.committed_angle
    }

    /// Trajectory of the running spin.
    pub fn trajectory(&self) -> Option<Trajectory> {
        self.active.as_ref().map(|spin| spin.trajectory)
    }

    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    fn progress_of(&self, spin: &ActiveSpin) -> f64 {
        let elapsed = self.clock.now().saturating_sub(spin.started_at);
        (elapsed.as_secs_f64() / self.config.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl<C: Clock> Drop for SpinScheduler<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

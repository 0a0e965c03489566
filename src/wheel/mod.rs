//! Spin orchestration for the lucky wheel.
//!
//! This module owns everything about a spin except sound synthesis:
//! - The option list the wheel is built from
//! - Outcome selection and the rotation trajectory that lands on it
//! - The timed tick loop and the exactly-once completion callback
//!
//! Time is read through the [`Clock`] trait and randomness comes from a
//! `fastrand::Rng`, so both can be pinned down in tests.

mod option;
mod scheduler;
mod timer;
mod trajectory;

pub use option::{OptionError, OptionId, OptionList, WheelOption, DEFAULT_LABELS, PALETTE};
pub use scheduler::{tick_speed, SpinConfig, SpinScheduler};
pub use timer::{Clock, ManualClock, MonotonicClock, PeriodicTimer, Timeout};
pub use trajectory::{
    landing_offset, plan_spin, pointer_offset_in_slice, slice_angle, slice_under_pointer,
    CubicBezier, SpinPlan, Trajectory, SPIN_EASING,
};

use std::time::Duration;

/// Fewest options a wheel can be spun with.
pub const MIN_OPTIONS: usize = 2;

/// Most options a wheel can hold.
pub const MAX_OPTIONS: usize = 10;

/// Wall-clock length of one spin animation.
pub const SPIN_DURATION: Duration = Duration::from_millis(5000);

/// How often the tick loop samples the wheel speed.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Chance of a tick at full speed; scaled down as the wheel slows.
pub const TICK_PROBABILITY: f64 = 0.4;

/// Fewest full turns a spin makes before landing.
pub const MIN_EXTRA_TURNS: u32 = 5;

/// Most full turns a spin makes before landing.
pub const MAX_EXTRA_TURNS: u32 = 8;

/// Fraction of a slice the landing point may stray from the slice center.
pub const JITTER_FRACTION: f64 = 0.4;

/// Where the wheel is in its spin lifecycle.
///
/// The scheduler only ever reports `Idle` or `Spinning`. `Celebrating` is
/// entered by the host when the completion callback delivers a winner and
/// left when the host closes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinState {
    /// Ready to spin.
    #[default]
    Idle,
    /// A spin is animating; further spin requests are ignored.
    Spinning,
    /// A winner is being shown.
    Celebrating,
}

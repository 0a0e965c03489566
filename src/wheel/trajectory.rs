//! Outcome selection and rotation geometry.
//!
//! Angles are in degrees and measured clockwise from the pointer at the top
//! of the wheel. Slice `i` of an `n` option wheel covers the wheel angles
//! `[i * 360/n, (i + 1) * 360/n)`. Rotating the wheel clockwise by `R`
//! degrees brings wheel angle `(-R) mod 360` under the pointer.

use super::{JITTER_FRACTION, MAX_EXTRA_TURNS, MIN_EXTRA_TURNS};

/// A cubic Bézier timing curve through (0, 0) and (1, 1).
///
/// Same model as CSS `cubic-bezier(x1, y1, x2, y2)`: the curve maps elapsed
/// fraction (x) to progress fraction (y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Timing curve of the spin animation: quick start, long gentle stop.
pub const SPIN_EASING: CubicBezier = CubicBezier {
    x1: 0.2,
    y1: 0.0,
    x2: 0.2,
    y2: 1.0,
};

impl CubicBezier {
    /// Bernstein form of one coordinate at parameter `t`.
    #[inline]
    fn coordinate(p1: f64, p2: f64, t: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    /// Returns eased progress for an elapsed fraction in `[0, 1]`.
    ///
    /// Inputs outside the range are clamped. With both control x values in
    /// `[0, 1]` the x coordinate is monotonic in `t`, so bisection finds the
    /// parameter for `x` without Newton steps.
    pub fn ease(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        let mut t = x;
        for _ in 0..48 {
            let current = Self::coordinate(self.x1, self.x2, t);
            if (current - x).abs() < 1e-9 {
                break;
            }
            if current < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        Self::coordinate(self.y1, self.y2, t)
    }
}

/// The start and end rotation of one spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    /// Cumulative rotation when the spin began.
    pub start_angle: f64,
    /// Cumulative rotation the spin ends at.
    pub target_angle: f64,
}

impl Trajectory {
    /// Rotation at an elapsed fraction of the spin, following [`SPIN_EASING`].
    ///
    /// Never decreases as `progress` grows and equals `target_angle` from
    /// `progress >= 1` on.
    pub fn angle_at(&self, progress: f64) -> f64 {
        let eased = SPIN_EASING.ease(progress);
        if eased >= 1.0 {
            return self.target_angle;
        }
        self.start_angle + (self.target_angle - self.start_angle) * eased
    }
}

/// Everything decided at the moment a spin is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    /// Index of the winning option.
    pub winner_index: usize,
    /// Full turns added purely for show.
    pub extra_turns: u32,
    /// Offset from the winning slice's center, within `±0.4` slice widths.
    pub jitter: f64,
    /// The rotation the animation follows.
    pub trajectory: Trajectory,
}

/// Width of one slice in degrees.
#[inline]
pub fn slice_angle(option_count: usize) -> f64 {
    360.0 / option_count as f64
}

/// Forward rotation, in `[0, 360)`, that takes the wheel from
/// `committed_angle` to a resting angle where the pointer sits `jitter`
/// degrees past the center of slice `winner_index`.
///
/// The offset is taken relative to the committed orientation, so the winner
/// ends up under the pointer no matter how far earlier spins turned the
/// wheel.
pub fn landing_offset(
    winner_index: usize,
    option_count: usize,
    jitter: f64,
    committed_angle: f64,
) -> f64 {
    let slice = slice_angle(option_count);
    let pointer_at = (winner_index as f64 + 0.5) * slice + jitter;
    let resting = (360.0 - pointer_at).rem_euclid(360.0);
    let offset = (resting - committed_angle.rem_euclid(360.0)).rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if offset >= 360.0 {
        0.0
    } else {
        offset
    }
}

/// Picks a winner uniformly and computes the trajectory that lands on it.
///
/// # Arguments
///
/// * `rng` - Random source for the winner, the extra turns and the jitter
/// * `option_count` - Number of options on the wheel (at least 1)
/// * `committed_angle` - Cumulative rotation the previous spin ended at
///
/// # Returns
///
/// A plan whose target is at least five full turns past `committed_angle`
pub fn plan_spin(rng: &mut fastrand::Rng, option_count: usize, committed_angle: f64) -> SpinPlan {
    let slice = slice_angle(option_count);
    let winner_index = rng.usize(0..option_count);
    let extra_turns = rng.u32(MIN_EXTRA_TURNS..=MAX_EXTRA_TURNS);
    let jitter = (rng.f64() * 2.0 - 1.0) * JITTER_FRACTION * slice;

    let offset = landing_offset(winner_index, option_count, jitter, committed_angle);
    let target_angle = committed_angle + extra_turns as f64 * 360.0 + offset;

    SpinPlan {
        winner_index,
        extra_turns,
        jitter,
        trajectory: Trajectory {
            start_angle: committed_angle,
            target_angle,
        },
    }
}

/// How far past the start edge of slice `index` the pointer sits when the
/// wheel is rotated by `angle`, in `[0, 360)`.
pub fn pointer_offset_in_slice(angle: f64, index: usize, option_count: usize) -> f64 {
    let slice = slice_angle(option_count);
    (360.0 - angle.rem_euclid(360.0) - index as f64 * slice).rem_euclid(360.0)
}

/// Index of the slice under the pointer when the wheel is rotated by `angle`.
pub fn slice_under_pointer(angle: f64, option_count: usize) -> usize {
    if option_count == 0 {
        return 0;
    }
    let under = (-angle).rem_euclid(360.0);
    (under / slice_angle(option_count)).floor() as usize % option_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints_and_monotonic() {
        assert_eq!(SPIN_EASING.ease(0.0), 0.0);
        assert_eq!(SPIN_EASING.ease(1.0), 1.0);
        assert_eq!(SPIN_EASING.ease(-3.0), 0.0);
        assert_eq!(SPIN_EASING.ease(7.0), 1.0);

        let mut last = 0.0;
        for i in 1..=200 {
            let eased = SPIN_EASING.ease(i as f64 / 200.0);
            assert!(eased >= last - 1e-9, "easing went backwards at step {}", i);
            last = eased;
        }
        // Front-loaded: well past halfway by the midpoint.
        assert!(SPIN_EASING.ease(0.5) > 0.7);
    }

    #[test]
    fn test_landing_offset_range() {
        for committed in [0.0, 12.5, 359.9, 1234.56, 98765.4321] {
            for n in 2..=10 {
                for index in 0..n {
                    let offset = landing_offset(index, n, 0.0, committed);
                    assert!((0.0..360.0).contains(&offset));
                }
            }
        }
    }

    #[test]
    fn test_plan_lands_on_winner_across_consecutive_spins() {
        let mut rng = fastrand::Rng::with_seed(7);
        for n in 2..=10 {
            let slice = slice_angle(n);
            let mut committed = 0.0;
            for _ in 0..200 {
                let plan = plan_spin(&mut rng, n, committed);
                let target = plan.trajectory.target_angle;

                assert!(plan.winner_index < n);
                assert!((MIN_EXTRA_TURNS..=MAX_EXTRA_TURNS).contains(&plan.extra_turns));
                assert!(plan.jitter.abs() <= JITTER_FRACTION * slice);

                let offset = pointer_offset_in_slice(target, plan.winner_index, n);
                assert!(
                    offset >= 0.1 * slice - 1e-6 && offset <= 0.9 * slice + 1e-6,
                    "n={} offset={} slice={}",
                    n,
                    offset,
                    slice
                );
                assert_eq!(slice_under_pointer(target, n), plan.winner_index);

                // Always forward, by at least the minimum number of turns.
                assert!(target >= committed + MIN_EXTRA_TURNS as f64 * 360.0);
                assert!(target < committed + (MAX_EXTRA_TURNS + 1) as f64 * 360.0);
                committed = target;
            }
        }
    }

    #[test]
    fn test_winner_selection_is_uniform() {
        // Chi-squared against the uniform distribution. 33.72 is the 0.01%
        // critical value for 9 degrees of freedom, the most any n here has.
        let mut rng = fastrand::Rng::with_seed(0x5EED);
        let trials = 10_000;
        for n in 2..=10 {
            let mut counts = vec![0usize; n];
            for _ in 0..trials {
                counts[plan_spin(&mut rng, n, 0.0).winner_index] += 1;
            }
            let expected = trials as f64 / n as f64;
            let chi_squared: f64 = counts
                .iter()
                .map(|&c| {
                    let d = c as f64 - expected;
                    d * d / expected
                })
                .sum();
            assert!(chi_squared < 33.72, "n={} chi2={} counts={:?}", n, chi_squared, counts);
        }
    }

    #[test]
    fn test_slice_under_pointer() {
        // Unrotated, the pointer touches the start of slice 0.
        assert_eq!(slice_under_pointer(0.0, 4), 0);
        // Rotating clockwise brings the last slice under the pointer first.
        assert_eq!(slice_under_pointer(10.0, 4), 3);
        assert_eq!(slice_under_pointer(100.0, 4), 2);
        assert_eq!(slice_under_pointer(360.0 * 3.0 - 45.0, 4), 0);
        assert_eq!(slice_under_pointer(360.0 - 135.0, 4), 1);
    }

    #[test]
    fn test_trajectory_angle_at() {
        let trajectory = Trajectory {
            start_angle: 90.0,
            target_angle: 2000.0,
        };
        assert_eq!(trajectory.angle_at(0.0), 90.0);
        assert_eq!(trajectory.angle_at(1.0), 2000.0);
        assert_eq!(trajectory.angle_at(1.5), 2000.0);
        let mid = trajectory.angle_at(0.5);
        assert!(mid > 90.0 && mid < 2000.0);
    }
}

//! Animator system with composable, time-windowed effects
//!
//! Every animator lives on its own timeline: it is stepped with a local time
//! in `[0, duration)` and writes into the caller's frame buffer at absolute
//! LED indices. Composites (groups, fades) own their children by value and
//! are generic over them, so whole animation trees are built once, without
//! heap allocations, and never change shape afterwards.

mod attract;
mod chase;
mod fade;
mod fill_in;
mod group;
mod range;
mod repeated;
mod solid;
mod sparkle;
mod transition;

use embassy_time::Duration;

pub use attract::{AttractAnimator, AttractLayer};
pub use chase::{ChaseAnimator, SingleChaseAnimator};
pub use fade::FadeAnimator;
pub use fill_in::FillInAnimator;
pub use group::AnimatorGroup;
pub use range::{MAX_PALETTE_LEN, MAX_RANGES, RangeAnimator};
pub use repeated::RepeatedPatternAnimator;
pub use solid::SolidColor;
pub use sparkle::{MAX_SPARKLE_RANGES, SPARKLE_SLOTS, SparkleAnimator};
pub use transition::TreeTransitionAnimator;

use crate::color::Rgb;

pub(crate) const ZERO: Duration = Duration::from_ticks(0);

pub trait Animator {
    /// Length of the animator's own timeline
    fn duration(&self) -> Duration;

    /// Render the frame at `local_time` into `leds`
    ///
    /// `local_time` is always within `[0, duration)`. Only the LEDs the
    /// animator is responsible for are written.
    fn step(&self, local_time: Duration, leds: &mut [Rgb]);

    /// Update internal state for `local_time` before rendering
    ///
    /// Stateless animators ignore this.
    fn advance(&mut self, _local_time: Duration) {}

    /// Reset animator state before the timeline is replayed
    fn reset(&mut self) {}
}

/// Animators bound to the game's animated states
#[derive(Debug, Clone)]
pub enum StateAnimator {
    /// Attract mode overlay shown while no game is running
    Attract(AttractAnimator),
    /// Lane-by-lane color wash
    Transition(TreeTransitionAnimator),
}

impl Animator for StateAnimator {
    fn duration(&self) -> Duration {
        match self {
            Self::Attract(animator) => animator.duration(),
            Self::Transition(animator) => animator.duration(),
        }
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        match self {
            Self::Attract(animator) => animator.step(local_time, leds),
            Self::Transition(animator) => animator.step(local_time, leds),
        }
    }

    fn advance(&mut self, local_time: Duration) {
        match self {
            Self::Attract(animator) => animator.advance(local_time),
            Self::Transition(animator) => animator.advance(local_time),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Attract(animator) => Animator::reset(animator),
            Self::Transition(animator) => Animator::reset(animator),
        }
    }
}

/// Fraction of `total` covered by `elapsed`, clamped to `0.0..=1.0`
///
/// An empty `total` counts as complete.
pub(crate) fn progress(elapsed: Duration, total: Duration) -> f32 {
    if total.as_ticks() == 0 {
        return 1.0;
    }
    let ratio = elapsed.as_ticks() as f32 / total.as_ticks() as f32;
    ratio.min(1.0)
}

/// Number of whole `period`s elapsed at `local_time`
///
/// A zero period is treated as a single tick.
pub(crate) fn steps_elapsed(local_time: Duration, period: Duration) -> u64 {
    local_time.as_ticks() / period.as_ticks().max(1)
}

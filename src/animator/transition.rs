//! Lane-by-lane color wash
//!
//! Every lane fades its old color out and then fades the new color in. The
//! duration is split into `lanes + 1` slots; lane `i` fades out during slot
//! `i` and in during slot `i + 1`, so two neighbouring lanes are always half
//! a transition apart.

use embassy_time::Duration;

use super::{Animator, AnimatorGroup, FadeAnimator, SolidColor, ZERO};
use crate::{
    color::Rgb,
    geometry::LedRange,
    layout::{LANE_COUNT, TreeLayout},
};

const TRANSITION_LAYERS: usize = 2 * LANE_COUNT;

type LaneFade = FadeAnimator<SolidColor>;

#[derive(Debug, Clone)]
pub struct TreeTransitionAnimator {
    group: AnimatorGroup<LaneFade, TRANSITION_LAYERS>,
}

impl TreeTransitionAnimator {
    /// Wash `lanes` from `from` to `to`, one lane after another
    ///
    /// Lanes beyond the animator's capacity are left untouched.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(duration: Duration, lanes: &[LedRange], from: Rgb, to: Rgb) -> Self {
        let slot = duration / (lanes.len() as u32 + 1);
        let mut group = AnimatorGroup::new();

        for (index, range) in lanes.iter().copied().enumerate() {
            let fade_out_end = slot * (index as u32 + 1);
            let remaining = duration.checked_sub(fade_out_end).unwrap_or(ZERO);

            // Hold `from` until this lane's turn, then fade it out
            let fade_out = FadeAnimator::new(
                ZERO,
                ZERO,
                slot,
                range,
                SolidColor::new(fade_out_end, range, from),
            );
            // Fade `to` in and hold it to the end
            let fade_in = FadeAnimator::new(
                slot,
                ZERO,
                ZERO,
                range,
                SolidColor::new(remaining, range, to),
            );

            if group.add_animator(fade_out, ZERO).is_err()
                || group.add_animator(fade_in, fade_out_end).is_err()
            {
                break;
            }
        }
        group.override_duration(duration);

        Self { group }
    }

    /// Wash every lane of `layout`
    pub fn for_layout(duration: Duration, layout: &TreeLayout, from: Rgb, to: Rgb) -> Self {
        Self::new(duration, &layout.lane_ranges(), from, to)
    }
}

impl Animator for TreeTransitionAnimator {
    fn duration(&self) -> Duration {
        self.group.duration()
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        self.group.step(local_time, leds);
    }
}

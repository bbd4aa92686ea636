//! Chase (marquee) effects
//!
//! Both variants march a ramp pattern along a range of LEDs:
//! - `ChaseAnimator`: endless loop, pattern followed by dark spacing
//! - `SingleChaseAnimator`: a single pass entering and leaving the range

use embassy_time::Duration;

use super::{Animator, steps_elapsed};
use crate::{
    color::{BLACK, Pattern, Rgb, odd_width, ramp_pattern},
    geometry::LedRange,
};

/// Looping chase with `space` dark LEDs between ramps
#[derive(Debug, Clone)]
pub struct ChaseAnimator {
    duration: Duration,
    range: LedRange,
    step_time: Duration,
    pattern: Pattern,
}

impl ChaseAnimator {
    pub fn new(
        duration: Duration,
        range: LedRange,
        color: Rgb,
        width: u16,
        space: u16,
        step_time: Duration,
    ) -> Self {
        let mut pattern: Pattern = ramp_pattern(color, odd_width(width));
        for _ in 0..space {
            if pattern.push(BLACK).is_err() {
                break;
            }
        }

        Self {
            duration,
            range,
            step_time,
            pattern,
        }
    }

    pub fn pattern(&self) -> &[Rgb] {
        &self.pattern
    }
}

impl Animator for ChaseAnimator {
    fn duration(&self) -> Duration {
        self.duration
    }

    #[allow(clippy::cast_possible_truncation)]
    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        let len = self.pattern.len();
        if len == 0 {
            return;
        }

        let step_index = steps_elapsed(local_time, self.step_time);
        let mut pattern_index = (len - 1) - (step_index % len as u64) as usize;
        for led in self.range.slice_mut(leds) {
            *led = self.pattern[pattern_index];
            pattern_index = (pattern_index + 1) % len;
        }
    }
}

/// One pass of a ramp across the range
///
/// The pass is split into `count + width` steps spread over the duration.
/// The pattern starts half outside the range; cells falling outside the range
/// are not drawn.
#[derive(Debug, Clone)]
pub struct SingleChaseAnimator {
    duration: Duration,
    range: LedRange,
    width: u16,
    pattern: Pattern,
}

impl SingleChaseAnimator {
    pub fn new(duration: Duration, range: LedRange, color: Rgb, width: u16) -> Self {
        let width = odd_width(width);
        Self {
            duration,
            range,
            width,
            pattern: ramp_pattern(color, width),
        }
    }
}

impl Animator for SingleChaseAnimator {
    fn duration(&self) -> Duration {
        self.duration
    }

    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        let step_count = u64::from(self.range.count) + u64::from(self.width);
        let ticks_per_step = (self.duration.as_ticks() / step_count).max(1);
        let step_index = (local_time.as_ticks() / ticks_per_step) as i64;
        let position = step_index - i64::from(self.width / 2);

        let lane = self.range.slice_mut(leds);
        for (offset, color) in self.pattern.iter().enumerate() {
            let destination = position + offset as i64;
            let Ok(destination) = usize::try_from(destination) else {
                continue;
            };
            if let Some(led) = lane.get_mut(destination) {
                *led = *color;
            }
        }
    }
}

//! Fill-in reveal
//!
//! Lights the range one LED at a time from its start. Lit LEDs stay lit for
//! the rest of the run.

use embassy_time::Duration;

use super::Animator;
use crate::{color::Rgb, geometry::LedRange};

#[derive(Debug, Clone)]
pub struct FillInAnimator {
    duration: Duration,
    range: LedRange,
    color: Rgb,
}

impl FillInAnimator {
    pub const fn new(duration: Duration, range: LedRange, color: Rgb) -> Self {
        Self {
            duration,
            range,
            color,
        }
    }
}

impl Animator for FillInAnimator {
    fn duration(&self) -> Duration {
        self.duration
    }

    #[allow(clippy::cast_possible_truncation)]
    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        let count = u64::from(self.range.count);
        if count == 0 {
            return;
        }

        let ticks_per_step = (self.duration.as_ticks() / count).max(1);
        let lit = (local_time.as_ticks() / ticks_per_step).min(count) as usize;
        for led in self.range.slice_mut(leds).iter_mut().take(lit) {
            *led = self.color;
        }
    }
}

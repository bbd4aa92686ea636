//! Repeated pattern
//!
//! Tiles a fixed pattern over a range of LEDs.

use embassy_time::Duration;

use super::Animator;
use crate::{
    color::{MAX_PATTERN_LEN, Pattern, Rgb},
    geometry::LedRange,
};

#[derive(Debug, Clone)]
pub struct RepeatedPatternAnimator {
    duration: Duration,
    range: LedRange,
    pattern: Pattern,
}

impl RepeatedPatternAnimator {
    /// Create a tiled pattern; colors beyond the pattern capacity are dropped
    pub fn new(duration: Duration, range: LedRange, pattern: &[Rgb]) -> Self {
        Self {
            duration,
            range,
            pattern: pattern.iter().copied().take(MAX_PATTERN_LEN).collect(),
        }
    }
}

impl Animator for RepeatedPatternAnimator {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn step(&self, _local_time: Duration, leds: &mut [Rgb]) {
        let len = self.pattern.len();
        if len == 0 {
            return;
        }

        for (offset, led) in self.range.slice_mut(leds).iter_mut().enumerate() {
            *led = self.pattern[offset % len];
        }
    }
}

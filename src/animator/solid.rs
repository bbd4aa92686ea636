//! Static color fill
//!
//! Fills a range of LEDs with a single color for its whole duration.

use embassy_time::Duration;

use super::Animator;
use crate::{color::Rgb, geometry::LedRange};

#[derive(Debug, Clone)]
pub struct SolidColor {
    duration: Duration,
    range: LedRange,
    color: Rgb,
}

impl SolidColor {
    pub const fn new(duration: Duration, range: LedRange, color: Rgb) -> Self {
        Self {
            duration,
            range,
            color,
        }
    }
}

impl Animator for SolidColor {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn step(&self, _local_time: Duration, leds: &mut [Rgb]) {
        for led in self.range.slice_mut(leds) {
            *led = self.color;
        }
    }
}

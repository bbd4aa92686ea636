//! Palette cycling over several LED ranges
//!
//! Every `step_duration` each range moves on to the next palette color.
//! Neighbouring ranges are one palette step apart, so colors appear to
//! chase from range to range.

use embassy_time::Duration;
use heapless::Vec;

use super::{Animator, steps_elapsed};
use crate::{color::Rgb, geometry::LedRange};

/// Maximum number of ranges per animator
pub const MAX_RANGES: usize = 16;
/// Maximum number of palette colors per animator
pub const MAX_PALETTE_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct RangeAnimator {
    duration: Duration,
    step_duration: Duration,
    ranges: Vec<LedRange, MAX_RANGES>,
    colors: Vec<Rgb, MAX_PALETTE_LEN>,
}

impl RangeAnimator {
    pub const fn new(duration: Duration, step_duration: Duration) -> Self {
        Self {
            duration,
            step_duration,
            ranges: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Add a range; returns it back if the animator is full
    pub fn add_range(&mut self, range: LedRange) -> Result<(), LedRange> {
        self.ranges.push(range)
    }

    /// Add a palette color; returns it back if the palette is full
    pub fn add_color(&mut self, color: Rgb) -> Result<(), Rgb> {
        self.colors.push(color)
    }
}

impl Animator for RangeAnimator {
    fn duration(&self) -> Duration {
        self.duration
    }

    #[allow(clippy::cast_possible_truncation)]
    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        let len = self.colors.len();
        if len == 0 {
            return;
        }

        let mut color_index =
            (steps_elapsed(local_time, self.step_duration) % len as u64) as usize;
        for range in &self.ranges {
            let color = self.colors[color_index];
            for led in range.slice_mut(leds) {
                *led = color;
            }
            color_index = (color_index + 1) % len;
        }
    }
}

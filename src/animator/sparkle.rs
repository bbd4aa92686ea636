//! Sparkle (twinkle) overlay
//!
//! A fixed pool of sparkles is scattered over a set of LED ranges. Each
//! sparkle picks a random range, a random LED inside it and a random start
//! within the next cycle. Once started it is visible for `sparkle_duration`
//! with an ease-up/ease-down envelope, cross-faded over whatever the LED
//! already shows. `cycle_duration` after its start the slot is recycled.
//!
//! This is the only animator with state across frames. It assumes a
//! monotonic timeline: if time moves backwards every sparkle is dropped and
//! the pool fills up again from the new time.

use embassy_time::Duration;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{Animator, progress};
use crate::{
    color::{Rgb, cross_fade_color},
    geometry::{LedIndex, LedRange},
    rng::Rng,
};

/// Number of sparkle slots in the pool
pub const SPARKLE_SLOTS: usize = 24;
/// Maximum number of ranges sparkles are spread over
pub const MAX_SPARKLE_RANGES: usize = 8;

#[derive(Debug, Clone, Copy)]
struct Sparkle {
    start: Duration,
    led: LedIndex,
}

#[derive(Debug, Clone)]
pub struct SparkleAnimator {
    duration: Duration,
    color: Rgb,
    sparkle_duration: Duration,
    cycle_duration: Duration,
    ranges: Vec<LedRange, MAX_SPARKLE_RANGES>,
    slots: [Option<Sparkle>; SPARKLE_SLOTS],
    last_time: Option<Duration>,
    rng: Rng,
}

impl SparkleAnimator {
    pub fn new(
        duration: Duration,
        ranges: &[LedRange],
        color: Rgb,
        sparkle_duration: Duration,
        cycle_duration: Duration,
        seed: u64,
    ) -> Self {
        Self {
            duration,
            color,
            sparkle_duration,
            cycle_duration,
            ranges: ranges.iter().copied().take(MAX_SPARKLE_RANGES).collect(),
            slots: [None; SPARKLE_SLOTS],
            last_time: None,
            rng: Rng::new(seed),
        }
    }

    /// Number of slots currently holding a scheduled sparkle
    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Number of sparkles visible at `local_time`
    pub fn visible_count(&self, local_time: Duration) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|sparkle| self.elapsed(sparkle, local_time).is_some())
            .count()
    }

    fn invalidate(&mut self) {
        self.slots = [None; SPARKLE_SLOTS];
        self.last_time = None;
    }

    /// Time since `sparkle` started, while it is visible
    fn elapsed(&self, sparkle: &Sparkle, local_time: Duration) -> Option<Duration> {
        local_time
            .checked_sub(sparkle.start)
            .filter(|elapsed| *elapsed < self.sparkle_duration)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn schedule(&mut self, local_time: Duration) -> Option<Sparkle> {
        let range = *self.ranges.get(self.rng.next_index(self.ranges.len()))?;
        if range.count == 0 {
            return None;
        }

        let offset = self.rng.next_int(u32::from(range.count)) as u16;
        let delay = self.rng.next_u64_below(self.cycle_duration.as_ticks());
        Some(Sparkle {
            start: local_time + Duration::from_ticks(delay),
            led: range.start + offset,
        })
    }
}

impl Animator for SparkleAnimator {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        for sparkle in self.slots.iter().flatten() {
            let Some(elapsed) = self.elapsed(sparkle, local_time) else {
                continue;
            };

            let t = progress(elapsed, self.sparkle_duration);
            let parabola = 4.0 * t * (1.0 - t);
            let intensity = parabola * parabola;
            if let Some(led) = leds.get_mut(usize::from(sparkle.led)) {
                *led = cross_fade_color(intensity, *led, self.color);
            }
        }
    }

    fn advance(&mut self, local_time: Duration) {
        if self.last_time.is_some_and(|last| local_time < last) {
            #[cfg(feature = "esp32-log")]
            println!("[SparkleAnimator.advance] time moved backwards, dropping sparkles");
            self.invalidate();
        }
        self.last_time = Some(local_time);

        for index in 0..SPARKLE_SLOTS {
            let expired = match self.slots[index] {
                Some(sparkle) => local_time >= sparkle.start + self.cycle_duration,
                None => true,
            };
            if expired {
                self.slots[index] = self.schedule(local_time);
            }
        }
    }

    fn reset(&mut self) {
        self.invalidate();
    }
}

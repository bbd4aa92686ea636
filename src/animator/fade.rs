//! Fade envelope around a child animator
//!
//! The child renders first, then its LED range is scaled by a linear ramp:
//! 0 -> 1 over the fade-in, untouched during the hold and 1 -> 0 over the
//! fade-out.

use embassy_time::Duration;

use super::{Animator, ZERO, progress};
use crate::{
    color::{Rgb, scale_color},
    geometry::LedRange,
};

#[derive(Debug, Clone)]
pub struct FadeAnimator<C> {
    fade_in: Duration,
    hold: Duration,
    fade_out: Duration,
    range: LedRange,
    child: C,
}

impl<C: Animator> FadeAnimator<C> {
    /// Wrap `child` into a fade envelope over `range`
    ///
    /// A zero `hold` stretches the hold so the envelope spans exactly the
    /// child's duration.
    pub fn new(
        fade_in: Duration,
        hold: Duration,
        fade_out: Duration,
        range: LedRange,
        child: C,
    ) -> Self {
        let hold = if hold == ZERO {
            child
                .duration()
                .checked_sub(fade_in + fade_out)
                .unwrap_or(ZERO)
        } else {
            hold
        };

        Self {
            fade_in,
            hold,
            fade_out,
            range,
            child,
        }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Brightness scale at `local_time`, `None` while holding
    fn scale(&self, local_time: Duration) -> Option<f32> {
        let hold_end = self.fade_in + self.hold;
        if local_time < self.fade_in {
            Some(progress(local_time, self.fade_in))
        } else if local_time < hold_end {
            None
        } else {
            let elapsed = local_time.checked_sub(hold_end).unwrap_or(ZERO);
            Some(1.0 - progress(elapsed, self.fade_out))
        }
    }
}

impl<C: Animator> Animator for FadeAnimator<C> {
    fn duration(&self) -> Duration {
        self.fade_in + self.hold + self.fade_out
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        if local_time < self.child.duration() {
            self.child.step(local_time, leds);
        }

        let Some(scale) = self.scale(local_time) else {
            return;
        };
        for led in self.range.slice_mut(leds) {
            *led = scale_color(scale, *led);
        }
    }

    fn advance(&mut self, local_time: Duration) {
        if local_time < self.child.duration() {
            self.child.advance(local_time);
        }
    }

    fn reset(&mut self) {
        self.child.reset();
    }
}

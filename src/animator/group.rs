//! Animator group
//!
//! Runs a set of children, each on its own window of the group's timeline.
//! Children are stepped in insertion order, so later ones draw over (or
//! blend with) earlier ones.

use embassy_time::Duration;
use heapless::Vec;

use super::{Animator, ZERO};
use crate::color::Rgb;

#[derive(Debug, Clone)]
struct GroupEntry<C> {
    animator: C,
    start: Duration,
}

impl<C: Animator> GroupEntry<C> {
    /// Child-local time if `local_time` is inside this entry's window
    fn local_time(&self, local_time: Duration) -> Option<Duration> {
        local_time
            .checked_sub(self.start)
            .filter(|child_time| *child_time < self.animator.duration())
    }
}

/// Group of up to `N` animators with individual start offsets
#[derive(Debug, Clone)]
pub struct AnimatorGroup<C, const N: usize> {
    entries: Vec<GroupEntry<C>, N>,
    duration: Duration,
    duration_override: Option<Duration>,
}

impl<C: Animator, const N: usize> Default for AnimatorGroup<C, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Animator, const N: usize> AnimatorGroup<C, N> {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            duration: ZERO,
            duration_override: None,
        }
    }

    /// Add a child starting at `start` on the group's timeline
    ///
    /// Returns the child if the group is full.
    pub fn add_animator(&mut self, animator: C, start: Duration) -> Result<(), C> {
        let end = start + animator.duration();
        self.entries
            .push(GroupEntry { animator, start })
            .map_err(|entry| entry.animator)?;

        if self.duration_override.is_none() {
            self.duration = self.duration.max(end);
        }
        Ok(())
    }

    /// Add a child right after the current end of the group, plus `offset`
    pub fn append_animator(&mut self, animator: C, offset: Duration) -> Result<(), C> {
        self.add_animator(animator, self.duration + offset)
    }

    /// Pin the group duration, ignoring the end of current and future children
    pub fn override_duration(&mut self, duration: Duration) {
        self.duration_override = Some(duration);
        self.duration = duration;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C: Animator, const N: usize> Animator for AnimatorGroup<C, N> {
    fn duration(&self) -> Duration {
        self.duration
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        for entry in &self.entries {
            if let Some(child_time) = entry.local_time(local_time) {
                entry.animator.step(child_time, leds);
            }
        }
    }

    fn advance(&mut self, local_time: Duration) {
        for entry in &mut self.entries {
            if let Some(child_time) = entry.local_time(local_time) {
                entry.animator.advance(child_time);
            }
        }
    }

    fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.animator.reset();
        }
    }
}

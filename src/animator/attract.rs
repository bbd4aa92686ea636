//! Attract mode
//!
//! Green lanes and path over a red base, with white sparkles drifting over
//! the lanes. The whole tree fades in and out. The timeline is long enough to
//! be left running until a game starts; the engine restarts it from scratch
//! whenever attract mode is entered.

use embassy_time::Duration;

use super::{Animator, AnimatorGroup, FadeAnimator, SolidColor, SparkleAnimator, ZERO};
use crate::{
    color::{GREEN, RED, Rgb, WHITE},
    layout::{LANE_COUNT, TreeLayout},
};

const ATTRACT_LAYERS: usize = LANE_COUNT + 3;

const FADE_DURATION: Duration = Duration::from_millis(1_000);
const SPARKLE_DURATION: Duration = Duration::from_millis(400);
const SPARKLE_CYCLE: Duration = Duration::from_millis(1_500);

/// Layers of the attract scene
#[derive(Debug, Clone)]
pub enum AttractLayer {
    Solid(SolidColor),
    Sparkle(SparkleAnimator),
}

impl Animator for AttractLayer {
    fn duration(&self) -> Duration {
        match self {
            Self::Solid(animator) => animator.duration(),
            Self::Sparkle(animator) => animator.duration(),
        }
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        match self {
            Self::Solid(animator) => animator.step(local_time, leds),
            Self::Sparkle(animator) => animator.step(local_time, leds),
        }
    }

    fn advance(&mut self, local_time: Duration) {
        match self {
            Self::Solid(animator) => animator.advance(local_time),
            Self::Sparkle(animator) => animator.advance(local_time),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Solid(animator) => Animator::reset(animator),
            Self::Sparkle(animator) => Animator::reset(animator),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttractAnimator {
    inner: FadeAnimator<AnimatorGroup<AttractLayer, ATTRACT_LAYERS>>,
}

impl AttractAnimator {
    pub fn new(layout: &TreeLayout, duration: Duration, seed: u64) -> Self {
        let mut group = AnimatorGroup::new();
        let lane_ranges = layout.lane_ranges();

        let solids = lane_ranges
            .iter()
            .map(|range| SolidColor::new(duration, *range, GREEN))
            .chain([
                SolidColor::new(duration, layout.base_range(), RED),
                SolidColor::new(duration, layout.path_range(), GREEN),
            ]);
        for solid in solids {
            let _ = group.add_animator(AttractLayer::Solid(solid), ZERO);
        }

        // Sparkles blend with the solids, so they go last
        let sparkle = SparkleAnimator::new(
            duration,
            &lane_ranges,
            WHITE,
            SPARKLE_DURATION,
            SPARKLE_CYCLE,
            seed,
        );
        let _ = group.add_animator(AttractLayer::Sparkle(sparkle), ZERO);

        Self {
            inner: FadeAnimator::new(FADE_DURATION, ZERO, FADE_DURATION, layout.tree_range(), group),
        }
    }
}

impl Animator for AttractAnimator {
    fn duration(&self) -> Duration {
        self.inner.duration()
    }

    fn step(&self, local_time: Duration, leds: &mut [Rgb]) {
        self.inner.step(local_time, leds);
    }

    fn advance(&mut self, local_time: Duration) {
        self.inner.advance(local_time);
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}

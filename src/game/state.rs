//! Top-level game states and their animations

use embassy_time::Duration;

use crate::animator::StateAnimator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Attract,
    GameStartAnimation,
    LevelStartAnimation,
    PlayingLevel,
    LifeLostAnimation,
    GameOverAnimation,
}

impl GameState {
    pub const fn is_animated(self) -> bool {
        !matches!(self, Self::PlayingLevel)
    }
}

/// Binding of an animated state to its timeline
///
/// States without an animator are drawn by the engine itself.
#[derive(Debug, Clone)]
pub struct AnimatedState {
    pub state: GameState,
    pub duration: Duration,
    pub looping: bool,
    pub animator: Option<StateAnimator>,
}

impl AnimatedState {
    pub const fn new(
        state: GameState,
        duration: Duration,
        looping: bool,
        animator: Option<StateAnimator>,
    ) -> Self {
        Self {
            state,
            duration,
            looping,
            animator,
        }
    }
}

//! Tuning constants and engine configuration

use embassy_time::Duration;

use crate::layout::TreeLayout;

/// Maximum number of simultaneous enemies
pub const MAX_ENEMIES: usize = 20;
/// Maximum number of simultaneous shots, player and enemy
pub const MAX_SHOTS: usize = 30;
/// Maximum number of player shots in flight
pub const MAX_PLAYER_SHOTS: usize = 3;

/// Player shot speed in lane lengths per second
pub const PLAYER_SHOT_SPEED: f32 = 1.5;
/// Enemy shot speed relative to the speed of the enemy firing it
pub const ENEMY_SHOT_SPEED_FACTOR: f32 = 2.0;
/// Speed of an enemy chasing the player, relative to its lane speed
pub const PATH_SPEED_FACTOR: f32 = 0.5;

/// Lane distance at which two entities in the same lane collide
pub const COLLISION_THRESHOLD: f32 = 0.05;
/// Lane position past which a player shot can hit an enemy on the path
pub const SIDE_THRESHOLD: f32 = 0.9;
/// Path distance between player and enemy for such a side hit
pub const SIDE_DESTROY_THRESHOLD: f32 = 0.05;
/// Path distance at which the player is hit
pub const PLAYER_HIT_THRESHOLD: f32 = 0.04;

/// Score for shooting down an enemy shot
pub const SHOT_DOWN_SCORE: u32 = 10;
pub const STARTING_LIVES: u8 = 4;

/// Half period of the lane flashing while a life is lost
pub const LIFE_LOST_FLASH_PERIOD: Duration = Duration::from_millis(250);

/// Durations of the animated game states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTimings {
    /// Length of one attract cycle before it starts over
    pub attract: Duration,
    pub game_start: Duration,
    pub level_start: Duration,
    pub life_lost: Duration,
    pub game_over: Duration,
}

impl StateTimings {
    pub const DEFAULT: Self = Self {
        attract: Duration::from_secs(600),
        game_start: Duration::from_millis(3_000),
        level_start: Duration::from_millis(1_500),
        life_lost: Duration::from_millis(2_000),
        game_over: Duration::from_millis(3_000),
    };
}

impl Default for StateTimings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration for the game engine
#[derive(Debug, Clone, Copy)]
pub struct GameEngineConfig {
    pub layout: TreeLayout,
    pub timings: StateTimings,
    pub starting_lives: u8,
    /// Seed for enemy placement and attract sparkles
    pub seed: u64,
}

impl GameEngineConfig {
    pub const DEFAULT: Self = Self {
        layout: TreeLayout::DEFAULT,
        timings: StateTimings::DEFAULT,
        starting_lives: STARTING_LIVES,
        seed: 0x7e3b_5a1d_9c42_08f1,
    };
}

impl Default for GameEngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

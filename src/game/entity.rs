//! Enemies and shots

use embassy_time::{Duration, Instant};

use super::level::Level;
use crate::color::{GREEN, RED, Rgb, WHITE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    White,
    Red,
    Green,
}

impl EnemyKind {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::White, Self::Red, Self::Green];

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Red => 1,
            Self::Green => 2,
        }
    }

    /// Base lane speed in lane lengths per second
    pub const fn speed(self) -> f32 {
        match self {
            Self::White => 0.15,
            Self::Red => 0.2,
            Self::Green => 0.25,
        }
    }

    pub const fn color(self) -> Rgb {
        match self {
            Self::White => WHITE,
            Self::Red => RED,
            Self::Green => GREEN,
        }
    }

    /// Base time between two shots
    pub const fn shot_delta(self) -> Duration {
        match self {
            Self::White => Duration::from_ticks(0),
            Self::Red => Duration::from_millis(2_000),
            Self::Green => Duration::from_millis(1_500),
        }
    }

    /// Shot counter the enemy spawns with
    ///
    /// An enemy only fires while more than one shot remains, so a count
    /// of one means it never fires.
    pub const fn shot_count(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Red => 3,
            Self::Green => 4,
        }
    }

    pub const fn lane_switching(self) -> bool {
        matches!(self, Self::Green)
    }

    pub const fn score(self) -> u32 {
        match self {
            Self::White => 100,
            Self::Red => 200,
            Self::Green => 300,
        }
    }
}

/// Where an enemy is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyPosition {
    /// Lane position, 0 at the outer end
    InLane(f32),
    /// Path position, chasing the player
    OnPlayerPath(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub lane: usize,
    /// Lane lengths per second
    pub speed: f32,
    pub color: Rgb,
    pub shot_delta: Duration,
    pub next_shot_time: Instant,
    pub shots_remaining: u8,
    /// Declared for green enemies, no behavior attached yet
    pub lane_switching: bool,
    pub start_time: Instant,
    pub position: EnemyPosition,
}

impl Enemy {
    /// Enemy of `kind` entering `lane` at `now`, tuned for `level`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn spawn(kind: EnemyKind, lane: usize, level: &Level, now: Instant) -> Self {
        let base_delta = kind.shot_delta().as_ticks() as f32;
        let shot_delta =
            Duration::from_ticks((base_delta / level.fire_rate_multiplier.max(1.0)) as u64);

        Self {
            kind,
            lane,
            speed: kind.speed() * level.speed_multiplier,
            color: kind.color(),
            shot_delta,
            next_shot_time: now + shot_delta,
            shots_remaining: kind.shot_count(),
            lane_switching: kind.lane_switching(),
            start_time: now,
            position: EnemyPosition::InLane(0.0),
        }
    }

    pub fn lane_position(&self) -> Option<f32> {
        match self.position {
            EnemyPosition::InLane(position) => Some(position),
            EnemyPosition::OnPlayerPath(_) => None,
        }
    }

    pub fn path_position(&self) -> Option<f32> {
        match self.position {
            EnemyPosition::InLane(_) => None,
            EnemyPosition::OnPlayerPath(position) => Some(position),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOwner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub owner: ShotOwner,
    pub lane: usize,
    /// Lane lengths per second, negative towards the outer end
    pub speed: f32,
    pub lane_position: f32,
}

impl Shot {
    /// Player shot leaving the path end of `lane`
    pub const fn player(lane: usize, speed: f32) -> Self {
        Self {
            owner: ShotOwner::Player,
            lane,
            speed: -speed,
            lane_position: 1.0,
        }
    }

    /// Enemy shot heading for the player
    pub const fn enemy(lane: usize, lane_position: f32, speed: f32) -> Self {
        Self {
            owner: ShotOwner::Enemy,
            lane,
            speed,
            lane_position,
        }
    }

    pub fn is_player(&self) -> bool {
        self.owner == ShotOwner::Player
    }
}

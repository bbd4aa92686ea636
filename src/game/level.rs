//! Level table and per-level enemy quotas

use embassy_time::Duration;

use super::entity::EnemyKind;

pub const LEVEL_COUNT: usize = 5;

/// Static tuning of one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    pub white: u16,
    pub red: u16,
    pub green: u16,
    /// Enemy shot cadence is divided by this
    pub fire_rate_multiplier: f32,
    /// Enemy lane speed is multiplied by this
    pub speed_multiplier: f32,
    /// Time between two spawns
    pub spawn_delta: Duration,
}

impl Level {
    const fn new(
        white: u16,
        red: u16,
        green: u16,
        fire_rate_multiplier: f32,
        speed_multiplier: f32,
        spawn_delta_ms: u64,
    ) -> Self {
        Self {
            white,
            red,
            green,
            fire_rate_multiplier,
            speed_multiplier,
            spawn_delta: Duration::from_millis(spawn_delta_ms),
        }
    }

    /// Level at `index`, clamped to the last one
    pub fn get(index: usize) -> &'static Level {
        &LEVELS[index.min(LEVEL_COUNT - 1)]
    }
}

pub static LEVELS: [Level; LEVEL_COUNT] = [
    Level::new(15, 0, 0, 1.0, 1.0, 2_000),
    Level::new(15, 10, 0, 1.0, 1.0, 1_800),
    Level::new(15, 10, 5, 1.0, 1.0, 1_500),
    Level::new(20, 20, 10, 2.0, 2.0, 1_200),
    Level::new(30, 30, 10, 3.0, 3.0, 1_000),
];

/// Enemies of each kind still to be spawned in the current level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnemyQuota {
    remaining: [u16; EnemyKind::COUNT],
}

impl EnemyQuota {
    pub const EMPTY: Self = Self {
        remaining: [0; EnemyKind::COUNT],
    };

    pub const fn for_level(level: &Level) -> Self {
        Self {
            remaining: [level.white, level.red, level.green],
        }
    }

    pub fn remaining(&self, kind: EnemyKind) -> u16 {
        self.remaining[kind.index()]
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.iter().all(|count| *count == 0)
    }

    /// First kind with quota left, scanning from `offset`
    pub fn pick(&self, offset: usize) -> Option<EnemyKind> {
        (0..EnemyKind::COUNT)
            .map(|step| EnemyKind::ALL[(offset + step) % EnemyKind::COUNT])
            .find(|kind| self.remaining(*kind) > 0)
    }

    /// Consume one enemy of `kind`
    pub fn take(&mut self, kind: EnemyKind) {
        let remaining = &mut self.remaining[kind.index()];
        *remaining = remaining.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_index_clamps_at_last_level() {
        assert_eq!(Level::get(7), &LEVELS[LEVEL_COUNT - 1]);
        assert_eq!(Level::get(0).white, 15);
    }

    #[test]
    fn pick_scans_from_offset() {
        let quota = EnemyQuota::for_level(&LEVELS[2]);
        assert_eq!(quota.pick(0), Some(EnemyKind::White));
        assert_eq!(quota.pick(1), Some(EnemyKind::Red));
        assert_eq!(quota.pick(2), Some(EnemyKind::Green));

        let quota = EnemyQuota::for_level(&LEVELS[0]);
        assert_eq!(quota.pick(1), Some(EnemyKind::White));
        assert_eq!(quota.pick(2), Some(EnemyKind::White));
    }

    #[test]
    fn take_exhausts_quota() {
        let mut quota = EnemyQuota::for_level(&Level::new(1, 0, 1, 1.0, 1.0, 1_000));
        quota.take(EnemyKind::White);
        assert!(!quota.is_exhausted());
        quota.take(EnemyKind::Green);
        quota.take(EnemyKind::Green);
        assert!(quota.is_exhausted());
        assert_eq!(quota.pick(0), None);
    }
}

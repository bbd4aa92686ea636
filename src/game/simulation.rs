//! Per-tick game simulation
//!
//! All mutable game state lives in [`Simulation`]. A playing tick runs the
//! phases below in this order, each one seeing the results of the previous:
//! [`advance`], [`spawn`], [`enemy_fire`], [`player_fire`], [`collide`] and
//! [`level_complete`].

use embassy_time::{Duration, Instant};
use libm::fabsf;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{
    config::{
        COLLISION_THRESHOLD, ENEMY_SHOT_SPEED_FACTOR, MAX_ENEMIES, MAX_PLAYER_SHOTS, MAX_SHOTS,
        PATH_SPEED_FACTOR, PLAYER_HIT_THRESHOLD, PLAYER_SHOT_SPEED, SHOT_DOWN_SCORE,
        SIDE_DESTROY_THRESHOLD, SIDE_THRESHOLD,
    },
    entity::{Enemy, EnemyKind, EnemyPosition, Shot},
    level::{EnemyQuota, LEVEL_COUNT, Level},
    pool::Pool,
};
use crate::{layout::TreeLayout, rng::Rng};

#[derive(Debug, Clone)]
pub(crate) struct Simulation {
    pub(crate) layout: TreeLayout,
    pub(crate) enemies: Pool<Enemy, MAX_ENEMIES>,
    pub(crate) shots: Pool<Shot, MAX_SHOTS>,
    pub(crate) quota: EnemyQuota,
    pub(crate) level_index: usize,
    pub(crate) lives: u8,
    pub(crate) score: u32,
    /// Normalized player position on the path
    pub(crate) player_position: f32,
    pub(crate) next_spawn: Instant,
    pub(crate) rng: Rng,
}

impl Simulation {
    pub(crate) const fn new(layout: TreeLayout, seed: u64) -> Self {
        Self {
            layout,
            enemies: Pool::new(),
            shots: Pool::new(),
            quota: EnemyQuota::EMPTY,
            level_index: 0,
            lives: 0,
            score: 0,
            player_position: 0.5,
            next_spawn: Instant::from_ticks(0),
            rng: Rng::new(seed),
        }
    }

    /// Start a new game
    pub(crate) fn reset(&mut self, lives: u8) {
        self.clear_board();
        self.quota = EnemyQuota::EMPTY;
        self.level_index = 0;
        self.lives = lives;
        self.score = 0;
    }

    /// Load the current level's quotas onto an empty board
    pub(crate) fn load_level(&mut self) {
        self.clear_board();
        self.quota = EnemyQuota::for_level(self.level());
    }

    pub(crate) fn level(&self) -> &'static Level {
        Level::get(self.level_index)
    }

    pub(crate) fn clear_board(&mut self) {
        self.enemies.clear();
        self.shots.clear();
    }

    pub(crate) fn set_player_position(&mut self, position: f32) {
        self.player_position = position.clamp(0.0, 1.0);
    }

    /// Index of the lane whose path end is closest to the player
    pub(crate) fn player_lane(&self) -> usize {
        let mut nearest = 0;
        let mut nearest_distance = f32::MAX;
        for (index, lane) in self.layout.lanes.iter().enumerate() {
            let distance = fabsf(self.layout.path_position_of(*lane) - self.player_position);
            if distance < nearest_distance {
                nearest = index;
                nearest_distance = distance;
            }
        }
        nearest
    }

    fn lane_path_position(&self, lane: usize) -> f32 {
        self.layout
            .lanes
            .get(lane)
            .map_or(0.0, |lane| self.layout.path_position_of(*lane))
    }

    fn player_shot_count(&self) -> usize {
        self.shots.iter().filter(|shot| shot.is_player()).count()
    }
}

/// Duration in seconds
pub(crate) fn seconds(duration: Duration) -> f32 {
    duration.as_micros() as f32 / 1_000_000.0
}

/// Move shots and enemies by `delta`
pub(crate) fn advance(sim: &mut Simulation, now: Instant, delta: Duration) {
    let delta = seconds(delta);
    for shot in sim.shots.iter_mut() {
        shot.lane_position += delta * shot.speed;
    }

    let player = sim.player_position;
    let layout = sim.layout;
    for enemy in sim.enemies.iter_mut() {
        match enemy.position {
            EnemyPosition::InLane(_) => {
                let elapsed = now
                    .checked_duration_since(enemy.start_time)
                    .unwrap_or(Duration::from_ticks(0));
                let lane_position = seconds(elapsed) * enemy.speed;
                enemy.position = if lane_position >= 1.0 {
                    let path_position = layout
                        .lanes
                        .get(enemy.lane)
                        .map_or(0.0, |lane| layout.path_position_of(*lane));
                    EnemyPosition::OnPlayerPath(path_position)
                } else {
                    EnemyPosition::InLane(lane_position)
                };
            }
            EnemyPosition::OnPlayerPath(position) => {
                let reach = delta * enemy.speed * PATH_SPEED_FACTOR;
                let moved = if player > position {
                    (position + reach).min(player)
                } else {
                    (position - reach).max(player)
                };
                enemy.position = EnemyPosition::OnPlayerPath(moved);
            }
        }
    }
}

/// Spawn the next enemy if one is due
pub(crate) fn spawn(sim: &mut Simulation, now: Instant) {
    if now < sim.next_spawn || sim.quota.is_exhausted() {
        return;
    }
    let level = sim.level();
    sim.next_spawn = now + level.spawn_delta;

    let offset = sim.rng.next_index(EnemyKind::COUNT);
    let Some(kind) = sim.quota.pick(offset) else {
        return;
    };
    let lane = sim.rng.next_index(sim.layout.lanes.len());

    match sim.enemies.insert(Enemy::spawn(kind, lane, level, now)) {
        Ok(_) => sim.quota.take(kind),
        Err(_) => {
            #[cfg(feature = "esp32-log")]
            println!("[Simulation.spawn] enemy pool full, skipping spawn");
        }
    }
}

/// Let every due enemy in a lane fire
pub(crate) fn enemy_fire(sim: &mut Simulation, now: Instant) {
    let Simulation { enemies, shots, .. } = sim;
    for enemy in enemies.iter_mut() {
        let Some(lane_position) = enemy.lane_position() else {
            continue;
        };
        if now < enemy.next_shot_time || enemy.shots_remaining <= 1 {
            continue;
        }

        enemy.next_shot_time = now + enemy.shot_delta;
        let shot = Shot::enemy(
            enemy.lane,
            lane_position,
            enemy.speed * ENEMY_SHOT_SPEED_FACTOR,
        );
        if shots.insert(shot).is_ok() {
            enemy.shots_remaining -= 1;
        } else {
            #[cfg(feature = "esp32-log")]
            println!("[Simulation.enemy_fire] shot pool full, dropping shot");
        }
    }
}

/// Fire a player shot on a fresh button press
pub(crate) fn player_fire(sim: &mut Simulation, fire_pressed: bool) {
    if !fire_pressed || sim.player_shot_count() >= MAX_PLAYER_SHOTS {
        return;
    }
    let lane = sim.player_lane();
    let _ = sim.shots.insert(Shot::player(lane, PLAYER_SHOT_SPEED));
}

/// Resolve collisions
///
/// Returns true if the player was hit. A hit costs a life and clears the
/// whole board.
pub(crate) fn collide(sim: &mut Simulation) -> bool {
    for shot_index in 0..sim.shots.capacity() {
        match sim.shots.get(shot_index) {
            Some(shot) if shot.is_player() => {}
            _ => continue,
        }

        if shoot_enemy(sim, shot_index) || shoot_enemy_shot(sim, shot_index) {
            continue;
        }
        if sim
            .shots
            .get(shot_index)
            .is_some_and(|shot| shot.lane_position <= 0.0)
        {
            sim.shots.remove(shot_index);
        }
    }

    let mut player_hit = false;
    for shot_index in 0..sim.shots.capacity() {
        let Some(shot) = sim.shots.get(shot_index) else {
            continue;
        };
        if shot.is_player() || shot.lane_position < 1.0 {
            continue;
        }
        let distance = fabsf(sim.lane_path_position(shot.lane) - sim.player_position);
        sim.shots.remove(shot_index);
        player_hit |= distance < PLAYER_HIT_THRESHOLD;
    }

    if !player_hit {
        let player = sim.player_position;
        let catcher = sim.enemies.indexed().find_map(|(index, enemy)| {
            enemy
                .path_position()
                .filter(|position| fabsf(position - player) < PLAYER_HIT_THRESHOLD)
                .map(|_| index)
        });
        if let Some(index) = catcher {
            sim.enemies.remove(index);
            player_hit = true;
        }
    }

    if player_hit {
        sim.lives = sim.lives.saturating_sub(1);
        sim.clear_board();
        #[cfg(feature = "esp32-log")]
        println!("[Simulation.collide] player hit, {} lives left", sim.lives);
    }
    player_hit
}

/// Player shot against enemies, at most one kill
fn shoot_enemy(sim: &mut Simulation, shot_index: usize) -> bool {
    let Some(shot) = sim.shots.get(shot_index).copied() else {
        return false;
    };
    let player = sim.player_position;

    let target = sim.enemies.indexed().find_map(|(index, enemy)| {
        let hit = match enemy.position {
            EnemyPosition::InLane(position) => {
                enemy.lane == shot.lane
                    && fabsf(position - shot.lane_position) < COLLISION_THRESHOLD
            }
            EnemyPosition::OnPlayerPath(position) => {
                shot.lane_position > SIDE_THRESHOLD
                    && fabsf(position - player) < SIDE_DESTROY_THRESHOLD
            }
        };
        hit.then_some((index, enemy.kind))
    });

    let Some((enemy_index, kind)) = target else {
        return false;
    };
    sim.enemies.remove(enemy_index);
    sim.shots.remove(shot_index);
    sim.score += kind.score();
    true
}

/// Player shot against enemy shots in the same lane
fn shoot_enemy_shot(sim: &mut Simulation, shot_index: usize) -> bool {
    let Some(shot) = sim.shots.get(shot_index).copied() else {
        return false;
    };

    let target = sim.shots.indexed().find_map(|(index, other)| {
        (!other.is_player()
            && other.lane == shot.lane
            && fabsf(other.lane_position - shot.lane_position) < COLLISION_THRESHOLD)
            .then_some(index)
    });

    let Some(other_index) = target else {
        return false;
    };
    sim.shots.remove(other_index);
    sim.shots.remove(shot_index);
    sim.score += SHOT_DOWN_SCORE;
    true
}

/// Move to the next level once every enemy is spawned and destroyed
///
/// Returns true if the level was cleared.
pub(crate) fn level_complete(sim: &mut Simulation) -> bool {
    if !sim.quota.is_exhausted() || !sim.enemies.is_empty() {
        return false;
    }
    sim.level_index = (sim.level_index + 1).min(LEVEL_COUNT - 1);
    #[cfg(feature = "esp32-log")]
    println!("[Simulation.level_complete] advancing to level {}", sim.level_index);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::LEVELS;

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn playing() -> Simulation {
        let mut sim = Simulation::new(TreeLayout::DEFAULT, 42);
        sim.reset(4);
        sim.load_level();
        sim
    }

    fn enemy_at(lane: usize, position: EnemyPosition) -> Enemy {
        let mut enemy = Enemy::spawn(EnemyKind::Red, lane, &LEVELS[0], ms(0));
        enemy.position = position;
        enemy
    }

    #[test]
    fn in_lane_position_follows_spawn_time() {
        let mut sim = playing();
        let _ = sim.enemies.insert(Enemy::spawn(EnemyKind::White, 2, &LEVELS[0], ms(1_000)));

        advance(&mut sim, ms(3_000), Duration::from_millis(10));
        let position = sim.enemies.get(0).and_then(Enemy::lane_position);
        assert!(position.is_some_and(|p| fabsf(p - 0.3) < 1e-4));
    }

    #[test]
    fn enemy_leaves_lane_onto_path_once() {
        let mut sim = playing();
        sim.player_position = 0.0;
        let _ = sim.enemies.insert(Enemy::spawn(EnemyKind::White, 3, &LEVELS[0], ms(0)));

        advance(&mut sim, ms(7_000), Duration::from_millis(10));
        let expected = sim.layout.path_position_of(sim.layout.lanes[3]);
        assert_eq!(
            sim.enemies.get(0).and_then(Enemy::path_position),
            Some(expected)
        );

        advance(&mut sim, ms(8_000), Duration::from_millis(1_000));
        let position = sim.enemies.get(0).and_then(Enemy::path_position);
        assert!(position.is_some_and(|p| p < expected));
    }

    #[test]
    fn path_enemy_does_not_overshoot_player() {
        let mut sim = playing();
        sim.player_position = 0.5;
        let _ = sim.enemies.insert(enemy_at(0, EnemyPosition::OnPlayerPath(0.49)));

        advance(&mut sim, ms(10_000), Duration::from_secs(5));
        assert_eq!(sim.enemies.get(0).and_then(Enemy::path_position), Some(0.5));
    }

    #[test]
    fn spawn_respects_schedule_and_quota() {
        let mut sim = playing();
        sim.next_spawn = ms(100);

        spawn(&mut sim, ms(50));
        assert!(sim.enemies.is_empty());

        spawn(&mut sim, ms(100));
        assert_eq!(sim.enemies.len(), 1);
        assert_eq!(sim.quota.remaining(EnemyKind::White), 14);
        assert_eq!(sim.next_spawn, ms(2_100));

        spawn(&mut sim, ms(200));
        assert_eq!(sim.enemies.len(), 1);
    }

    #[test]
    fn spawn_skips_when_pool_full() {
        let mut sim = playing();
        for _ in 0..MAX_ENEMIES {
            let _ = sim.enemies.insert(enemy_at(0, EnemyPosition::InLane(0.5)));
        }

        spawn(&mut sim, ms(0));
        assert_eq!(sim.quota.remaining(EnemyKind::White), 15);
        assert_eq!(sim.next_spawn, ms(2_000));
    }

    #[test]
    fn enemy_fires_until_one_shot_left() {
        let mut sim = playing();
        let _ = sim.enemies.insert(enemy_at(4, EnemyPosition::InLane(0.25)));

        enemy_fire(&mut sim, ms(2_000));
        assert_eq!(sim.shots.len(), 1);
        let shot = sim.shots.get(0).copied();
        assert_eq!(shot.map(|s| (s.lane, s.lane_position)), Some((4, 0.25)));

        enemy_fire(&mut sim, ms(3_000));
        assert_eq!(sim.shots.len(), 1);
        enemy_fire(&mut sim, ms(4_000));
        enemy_fire(&mut sim, ms(6_000));
        enemy_fire(&mut sim, ms(8_000));
        assert_eq!(sim.shots.len(), 2);
        assert_eq!(sim.enemies.get(0).map(|e| e.shots_remaining), Some(1));
    }

    #[test]
    fn player_fire_caps_shots_in_flight() {
        let mut sim = playing();
        sim.player_position = 1.0;
        for _ in 0..5 {
            player_fire(&mut sim, true);
        }
        assert_eq!(sim.shots.len(), MAX_PLAYER_SHOTS);
        assert!(sim.shots.iter().all(|shot| shot.lane == 6 && shot.lane_position == 1.0));

        player_fire(&mut sim, false);
        assert_eq!(sim.shots.len(), MAX_PLAYER_SHOTS);
    }

    #[test]
    fn player_shot_kills_one_enemy() {
        let mut sim = playing();
        let _ = sim.enemies.insert(enemy_at(1, EnemyPosition::InLane(0.5)));
        let _ = sim.enemies.insert(enemy_at(1, EnemyPosition::InLane(0.52)));
        let _ = sim.shots.insert(Shot {
            lane_position: 0.51,
            ..Shot::player(1, PLAYER_SHOT_SPEED)
        });

        assert!(!collide(&mut sim));
        assert_eq!(sim.enemies.len(), 1);
        assert!(sim.shots.is_empty());
        assert_eq!(sim.score, EnemyKind::Red.score());
    }

    #[test]
    fn enemy_kill_takes_precedence_over_enemy_shot() {
        let mut sim = playing();
        let _ = sim.enemies.insert(enemy_at(2, EnemyPosition::InLane(0.6)));
        let _ = sim.shots.insert(Shot::enemy(2, 0.6, 0.4));
        let _ = sim.shots.insert(Shot {
            lane_position: 0.6,
            ..Shot::player(2, PLAYER_SHOT_SPEED)
        });

        assert!(!collide(&mut sim));
        assert!(sim.enemies.is_empty());
        assert_eq!(sim.shots.len(), 1);
        assert!(sim.shots.iter().all(|shot| !shot.is_player()));
    }

    #[test]
    fn player_shot_downs_enemy_shot() {
        let mut sim = playing();
        let _ = sim.shots.insert(Shot::enemy(3, 0.7, 0.4));
        let _ = sim.shots.insert(Shot {
            lane_position: 0.72,
            ..Shot::player(3, PLAYER_SHOT_SPEED)
        });

        assert!(!collide(&mut sim));
        assert!(sim.shots.is_empty());
        assert_eq!(sim.score, SHOT_DOWN_SCORE);
    }

    #[test]
    fn missed_player_shot_is_removed() {
        let mut sim = playing();
        let _ = sim.shots.insert(Shot {
            lane_position: -0.01,
            ..Shot::player(0, PLAYER_SHOT_SPEED)
        });

        assert!(!collide(&mut sim));
        assert!(sim.shots.is_empty());
    }

    #[test]
    fn side_shot_catches_enemy_on_path() {
        let mut sim = playing();
        sim.player_position = 0.3;
        let _ = sim.enemies.insert(enemy_at(0, EnemyPosition::OnPlayerPath(0.32)));
        let _ = sim.shots.insert(Shot::player(5, PLAYER_SHOT_SPEED));

        assert!(!collide(&mut sim));
        assert!(sim.enemies.is_empty());
        assert_eq!(sim.lives, 4);
    }

    #[test]
    fn enemy_shot_reaching_player_costs_a_life() {
        let mut sim = playing();
        sim.player_position = 0.0;
        let _ = sim.enemies.insert(enemy_at(3, EnemyPosition::InLane(0.2)));
        let _ = sim.shots.insert(Shot::enemy(0, 1.01, 0.4));

        assert!(collide(&mut sim));
        assert_eq!(sim.lives, 3);
        assert!(sim.enemies.is_empty());
        assert!(sim.shots.is_empty());
    }

    #[test]
    fn enemy_shot_elsewhere_is_removed_harmlessly() {
        let mut sim = playing();
        sim.player_position = 0.0;
        let _ = sim.shots.insert(Shot::enemy(6, 1.0, 0.4));

        assert!(!collide(&mut sim));
        assert!(sim.shots.is_empty());
        assert_eq!(sim.lives, 4);
    }

    #[test]
    fn enemy_reaching_player_costs_a_life() {
        let mut sim = playing();
        sim.player_position = 0.5;
        let _ = sim.enemies.insert(enemy_at(0, EnemyPosition::OnPlayerPath(0.52)));

        assert!(collide(&mut sim));
        assert_eq!(sim.lives, 3);
        assert!(sim.enemies.is_empty());
    }

    #[test]
    fn level_completes_when_quota_and_board_empty() {
        let mut sim = playing();
        assert!(!level_complete(&mut sim));

        sim.quota = EnemyQuota::EMPTY;
        let _ = sim.enemies.insert(enemy_at(0, EnemyPosition::InLane(0.1)));
        assert!(!level_complete(&mut sim));

        sim.enemies.clear();
        assert!(level_complete(&mut sim));
        assert_eq!(sim.level_index, 1);

        sim.level_index = LEVEL_COUNT - 1;
        assert!(level_complete(&mut sim));
        assert_eq!(sim.level_index, LEVEL_COUNT - 1);
    }

    #[test]
    fn approaching_shot_hits_on_first_tick_within_threshold() {
        let mut sim = playing();
        let _ = sim.enemies.insert(Enemy::spawn(EnemyKind::White, 2, &LEVELS[0], ms(0)));
        let _ = sim.shots.insert(Shot {
            lane_position: 0.5,
            ..Shot::player(2, PLAYER_SHOT_SPEED)
        });

        // Closing speed is 1.65 per second, so the gap drops below the
        // threshold between 260 ms and 280 ms
        let mut killed_at = None;
        for tick in 1..=30 {
            let now = tick * 20;
            advance(&mut sim, ms(now), Duration::from_millis(20));
            assert!(!collide(&mut sim));
            if sim.enemies.is_empty() {
                killed_at = Some(now);
                break;
            }
            assert_eq!(sim.shots.len(), 1);
        }

        assert_eq!(killed_at, Some(280));
        assert!(sim.shots.is_empty());
        assert_eq!(sim.score, EnemyKind::White.score());
    }
}

//! Game engine
//!
//! [`GameEngine`] owns the simulation and the animated-state table. The
//! driver calls [`GameEngine::step`] once per tick and then renders with
//! [`GameEngine::set_leds`] into a zeroed frame buffer.

mod config;
mod entity;
mod level;
mod pool;
mod render;
mod simulation;
mod state;

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

pub use config::{
    COLLISION_THRESHOLD, ENEMY_SHOT_SPEED_FACTOR, GameEngineConfig, LIFE_LOST_FLASH_PERIOD,
    MAX_ENEMIES, MAX_PLAYER_SHOTS, MAX_SHOTS, PATH_SPEED_FACTOR, PLAYER_HIT_THRESHOLD,
    PLAYER_SHOT_SPEED, SHOT_DOWN_SCORE, SIDE_DESTROY_THRESHOLD, SIDE_THRESHOLD, STARTING_LIVES,
    StateTimings,
};
pub use entity::{Enemy, EnemyKind, EnemyPosition, Shot, ShotOwner};
pub use level::{EnemyQuota, LEVEL_COUNT, LEVELS, Level};
pub use pool::Pool;
pub use state::{AnimatedState, GameState};

use self::simulation::Simulation;
use crate::{
    animator::{Animator, AttractAnimator, StateAnimator, TreeTransitionAnimator, ZERO},
    color::{BLUE, GREEN, RED, Rgb},
    input::InputSample,
    layout::TreeLayout,
};

const ANIMATED_STATE_COUNT: usize = 5;

/// Released-latch edge detector for a button level
#[derive(Debug, Clone, Copy, Default)]
struct ButtonLatch {
    held: bool,
}

impl ButtonLatch {
    /// True on the first tick the button is seen pressed
    fn rising(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    index: usize,
    start: Instant,
}

pub struct GameEngine {
    config: GameEngineConfig,
    simulation: Simulation,
    state: GameState,
    animated_states: Vec<AnimatedState, ANIMATED_STATE_COUNT>,
    active: Option<ActiveAnimation>,
    last_time: Instant,
    fire: ButtonLatch,
    start: ButtonLatch,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameEngineConfig::DEFAULT)
    }
}

impl GameEngine {
    /// Create an engine idling in attract mode
    pub fn new(config: GameEngineConfig) -> Self {
        let mut engine = Self {
            simulation: Simulation::new(config.layout, config.seed),
            animated_states: animated_states(&config),
            config,
            state: GameState::Attract,
            active: None,
            last_time: Instant::from_ticks(0),
            fire: ButtonLatch::default(),
            start: ButtonLatch::default(),
        };
        engine.begin_animated_state(GameState::Attract, engine.last_time);
        engine
    }

    /// Start a new game at `now`
    pub fn start(&mut self, now: Instant) {
        self.last_time = now;
        self.simulation.reset(self.config.starting_lives);
        #[cfg(feature = "esp32-log")]
        println!("[GameEngine.start] starting game");
        self.begin_animated_state(GameState::GameStartAnimation, now);
    }

    /// Advance the engine to `now`
    ///
    /// A tick with the same or an earlier time than the previous one is
    /// ignored entirely.
    pub fn step(&mut self, now: Instant, input: &InputSample) {
        let Some(delta) = now
            .checked_duration_since(self.last_time)
            .filter(|delta| *delta > ZERO)
        else {
            return;
        };
        self.last_time = now;

        let fire_pressed = self.fire.rising(input.fire);
        self.simulation.set_player_position(input.player_position);

        if self.start.rising(input.start) {
            if self.state == GameState::Attract {
                self.start(now);
            } else {
                #[cfg(feature = "esp32-log")]
                println!("[GameEngine.step] game aborted");
                self.begin_animated_state(GameState::Attract, now);
            }
            return;
        }

        if self.state.is_animated() {
            self.step_animated_state(now);
        } else {
            self.step_level(now, delta, fire_pressed);
        }
    }

    /// Render the current state into `leds`
    ///
    /// `leds` must be zeroed and cover [`TreeLayout::led_count`] LEDs.
    pub fn set_leds(&self, leds: &mut [Rgb]) {
        let sim = &self.simulation;
        if !self.state.is_animated() {
            render::draw_base(sim, leds);
            render::draw_path(sim, leds);
            render::draw_lanes(sim, leds, BLUE);
            render::draw_entities(sim, leds);
            return;
        }

        let Some((animated, elapsed)) = self.current_animation() else {
            debug_assert!(false, "no active animation in {:?}", self.state);
            return;
        };

        if let Some(animator) = &animated.animator {
            if elapsed < animator.duration() {
                animator.step(elapsed, leds);
            }
            return;
        }

        render::draw_base(sim, leds);
        render::draw_path(sim, leds);
        match self.state {
            GameState::LevelStartAnimation => {
                render::draw_level_start(sim, leds, elapsed, animated.duration);
            }
            GameState::LifeLostAnimation => render::draw_life_lost(sim, leds, elapsed),
            _ => render::draw_lanes(sim, leds, BLUE),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn remaining_lives(&self) -> u8 {
        self.simulation.lives
    }

    /// Zero-based index of the current level
    pub fn level(&self) -> usize {
        self.simulation.level_index
    }

    pub fn score(&self) -> u32 {
        self.simulation.score
    }

    /// True while no game with lives left is running
    pub fn is_game_over(&self) -> bool {
        self.simulation.lives == 0
    }

    /// Normalized player position on the path
    pub fn player_position(&self) -> f32 {
        self.simulation.player_position
    }

    /// Lane a shot fired now would travel in
    pub fn player_lane(&self) -> usize {
        self.simulation.player_lane()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.simulation.enemies.iter()
    }

    pub fn shots(&self) -> impl Iterator<Item = &Shot> {
        self.simulation.shots.iter()
    }

    /// Enemies still to be spawned in the current level
    pub fn quota(&self) -> &EnemyQuota {
        &self.simulation.quota
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.config.layout
    }

    fn step_level(&mut self, now: Instant, delta: Duration, fire_pressed: bool) {
        let sim = &mut self.simulation;
        simulation::advance(sim, now, delta);
        simulation::spawn(sim, now);
        simulation::enemy_fire(sim, now);
        simulation::player_fire(sim, fire_pressed);

        if simulation::collide(sim) {
            self.begin_animated_state(GameState::LifeLostAnimation, now);
        } else if simulation::level_complete(sim) {
            self.begin_animated_state(GameState::LevelStartAnimation, now);
        }
    }

    fn step_animated_state(&mut self, now: Instant) {
        let Some(active) = self.active else {
            debug_assert!(false, "no active animation in {:?}", self.state);
            return;
        };
        let Some(animated) = self.animated_states.get_mut(active.index) else {
            debug_assert!(false, "animation index out of range");
            return;
        };

        let elapsed = now.checked_duration_since(active.start).unwrap_or(ZERO);
        if elapsed < animated.duration {
            if let Some(animator) = animated.animator.as_mut() {
                animator.advance(elapsed);
            }
            return;
        }

        if animated.looping {
            let state = animated.state;
            self.begin_animated_state(state, now);
            return;
        }
        self.finish_animated_state(now);
    }

    fn finish_animated_state(&mut self, now: Instant) {
        match self.state {
            GameState::GameStartAnimation => {
                self.begin_animated_state(GameState::LevelStartAnimation, now);
            }
            GameState::LevelStartAnimation => self.begin_playing(now),
            GameState::LifeLostAnimation => {
                if self.simulation.lives > 0 {
                    self.begin_playing(now);
                } else {
                    self.begin_animated_state(GameState::GameOverAnimation, now);
                }
            }
            GameState::GameOverAnimation => {
                self.begin_animated_state(GameState::Attract, now);
            }
            GameState::Attract | GameState::PlayingLevel => {
                debug_assert!(false, "{:?} has no end", self.state);
            }
        }
    }

    fn begin_playing(&mut self, now: Instant) {
        self.set_state(GameState::PlayingLevel);
        self.active = None;
        self.simulation.next_spawn = now;
    }

    fn begin_animated_state(&mut self, state: GameState, now: Instant) {
        let Some(index) = self
            .animated_states
            .iter()
            .position(|animated| animated.state == state)
        else {
            debug_assert!(false, "{:?} is not an animated state", state);
            return;
        };

        if state == GameState::LevelStartAnimation {
            self.simulation.load_level();
        }
        if let Some(animator) = self.animated_states[index].animator.as_mut() {
            animator.reset();
        }
        self.set_state(state);
        self.active = Some(ActiveAnimation { index, start: now });
    }

    fn set_state(&mut self, state: GameState) {
        #[cfg(feature = "esp32-log")]
        println!("[GameEngine.set_state] {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    fn current_animation(&self) -> Option<(&AnimatedState, Duration)> {
        let active = self.active?;
        let animated = self.animated_states.get(active.index)?;
        let elapsed = self
            .last_time
            .checked_duration_since(active.start)
            .unwrap_or(ZERO);
        Some((animated, elapsed))
    }
}

/// Build the animated-state table for `config`
fn animated_states(config: &GameEngineConfig) -> Vec<AnimatedState, ANIMATED_STATE_COUNT> {
    let layout = &config.layout;
    let timings = &config.timings;

    [
        AnimatedState::new(
            GameState::Attract,
            timings.attract,
            true,
            Some(StateAnimator::Attract(AttractAnimator::new(
                layout,
                timings.attract,
                config.seed,
            ))),
        ),
        AnimatedState::new(
            GameState::GameStartAnimation,
            timings.game_start,
            false,
            Some(StateAnimator::Transition(
                TreeTransitionAnimator::for_layout(timings.game_start, layout, GREEN, BLUE),
            )),
        ),
        AnimatedState::new(
            GameState::LevelStartAnimation,
            timings.level_start,
            false,
            None,
        ),
        AnimatedState::new(GameState::LifeLostAnimation, timings.life_lost, false, None),
        AnimatedState::new(
            GameState::GameOverAnimation,
            timings.game_over,
            false,
            Some(StateAnimator::Transition(
                TreeTransitionAnimator::for_layout(timings.game_over, layout, BLUE, RED),
            )),
        ),
    ]
    .into_iter()
    .collect()
}

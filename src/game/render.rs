//! Drawing of the game board

use embassy_time::Duration;

use super::{
    config::LIFE_LOST_FLASH_PERIOD,
    entity::{EnemyPosition, ShotOwner},
    simulation::Simulation,
};
use crate::{
    animator::progress,
    color::{BLACK, BLUE, CYAN, RED, Rgb, WHITE, YELLOW},
    geometry::{color_wipe_led, fill_led_range, set_led},
};

/// Base with lives counted from its start and the level from its end
pub(crate) fn draw_base(sim: &Simulation, leds: &mut [Rgb]) {
    let layout = &sim.layout;
    let base_start = i32::from(layout.base_start);
    let base_end = i32::from(layout.base_end);
    fill_led_range(leds, layout.base_start, layout.base_end, RED);

    let step = if base_end >= base_start { 1 } else { -1 };
    for life in 0..i32::from(sim.lives) {
        set_led(leds, base_start + step * life, YELLOW);
    }
    let levels = i32::try_from(sim.level_index).unwrap_or(0);
    for level in 0..=levels {
        set_led(leds, base_end - step * level, CYAN);
    }
}

/// Path with the player on it
pub(crate) fn draw_path(sim: &Simulation, leds: &mut [Rgb]) {
    let layout = &sim.layout;
    fill_led_range(leds, layout.path_start, layout.path_end, BLUE);
    set_led(leds, layout.path_led(sim.player_position), YELLOW);
}

pub(crate) fn draw_lanes(sim: &Simulation, leds: &mut [Rgb], color: Rgb) {
    for lane in &sim.layout.lanes {
        fill_led_range(leds, lane.start, lane.end, color);
    }
}

pub(crate) fn draw_entities(sim: &Simulation, leds: &mut [Rgb]) {
    let layout = &sim.layout;
    for shot in sim.shots.iter() {
        let Some(lane) = layout.lanes.get(shot.lane) else {
            continue;
        };
        let color = match shot.owner {
            ShotOwner::Player => WHITE,
            ShotOwner::Enemy => CYAN,
        };
        set_led(leds, lane.led_index(shot.lane_position), color);
    }

    for enemy in sim.enemies.iter() {
        let index = match enemy.position {
            EnemyPosition::InLane(position) => match layout.lanes.get(enemy.lane) {
                Some(lane) => lane.led_index(position),
                None => continue,
            },
            EnemyPosition::OnPlayerPath(position) => layout.path_led(position),
        };
        set_led(leds, index, enemy.color);
    }
}

/// Lanes washing blue in over the first third, then out
pub(crate) fn draw_level_start(
    sim: &Simulation,
    leds: &mut [Rgb],
    elapsed: Duration,
    duration: Duration,
) {
    let wipe_in = duration / 3;
    let (first, second, t) = match elapsed.checked_sub(wipe_in) {
        None => (BLUE, BLACK, progress(elapsed, wipe_in)),
        Some(rest) => {
            let wipe_out = duration.checked_sub(wipe_in).unwrap_or(wipe_in);
            (BLACK, BLUE, progress(rest, wipe_out))
        }
    };

    for lane in &sim.layout.lanes {
        color_wipe_led(leds, lane.start, lane.end, first, second, t);
    }
}

/// Lanes flashing black and blue
pub(crate) fn draw_life_lost(sim: &Simulation, leds: &mut [Rgb], elapsed: Duration) {
    let phase = elapsed.as_ticks() / LIFE_LOST_FLASH_PERIOD.as_ticks().max(1);
    let color = if phase % 2 == 0 { BLACK } else { BLUE };
    draw_lanes(sim, leds, color);
}

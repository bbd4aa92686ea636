//! Desktop preview for the tempest tree
//!
//! Runs the game engine against a drawn model of the tree. The arrow keys
//! move the player along the path, space fires and enter starts or aborts a
//! game.

use std::f32::consts::TAU;
use std::time::Instant as StdInstant;

use eframe::egui::{self};
use tempest_tree::{
    GameEngine, GameEngineConfig, GameState, Instant, InputMailbox, InputSample, InputSource,
    Rgb, TreeLayout,
};

/// Frame buffer length for the default layout
const MAX_LEDS: usize = 216;

/// Size of each LED in pixels
const LED_SIZE: f32 = 9.0;

/// Gap between LEDs in the strip view
const LED_GAP: f32 = 2.0;

/// Path positions per second while an arrow key is held
const PLAYER_SPEED: f32 = 0.6;

/// Input shared between the keyboard handler and the engine tick
static INPUT: InputMailbox = InputMailbox::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    /// Lanes around the circular path, base underneath
    Tree,
    /// Raw frame buffer, wrapped to the window width
    Strip,
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 820.0])
            .with_title("Tempest in a Tree"),
        ..Default::default()
    };

    eframe::run_native(
        "tempest-tree-preview",
        options,
        Box::new(|_cc| Ok(Box::new(PreviewApp::new()))),
    )
}

struct PreviewApp {
    engine: GameEngine,
    frame: [Rgb; MAX_LEDS],
    /// Synthetic time in milliseconds
    t_ms: u64,
    /// Wall-clock reference for delta time
    last_frame: StdInstant,
    playing: bool,
    /// Time scale multiplier (1.0 = realtime)
    time_scale: f32,
    /// Player position driven by the keyboard
    position: f32,
    led_size: f32,
    view: View,
}

impl PreviewApp {
    fn new() -> Self {
        let engine = GameEngine::new(GameEngineConfig {
            seed: seed_from_clock(),
            ..GameEngineConfig::DEFAULT
        });

        Self {
            engine,
            frame: [Rgb::default(); MAX_LEDS],
            t_ms: 0,
            last_frame: StdInstant::now(),
            playing: true,
            time_scale: 1.0,
            position: 0.5,
            led_size: LED_SIZE,
            view: View::Tree,
        }
    }

    /// Advance synthetic time, returning the elapsed milliseconds
    fn update_time(&mut self) -> u64 {
        let now = StdInstant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        if !self.playing {
            return 0;
        }
        let delta_ms = delta.as_secs_f64() * 1000.0 * f64::from(self.time_scale);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let delta_ms = if delta_ms.is_finite() {
            delta_ms.max(0.0) as u64
        } else {
            0
        };
        self.t_ms = self.t_ms.saturating_add(delta_ms);
        delta_ms
    }

    /// Publish the keyboard state into the input mailbox
    #[allow(clippy::cast_precision_loss)]
    fn publish_input(&mut self, ctx: &egui::Context, delta_ms: u64) {
        let (left, right, fire, start) = ctx.input(|input| {
            (
                input.key_down(egui::Key::ArrowLeft),
                input.key_down(egui::Key::ArrowRight),
                input.key_down(egui::Key::Space),
                input.key_down(egui::Key::Enter),
            )
        });

        let step = PLAYER_SPEED * delta_ms as f32 / 1000.0;
        if left {
            self.position -= step;
        }
        if right {
            self.position += step;
        }
        self.position = self.position.clamp(0.0, 1.0);

        INPUT.publish(InputSample::new(self.position, fire, start));
    }

    fn tick(&mut self, ctx: &egui::Context) {
        let delta_ms = self.update_time();
        self.publish_input(ctx, delta_ms);

        let mut source = &INPUT;
        let sample = source.sample();
        self.engine.step(Instant::from_millis(self.t_ms), &sample);

        self.frame.fill(Rgb::default());
        self.engine.set_leds(&mut self.frame);
    }

    fn restart(&mut self) {
        self.t_ms = 0;
        self.last_frame = StdInstant::now();
        self.engine = GameEngine::new(GameEngineConfig {
            seed: seed_from_clock(),
            ..GameEngineConfig::DEFAULT
        });
    }

    fn status_text(&self) -> String {
        let state = match self.engine.state() {
            GameState::Attract => "attract",
            GameState::GameStartAnimation => "game start",
            GameState::LevelStartAnimation => "level start",
            GameState::PlayingLevel => "playing",
            GameState::LifeLostAnimation => "life lost",
            GameState::GameOverAnimation => "game over",
        };
        format!(
            "{state} | level {} | lives {} | score {}",
            self.engine.level() + 1,
            self.engine.remaining_lives(),
            self.engine.score()
        )
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(ctx);

        // Request continuous repaint for animation
        ctx.request_repaint();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⏮ Restart").clicked() {
                    self.restart();
                }
                if ui
                    .button(if self.playing { "⏸ Pause" } else { "▶ Play" })
                    .clicked()
                {
                    self.playing = !self.playing;
                }

                ui.add_space(8.0);
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.time_scale, 0.1..=5.0).logarithmic(true));

                ui.add_space(8.0);
                ui.selectable_value(&mut self.view, View::Tree, "tree");
                ui.selectable_value(&mut self.view, View::Strip, "strip");
                ui.add(egui::Slider::new(&mut self.led_size, 4.0..=24.0).text("size"));
            });

            ui.add_space(4.0);
            let secs = self.t_ms / 1000;
            let ms = self.t_ms % 1000;
            ui.label(format!("Time: {secs}.{ms:03}s  {}", self.status_text()));
            ui.label("← → move, space fires, enter starts or aborts");
            ui.add_space(12.0);

            match self.view {
                View::Tree => draw_tree(ui, self.engine.layout(), &self.frame, self.led_size),
                View::Strip => draw_strip(ui, &self.frame, self.led_size),
            }
        });
    }
}

fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(1, |elapsed| elapsed.as_nanos() as u64)
}

fn led_color(pixel: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(pixel.r, pixel.g, pixel.b)
}

/// Draw the frame shaped like the installation
#[allow(clippy::cast_precision_loss)]
fn draw_tree(ui: &mut egui::Ui, layout: &TreeLayout, frame: &[Rgb], led_size: f32) {
    let available_width = ui.available_width();
    let height = available_width.min(ui.available_height());
    let (response, painter) =
        ui.allocate_painter(egui::vec2(available_width, height), egui::Sense::hover());
    let rect = response.rect;

    let center = egui::pos2(rect.center().x, rect.min.y + height * 0.42);
    let path_radius = height * 0.12;
    let lane_inner = path_radius + led_size * 1.5;
    let lane_outer = height * 0.4;

    let dot = |index: i32, position: egui::Pos2| {
        let Some(pixel) = usize::try_from(index).ok().and_then(|index| frame.get(index)) else {
            return;
        };
        painter.circle_filled(position, led_size / 2.0, led_color(*pixel));
    };
    let on_circle = |angle: f32, radius: f32| {
        center + egui::vec2(angle.cos(), angle.sin()) * radius
    };
    // Path position 0 sits at the top, growing clockwise
    let path_angle = |position: f32| -TAU / 4.0 + position * TAU * 0.95;

    let path_last = f32::from(layout.path_count().saturating_sub(1).max(1));
    for step in 0..layout.path_count() {
        let position = f32::from(step) / path_last;
        dot(layout.path_led(position), on_circle(path_angle(position), path_radius));
    }

    for lane in &layout.lanes {
        let angle = path_angle(layout.path_position_of(*lane));
        let last = f32::from(lane.count().saturating_sub(1).max(1));
        for step in 0..lane.count() {
            let position = f32::from(step) / last;
            let radius = lane_outer - position * (lane_outer - lane_inner);
            dot(lane.led_index(position), on_circle(angle, radius));
        }
    }

    let base = layout.base_range();
    let pitch = led_size + LED_GAP;
    let base_width = f32::from(base.count) * pitch;
    let base_y = rect.min.y + height * 0.92;
    for offset in 0..base.count {
        let x = center.x - base_width / 2.0 + f32::from(offset) * pitch;
        dot(i32::from(base.start + offset), egui::pos2(x, base_y));
    }
}

/// Draw the raw frame buffer wrapped to the window width
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn draw_strip(ui: &mut egui::Ui, frame: &[Rgb], led_size: f32) {
    let available_width = ui.available_width();
    let led_pitch = led_size + LED_GAP;
    let leds_per_row = (available_width / led_pitch).floor().max(1.0) as usize;
    let rows = frame.len().div_ceil(leds_per_row);
    let height = rows as f32 * led_pitch;

    let (response, painter) =
        ui.allocate_painter(egui::vec2(available_width, height), egui::Sense::hover());
    let origin = response.rect.min;

    for (i, pixel) in frame.iter().enumerate() {
        let row = i / leds_per_row;
        let col = i % leds_per_row;
        let x = origin.x + col as f32 * led_pitch;
        let y = origin.y + row as f32 * led_pitch;

        let rect = egui::Rect::from_min_size(egui::pos2(x, y), egui::vec2(led_size, led_size));
        painter.rect_filled(rect, 3.0, led_color(*pixel));
    }
}

//! Frame scheduling and timing utilities.
//!
//! Runs the game at a fixed frame rate without async/await or
//! platform-specific timers. The caller is responsible for sleeping between
//! frames.

use embassy_time::{Duration, Instant};

use crate::{GameEngine, OutputDriver, Rgb, input::InputSource};

/// Default target frame rate (50 FPS).
pub const DEFAULT_FPS: u32 = 50;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Fixed-rate game loop driver.
///
/// Each tick samples the input, steps the engine, renders into a zeroed
/// frame buffer of `MAX_LEDS` LEDs and writes it to the output driver.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::<_, _, 216>::new(engine, &MAILBOX, driver);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<I: InputSource, O: OutputDriver, const MAX_LEDS: usize> {
    engine: GameEngine,
    input: I,
    output: O,
    frame_buffer: [Rgb; MAX_LEDS],
    next_frame: Instant,
    frame_duration: Duration,
}

impl<I: InputSource, O: OutputDriver, const MAX_LEDS: usize> FrameScheduler<I, O, MAX_LEDS> {
    /// Create a new frame scheduler running at `DEFAULT_FPS`.
    pub fn new(engine: GameEngine, input: I, output: O) -> Self {
        Self::with_frame_duration(engine, input, output, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        engine: GameEngine,
        input: I,
        output: O,
        frame_duration: Duration,
    ) -> Self {
        debug_assert!(
            engine.layout().led_count() <= MAX_LEDS,
            "frame buffer smaller than the layout"
        );
        Self {
            engine,
            input,
            output,
            frame_buffer: [Rgb::default(); MAX_LEDS],
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after a long stall instead of bursting to catch up
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        let sample = self.input.sample();
        self.engine.step(now, &sample);

        self.frame_buffer.fill(Rgb::default());
        self.engine.set_leds(&mut self.frame_buffer);
        self.output.write(&self.frame_buffer);

        self.next_frame += self.frame_duration;
        let sleep_duration = self
            .next_frame
            .checked_duration_since(now)
            .unwrap_or(Duration::from_ticks(0));

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    /// Last frame written to the output
    pub fn frame(&self) -> &[Rgb] {
        &self.frame_buffer
    }
}

//! Player input
//!
//! The engine only sees one [`InputSample`] per tick. Where the buttons and
//! the position knob are read in an interrupt or a separate task, the reader
//! publishes into an [`InputMailbox`] and the frame loop samples the latest
//! value from it. Button levels are passed through as read; edge detection
//! happens in the engine.

use core::cell::Cell;

use critical_section::Mutex;

/// Input state for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    /// Normalized player position on the path (0.0..=1.0)
    pub player_position: f32,
    /// Fire button level
    pub fire: bool,
    /// Start button level
    pub start: bool,
}

impl InputSample {
    pub const fn new(player_position: f32, fire: bool, start: bool) -> Self {
        Self {
            player_position,
            fire,
            start,
        }
    }

    /// Player position from a raw reading along the path, where `last` is
    /// the reading at the far end
    pub fn position_from_raw(raw: u16, last: u16) -> f32 {
        if last == 0 {
            return 0.0;
        }
        (f32::from(raw) / f32::from(last)).clamp(0.0, 1.0)
    }
}

/// Source of per-tick input samples
pub trait InputSource {
    fn sample(&mut self) -> InputSample;
}

/// Latest-value cell shared between an input reader and the frame loop
///
/// Publishing overwrites the previous sample; nothing is queued.
pub struct InputMailbox {
    inner: Mutex<Cell<InputSample>>,
}

impl InputMailbox {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(InputSample::new(0.5, false, false))),
        }
    }

    /// Replace the current sample
    pub fn publish(&self, sample: InputSample) {
        critical_section::with(|cs| self.inner.borrow(cs).set(sample));
    }

    /// Read the current sample
    pub fn latest(&self) -> InputSample {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

impl Default for InputMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for &InputMailbox {
    fn sample(&mut self) -> InputSample {
        self.latest()
    }
}

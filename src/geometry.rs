//! Position-to-LED mapping and range fills
//!
//! All writers take the caller's frame buffer and skip indices that fall
//! outside of it, so a short buffer degrades to a partial frame instead of a
//! panic.

use crate::color::Rgb;

/// Index of a single LED in the frame buffer
pub type LedIndex = u16;

/// Half-open ascending range of LEDs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedRange {
    pub start: LedIndex,
    pub count: u16,
}

impl LedRange {
    pub const fn new(start: LedIndex, count: u16) -> Self {
        Self { start, count }
    }

    /// Range covering both ends inclusively, in either order
    pub const fn between(a: LedIndex, b: LedIndex) -> Self {
        if a <= b {
            Self::new(a, b - a + 1)
        } else {
            Self::new(b, a - b + 1)
        }
    }

    /// One past the last LED of the range
    pub const fn end(self) -> usize {
        self.start as usize + self.count as usize
    }

    pub const fn contains(self, index: LedIndex) -> bool {
        index >= self.start && (index as usize) < self.end()
    }

    /// Get a slice of the LEDs within the range, clipped to the buffer
    pub fn slice_mut(self, leds: &mut [Rgb]) -> &mut [Rgb] {
        let len = leds.len();
        let start = (self.start as usize).min(len);
        let end = self.end().min(len);
        &mut leds[start..end]
    }
}

/// Map a normalized position onto the LEDs between `start` and `end`
///
/// The position is rounded to the nearest LED (half an LED width is added
/// before truncating toward zero). `start` may be greater than `end`, in
/// which case the index walks downwards as `position` grows.
#[allow(clippy::cast_possible_truncation)]
pub fn led_index_from_range(start: i32, end: i32, position: f32) -> i32 {
    let distance = end - start;
    let span = distance.unsigned_abs() as f32;
    let offset = (position * span + 0.5) as i32;
    if distance >= 0 {
        start + offset
    } else {
        start - offset
    }
}

/// Write a single LED, ignoring indices outside of the buffer
#[inline]
pub fn set_led(leds: &mut [Rgb], index: i32, color: Rgb) {
    if let Ok(index) = usize::try_from(index) {
        if let Some(led) = leds.get_mut(index) {
            *led = color;
        }
    }
}

/// Fill every LED between `a` and `b` (both inclusive), in either order
pub fn fill_led_range(leds: &mut [Rgb], a: LedIndex, b: LedIndex, color: Rgb) {
    for led in LedRange::between(a, b).slice_mut(leds) {
        *led = color;
    }
}

/// Wipe `c1` over `c2` from `a` towards `b`
///
/// At `t = 0` the whole range shows `c2`, at `t = 1` it shows `c1`. In
/// between, the first `round(t * count)` LEDs counted from `a` are `c1`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn color_wipe_led(leds: &mut [Rgb], a: LedIndex, b: LedIndex, c1: Rgb, c2: Rgb, t: f32) {
    let range = LedRange::between(a, b);
    let t = t.clamp(0.0, 1.0);
    let boundary = (libm::roundf(t * f32::from(range.count)) as u16).min(range.count);

    // Normalize to an ascending walk; a reversed wipe lights the tail first
    let (first, second, lit) = if a <= b {
        (c1, c2, boundary)
    } else {
        (c2, c1, range.count - boundary)
    };

    for (offset, led) in range.slice_mut(leds).iter_mut().enumerate() {
        *led = if offset < usize::from(lit) { first } else { second };
    }
}

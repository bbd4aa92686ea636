//! Ramp patterns for chase effects
//!
//! A ramp is a symmetric run of LEDs: full color in the center, fading
//! linearly towards both ends without ever reaching black.

use heapless::Vec;

use crate::color::{Rgb, scale_color};

/// Upper bound for any pattern stored by an animator
pub const MAX_PATTERN_LEN: usize = 64;

/// Fixed-capacity pattern buffer
pub type Pattern = Vec<Rgb, MAX_PATTERN_LEN>;

/// Round an even width up to the next odd value
///
/// The center LED of a ramp is the full color, so ramps always have an odd
/// width.
pub const fn odd_width(width: u16) -> u16 {
    if width % 2 == 0 { width + 1 } else { width }
}

/// Build a symmetric ramp of `width` LEDs (forced odd)
///
/// Both sides use `width / 2` steps with a slope of `1 / (steps + 1)`.
/// Colors that do not fit into `N` are dropped.
pub fn ramp_pattern<const N: usize>(color: Rgb, width: u16) -> Vec<Rgb, N> {
    let ramp_count = odd_width(width) / 2;
    let slope = 1.0 / (f32::from(ramp_count) + 1.0);

    let mut pattern = Vec::new();
    for i in 0..ramp_count {
        let _ = pattern.push(scale_color(f32::from(i + 1) * slope, color));
    }
    let _ = pattern.push(color);
    for i in 0..ramp_count {
        let _ = pattern.push(scale_color(f32::from(ramp_count - i) * slope, color));
    }
    pattern
}

/// Scale every color of a pattern in place
pub fn scale_pattern(scale: f32, pattern: &mut [Rgb]) {
    for color in pattern.iter_mut() {
        *color = scale_color(scale, *color);
    }
}

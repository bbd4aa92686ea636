mod pattern;
mod utils;

use smart_leds::RGB8;

pub use pattern::{MAX_PATTERN_LEN, Pattern, odd_width, ramp_pattern, scale_pattern};
pub use utils::{cross_fade_color, rgb_from_u32, scale_color};

pub type Rgb = RGB8;

pub const BLACK: Rgb = rgb_from_u32(0x00_0000);
pub const RED: Rgb = rgb_from_u32(0xFF_0000);
pub const GREEN: Rgb = rgb_from_u32(0x00_FF00);
pub const BLUE: Rgb = rgb_from_u32(0x00_00FF);
pub const WHITE: Rgb = rgb_from_u32(0xFF_FFFF);
pub const YELLOW: Rgb = rgb_from_u32(0xFF_FF33);
pub const CYAN: Rgb = rgb_from_u32(0x00_FFFF);

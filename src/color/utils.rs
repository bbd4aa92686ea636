use crate::color::Rgb;

/// Scale every channel of a color by `scale`
///
/// The result is truncated, not rounded. `scale` is expected to stay within
/// `0.0..=1.0`; larger values saturate at full channel intensity.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_color(scale: f32, color: Rgb) -> Rgb {
    Rgb {
        r: (f32::from(color.r) * scale) as u8,
        g: (f32::from(color.g) * scale) as u8,
        b: (f32::from(color.b) * scale) as u8,
    }
}

/// Linear cross-fade between two colors
///
/// # Arguments
/// * `t` - Blend factor (0.0 = all `a`, 1.0 = all `b`)
/// * `a` - Source color
/// * `b` - Target color
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cross_fade_color(t: f32, a: Rgb, b: Rgb) -> Rgb {
    let blend = |a: u8, b: u8| (f32::from(a) * (1.0 - t) + f32::from(b) * t) as u8;
    Rgb {
        r: blend(a.r, b.r),
        g: blend(a.g, b.g),
        b: blend(a.b, b.b),
    }
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

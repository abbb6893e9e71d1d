//! Packed ARGB8888 colours and channel helpers.
//!
//! Colours are stored as `0xAARRGGBB` in a `u32`, the same layout the frame
//! buffer uses, so pixels can be copied around without conversion.

pub const BACKGROUND: u32 = 0xFF00_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;
pub const RED: u32 = 0xFFFF_0000;
pub const GREEN: u32 = 0xFF00_FF00;
pub const BLUE: u32 = 0xFF00_00FF;

/// Packs 8-bit channels into an ARGB colour.
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Splits an ARGB colour into `[r, g, b, a]`.
#[inline]
pub const fn channels(color: u32) -> [u8; 4] {
    [
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
        (color >> 24) as u8,
    ]
}

/// Scales the RGB channels by `level`, leaving alpha untouched.
///
/// Each channel is truncated and clamped to 0..=255.
#[inline]
pub fn scale_rgb(color: u32, level: f32) -> u32 {
    let [r, g, b, a] = channels(color);
    let scale = |c: u8| (c as f32 * level).clamp(0.0, 255.0) as u8;
    rgba(scale(r), scale(g), scale(b), a)
}

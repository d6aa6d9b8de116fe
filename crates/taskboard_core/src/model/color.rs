//! Board color value and its packed integer encoding.
//!
//! # Responsibility
//! - Represent an RGBA color as one packed 32-bit ARGB word.
//! - Provide the exact encode/decode pair used by the persisted document.
//!
//! # Invariants
//! - Alpha occupies the most significant byte, then red, green, blue.
//! - `decode_color(encode_color(c)) == c` for every representable color.
//! - The wire form is a signed 32-bit integer, never a hex string or a
//!   component struct.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Packed ARGB color (`0xAARRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", from = "i32")]
pub struct ArgbColor(u32);

impl ArgbColor {
    /// Wraps an already packed `0xAARRGGBB` word.
    pub const fn from_packed(argb: u32) -> Self {
        Self(argb)
    }

    /// Packs four 8-bit channels, alpha first.
    pub const fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(
            ((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32),
        )
    }

    /// Packs normalized float channels the way platform `toArgb` helpers do.
    ///
    /// Each component is clamped to `[0, 1]` and rounded to the nearest byte.
    /// NaN maps to zero.
    pub fn from_rgba_f32(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self::from_argb(
            unit_to_byte(alpha),
            unit_to_byte(red),
            unit_to_byte(green),
            unit_to_byte(blue),
        )
    }

    /// Returns the packed `0xAARRGGBB` word.
    pub const fn packed(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

impl Display for ArgbColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl From<ArgbColor> for i32 {
    fn from(value: ArgbColor) -> Self {
        encode_color(value)
    }
}

impl From<i32> for ArgbColor {
    fn from(value: i32) -> Self {
        decode_color(value)
    }
}

/// Encodes a color as the signed integer stored in the document.
///
/// Opaque colors (alpha >= 0x80) encode to negative values; this mirrors
/// the platform `Int` produced by standard ARGB packing.
pub const fn encode_color(color: ArgbColor) -> i32 {
    color.0 as i32
}

/// Decodes a stored signed integer back into a color. Exact inverse of
/// [`encode_color`].
pub const fn decode_color(value: i32) -> ArgbColor {
    ArgbColor(value as u32)
}

/// Fixed palette offered when a new board is created.
pub const BOARD_PALETTE: [ArgbColor; 8] = [
    ArgbColor::from_packed(0xFFFD_E68A), // yellow
    ArgbColor::from_packed(0xFFE9_D5FF), // purple
    ArgbColor::from_packed(0xFFFF_E4E6), // pink
    ArgbColor::from_packed(0xFF9E_E6C3), // green
    ArgbColor::from_packed(0xFFBB_DEFB), // light blue
    ArgbColor::from_packed(0xFFFF_F59D), // lemon
    ArgbColor::from_packed(0xFFFF_CCBC), // peach
    ArgbColor::from_packed(0xFFD1_C4E9), // lavender
];

/// Returns a palette entry for an arbitrary caller-chosen index.
///
/// Randomness stays with the caller; the model only wraps the index.
pub fn palette_color(index: usize) -> ArgbColor {
    BOARD_PALETTE[index % BOARD_PALETTE.len()]
}

fn unit_to_byte(component: f32) -> u8 {
    if component.is_nan() {
        return 0;
    }
    (component.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

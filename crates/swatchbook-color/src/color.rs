//! RGBA color values.
//!
//! [`Color`] stores four straight (non-premultiplied) 8-bit channels. Channels
//! can be read and written either as integer levels in `0..=255` or as
//! normalized floats in `0.0..=1.0`; converting a level to a float and back
//! always yields the same level.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};

use crate::error::ParseColorError;

/// One of the four channels of a [`Color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

/// Convert a normalized channel value to an 8-bit level.
///
/// Values are clamped to `0.0..=1.0` and rounded to the nearest level; NaN
/// maps to 0.
#[inline]
pub fn unit_to_level(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Convert an 8-bit level to a normalized channel value.
#[inline]
pub fn level_to_unit(level: u8) -> f32 {
    level as f32 / 255.0
}

/// Clamp an integer channel value to an 8-bit level.
#[inline]
pub fn clamp_level(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// An RGBA color with straight alpha and 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from 8-bit RGBA levels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB levels.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from integer levels, clamping each to `0..=255`.
    #[inline]
    pub fn from_levels(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self::new(clamp_level(r), clamp_level(g), clamp_level(b), clamp_level(a))
    }

    /// Create a color from normalized RGBA components (`0.0..=1.0`).
    #[inline]
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::new(
            unit_to_level(r),
            unit_to_level(g),
            unit_to_level(b),
            unit_to_level(a),
        )
    }

    /// Normalized components `[r, g, b, a]`.
    #[inline]
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            level_to_unit(self.r),
            level_to_unit(self.g),
            level_to_unit(self.b),
            level_to_unit(self.a),
        ]
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "#FF000080").
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit {
                input: hex.to_string(),
            });
        }
        let len = digits.len();
        if len != 6 && len != 8 {
            return Err(ParseColorError::InvalidLength { len });
        }

        let level = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ParseColorError::InvalidDigit {
                input: hex.to_string(),
            })
        };
        let r = level(0..2)?;
        let g = level(2..4)?;
        let b = level(4..6)?;
        let a = if len == 8 { level(6..8)? } else { 255 };

        Ok(Self::new(r, g, b, a))
    }

    /// `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{}", self.to_hex_rgb())
        } else {
            format!("#{}{:02X}", self.to_hex_rgb(), self.a)
        }
    }

    /// The six-digit `RRGGBB` form without a leading `#`.
    pub fn to_hex_rgb(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Read a single channel.
    #[inline]
    pub fn channel(self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Return a copy with one channel replaced.
    #[inline]
    pub fn with_channel(mut self, channel: Channel, level: u8) -> Self {
        match channel {
            Channel::Red => self.r = level,
            Channel::Green => self.g = level,
            Channel::Blue => self.b = level,
            Channel::Alpha => self.a = level,
        }
        self
    }

    /// Return a copy with the alpha channel replaced.
    #[inline]
    pub fn with_alpha(self, alpha: u8) -> Self {
        self.with_channel(Channel::Alpha, alpha)
    }

    /// Return the same color at full opacity.
    #[inline]
    pub fn opaque(self) -> Self {
        self.with_alpha(255)
    }

    // Common colors
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);
    pub const RED: Self = Self::from_rgb8(255, 0, 0);
    pub const GREEN: Self = Self::from_rgb8(0, 255, 0);
    pub const BLUE: Self = Self::from_rgb8(0, 0, 255);
    pub const YELLOW: Self = Self::from_rgb8(255, 255, 0);
    pub const GRAY: Self = Self::from_rgb8(128, 128, 128);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_round_trips_through_float() {
        for level in 0..=255u8 {
            assert_eq!(unit_to_level(level_to_unit(level)), level, "level {level}");
        }
    }

    #[test]
    fn test_float_input_is_clamped_and_rounded() {
        let color = Color::from_rgba_f32(-0.5, 1.5, 0.5, f32::NAN);
        assert_eq!(color, Color::new(0, 255, 128, 0));
    }

    #[test]
    fn test_integer_input_is_clamped() {
        assert_eq!(Color::from_levels(-10, 300, 42, 125), Color::new(0, 255, 42, 125));
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FF0000"), Ok(Color::RED));
        assert_eq!("00ff007d".parse::<Color>(), Ok(Color::new(0, 255, 0, 125)));
        assert_eq!(
            Color::from_hex("#FFF"),
            Err(ParseColorError::InvalidLength { len: 3 })
        );
        assert!(matches!(
            Color::from_hex("#+F0000"),
            Err(ParseColorError::InvalidDigit { .. })
        ));
        assert!(matches!(
            Color::from_hex("#ÿÿÿ"),
            Err(ParseColorError::InvalidDigit { .. })
        ));
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::YELLOW.to_hex(), "#FFFF00");
        assert_eq!(Color::new(1, 2, 3, 125).to_hex(), "#0102037D");
        assert_eq!(Color::new(1, 2, 3, 125).to_hex_rgb(), "010203");
        assert_eq!(Color::BLUE.to_string(), "#0000FF");
    }

    #[test]
    fn test_channel_access() {
        let color = Color::BLACK.with_channel(Channel::Green, 200).with_alpha(10);
        assert_eq!(color.channel(Channel::Green), 200);
        assert_eq!(color.channel(Channel::Alpha), 10);
        assert_eq!(color.opaque().a, 255);
    }
}

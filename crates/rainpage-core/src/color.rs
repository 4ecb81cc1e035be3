//! RGB colour values used by the background and the page theme.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a `#rrggbb` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

/// A 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Mix `other` over `self` with the given weight (0.0 keeps `self`,
    /// 1.0 yields `other`).
    pub fn mix(self, other: Rgb, weight: f32) -> Rgb {
        let w = weight.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * w).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Scale brightness, clamped to the valid range.
    pub fn scale(self, factor: f32) -> Rgb {
        let f = factor.max(0.0);
        let s = |c: u8| (c as f32 * f).round().min(255.0) as u8;
        Rgb::new(s(self.r), s(self.g), s(self.b))
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Color::Rgb(value.r, value.g, value.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::from_hex("#e6007a"), Ok(Rgb::new(0xe6, 0x00, 0x7a)));
        assert_eq!(Rgb::from_hex("00b2ff"), Ok(Rgb::new(0x00, 0xb2, 0xff)));
        assert!(Rgb::from_hex("#e6007").is_err());
        assert!(Rgb::from_hex("#zzzzzz").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        assert_eq!(Rgb::new(10, 10, 15).to_string(), "#0a0a0f");
    }

    #[test]
    fn test_mix() {
        let dark = Rgb::new(10, 10, 15);
        let pink = Rgb::new(230, 0, 122);
        assert_eq!(dark.mix(pink, 0.0), dark);
        assert_eq!(dark.mix(pink, 1.0), pink);
        assert_eq!(Rgb::BLACK.mix(Rgb::new(200, 100, 0), 0.5), Rgb::new(100, 50, 0));
    }

    #[test]
    fn test_scale_clamps() {
        assert_eq!(Rgb::new(200, 100, 0).scale(2.0), Rgb::new(255, 200, 0));
        assert_eq!(Rgb::new(200, 100, 0).scale(-1.0), Rgb::BLACK);
    }

    #[test]
    fn test_into_ratatui_color() {
        assert_eq!(Color::from(Rgb::new(1, 2, 3)), Color::Rgb(1, 2, 3));
    }
}

//! Colors and color ramps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::StyleError;

/// An RGB color, serialized as a `#rrggbb` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Creates a color from channel values.
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self, StyleError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(StyleError::InvalidColor { value: hex.to_string() });
        }
        let parse = |range: &str| {
            u8::from_str_radix(range, 16).map_err(|_| StyleError::InvalidColor {
                value: hex.to_string(),
            })
        };
        Ok(Self {
            r: parse(&digits[0..2])?,
            g: parse(&digits[2..4])?,
            b: parse(&digits[4..6])?,
        })
    }

    /// Formats as a `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linearly interpolates towards `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            let mixed = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            mixed.round() as u8
        };
        Self {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl FromStr for Color {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(de::Error::custom)
    }
}

/// Produces `steps` colors evenly interpolated from `start` to `end`.
///
/// A single step yields just the start color.
pub fn ramp(start: Color, end: Color, steps: usize) -> Vec<Color> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..steps)
            .map(|i| start.lerp(end, i as f64 / (steps - 1) as f64))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("#ff8000").unwrap(), Color::new(255, 128, 0));
        assert_eq!(Color::from_hex("ff8000").unwrap(), Color::new(255, 128, 0));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#ff80").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn hex_roundtrips() {
        let color = Color::new(18, 52, 86);
        assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        assert_eq!(black.lerp(white, 0.5), Color::new(128, 128, 128));
    }

    #[test]
    fn lerp_clamps_out_of_range() {
        let black = Color::new(0, 0, 0);
        let white = Color::new(255, 255, 255);
        assert_eq!(black.lerp(white, -1.0), black);
        assert_eq!(black.lerp(white, 2.0), white);
    }

    #[test]
    fn ramp_spans_start_to_end() {
        let colors = ramp(Color::new(0, 0, 0), Color::new(255, 255, 255), 5);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], Color::new(0, 0, 0));
        assert_eq!(colors[4], Color::new(255, 255, 255));
    }

    #[test]
    fn tiny_ramps() {
        assert!(ramp(Color::new(0, 0, 0), Color::new(1, 1, 1), 0).is_empty());
        assert_eq!(
            ramp(Color::new(0, 0, 0), Color::new(1, 1, 1), 1),
            [Color::new(0, 0, 0)]
        );
    }

    #[test]
    fn serde_uses_hex_strings() {
        let color = Color::new(255, 128, 0);
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#ff8000\"");
        let parsed: Color = serde_json::from_str("\"#ff8000\"").unwrap();
        assert_eq!(parsed, color);
    }
}

//! RGB color handling with hex parsing and serialization.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color value with hex string representation.
///
/// Represents a color using red, green, and blue channels (0-255 each).
/// Serialized to and from the hex string form (`#RRGGBB`) so bay files stay
/// human-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RgbColor {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Default for RgbColor {
    /// The steel blue used for new bay configurations.
    fn default() -> Self {
        Self::new(74, 144, 226)
    }
}

impl RgbColor {
    /// Creates a new `RgbColor` from individual channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses an `RgbColor` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#rrggbb", "rrggbb"
    ///
    /// # Examples
    ///
    /// ```
    /// use bayline::models::RgbColor;
    ///
    /// let color = RgbColor::from_hex("#4A90E2").unwrap();
    /// assert_eq!(color, RgbColor::new(74, 144, 226));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if hex.len() != 6 {
            anyhow::bail!("Invalid hex color format '{hex}'. Expected 6 hex digits (RRGGBB)");
        }

        let r = u8::from_str_radix(&hex[0..2], 16)
            .context(format!("Invalid red channel in hex color '{hex}'"))?;
        let g = u8::from_str_radix(&hex[2..4], 16)
            .context(format!("Invalid green channel in hex color '{hex}'"))?;
        let b = u8::from_str_radix(&hex[4..6], 16)
            .context(format!("Invalid blue channel in hex color '{hex}'"))?;

        Ok(Self::new(r, g, b))
    }

    /// Converts the color to a hex string in the format "#RRGGBB" (uppercase).
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    #[must_use]
    pub const fn to_ratatui_color(&self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }

    /// Returns a dimmed version of the color at the given percentage.
    ///
    /// # Arguments
    ///
    /// * `percent` - Brightness percentage (0-100). 0 = black, 100 = original color.
    #[must_use]
    pub const fn dim(&self, percent: u8) -> Self {
        let percent = if percent > 100 { 100 } else { percent };
        Self {
            r: (self.r as u16 * percent as u16 / 100) as u8,
            g: (self.g as u16 * percent as u16 / 100) as u8,
            b: (self.b as u16 * percent as u16 / 100) as u8,
        }
    }

    /// Relative luminance on a 0.0-1.0 scale (Rec. 709 weights).
    #[must_use]
    pub fn luminance(&self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }

    /// Returns black or white, whichever contrasts better against this color.
    #[must_use]
    pub fn contrast_color(&self) -> Self {
        if self.luminance() > 0.5 {
            Self::new(0, 0, 0)
        } else {
            Self::new(255, 255, 255)
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for RgbColor {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_hash() {
        let color = RgbColor::from_hex("#FF0000").unwrap();
        assert_eq!(color, RgbColor::new(255, 0, 0));
    }

    #[test]
    fn test_from_hex_without_hash() {
        let color = RgbColor::from_hex("00ff00").unwrap();
        assert_eq!(color, RgbColor::new(0, 255, 0));
    }

    #[test]
    fn test_from_hex_rejects_short_strings() {
        assert!(RgbColor::from_hex("#FFF").is_err());
        assert!(RgbColor::from_hex("").is_err());
    }

    #[test]
    fn test_from_hex_rejects_non_hex_digits() {
        assert!(RgbColor::from_hex("#GGHHII").is_err());
    }

    #[test]
    fn test_to_hex_roundtrip() {
        let color = RgbColor::new(74, 144, 226);
        assert_eq!(color.to_hex(), "#4A90E2");
        assert_eq!(RgbColor::from_hex(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn test_dim() {
        let color = RgbColor::new(200, 100, 50);
        assert_eq!(color.dim(50), RgbColor::new(100, 50, 25));
        assert_eq!(color.dim(0), RgbColor::new(0, 0, 0));
        assert_eq!(color.dim(100), color);
        // Values above 100 clamp
        assert_eq!(color.dim(150), color);
    }

    #[test]
    fn test_contrast_color() {
        assert_eq!(
            RgbColor::new(255, 255, 255).contrast_color(),
            RgbColor::new(0, 0, 0)
        );
        assert_eq!(
            RgbColor::new(10, 10, 40).contrast_color(),
            RgbColor::new(255, 255, 255)
        );
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = RgbColor::new(74, 144, 226);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#4A90E2\"");

        let parsed: RgbColor = serde_json::from_str("\"#4a90e2\"").unwrap();
        assert_eq!(parsed, color);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A wall paint color, normalized to uppercase `#RRGGBB` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaintColor(String);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#'")]
    MissingHash,
    #[error("color must be 6 hex digits, got {0} characters")]
    WrongLength(usize),
    #[error("color contains a non-hex digit")]
    InvalidDigit,
}

impl PaintColor {
    /// The normalized `#RRGGBB` string.
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl FromStr for PaintColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if digits.len() != 6 {
            return Err(ColorParseError::WrongLength(digits.len()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit);
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }
}

impl fmt::Display for PaintColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PaintColor {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PaintColor> for String {
    fn from(c: PaintColor) -> Self {
        c.0
    }
}

/// A named color offered in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub hex: &'static str,
    pub description: &'static str,
}

pub const PRESET_COLORS: [ColorPreset; 12] = [
    ColorPreset { name: "Pure White", hex: "#FFFFFF", description: "Classic bright white" },
    ColorPreset { name: "Beige", hex: "#F5F5DC", description: "Warm neutral" },
    ColorPreset { name: "Light Gray", hex: "#D3D3D3", description: "Modern neutral" },
    ColorPreset { name: "Sky Blue", hex: "#87CEEB", description: "Calming blue" },
    ColorPreset { name: "Mint Green", hex: "#98FB98", description: "Fresh green" },
    ColorPreset { name: "Soft Yellow", hex: "#FFFACD", description: "Sunny yellow" },
    ColorPreset { name: "Lavender", hex: "#E6E6FA", description: "Soft purple" },
    ColorPreset { name: "Peach", hex: "#FFDAB9", description: "Warm peach" },
    ColorPreset { name: "Sage Green", hex: "#B2AC88", description: "Earthy green" },
    ColorPreset { name: "Powder Blue", hex: "#B0E0E6", description: "Light blue" },
    ColorPreset { name: "Warm Gray", hex: "#A9A9A9", description: "Cozy gray" },
    ColorPreset { name: "Cream", hex: "#FFFDD0", description: "Soft cream" },
];

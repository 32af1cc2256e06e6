// BearPixel
// copyright bear_pixel developers 2025

//! Defines Color and the four-color Palette used by the quantization pass.
//! Colors are written in config and code as css-like hex strings:
//! `#rgb`, `#rrggbb` or `#rrggbbaa`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// parse `#rgb`, `#rrggbb` or `#rrggbbaa`, leading '#' optional
    pub fn from_hex(s: &str) -> Option<Self> {
        let h = s.strip_prefix('#').unwrap_or(s);
        if !h.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
        match h.len() {
            3 => {
                let mut c = [0u8; 3];
                for (i, ch) in h.chars().enumerate() {
                    let v = ch.to_digit(16)? as u8;
                    c[i] = v << 4 | v;
                }
                Some(Color::rgb(c[0], c[1], c[2]))
            }
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::from_hex(&s).ok_or_else(|| format!("invalid color '{}'", s))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

/// Four colors ordered lightest to darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(pub [Color; 4]);

impl Palette {
    pub fn new(c1: Color, c2: Color, c3: Color, c4: Color) -> Self {
        Self([c1, c2, c3, c4])
    }

    /// classic DMG green
    pub fn dmg() -> Self {
        Self([
            Color::rgb(0x9b, 0xbc, 0x0f),
            Color::rgb(0x8b, 0xac, 0x0f),
            Color::rgb(0x30, 0x62, 0x30),
            Color::rgb(0x0f, 0x38, 0x0f),
        ])
    }

    /// fast approximate luminance, range 0..=318
    #[inline]
    pub fn luminance(r: u8, g: u8, b: u8) -> u32 {
        (3 * r as u32 + 6 * g as u32 + b as u32) >> 3
    }

    /// map a luminance to one of the four colors
    #[inline]
    pub fn pick(&self, lum: u32) -> Color {
        if lum > 240 {
            self.0[0]
        } else if lum > 160 {
            self.0[1]
        } else if lum > 80 {
            self.0[2]
        } else {
            self.0[3]
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dmg()
    }
}

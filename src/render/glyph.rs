// BearPixel
// copyright bear_pixel developers 2025

//! # Bitmap fonts
//!
//! A font maps characters to 1-bit glyphs. Every font carries a fallback
//! glyph (key `"null"` in font payloads) that is used for unmapped
//! characters; the fallback glyph's width is also the font's line height.
//!
//! Glyphs are drawn with a fixed RGB, set bits overwrite R,G,B of the
//! target pixel and leave its alpha untouched (tiles, in contrast, copy
//! all four channels).
//!
//! Text layout quirk kept on purpose: the line cursor advances by
//! `line_height + line_spacing` *before* each line is drawn, so the first
//! line sits one line-height below `y`.

use crate::render::{buffer::pixel_index, style::Color, RenderError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// key of the fallback glyph in font payloads
pub const FALLBACK_KEY: &str = "null";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Glyph {
    pub w: usize,
    pub h: usize,
    /// w * h coverage bits, row-major, 1 = draw
    pub bits: Vec<u8>,
}

impl Glyph {
    pub fn new(w: usize, h: usize, bits: Vec<u8>) -> Result<Self, RenderError> {
        let g = Self { w, h, bits };
        g.check()?;
        Ok(g)
    }

    fn check(&self) -> Result<(), RenderError> {
        if self.bits.len() != self.w * self.h {
            return Err(RenderError::InvalidFont(format!(
                "glyph {}x{} has {} bits",
                self.w,
                self.h,
                self.bits.len()
            )));
        }
        Ok(())
    }

    /// build from rows whose lowest `w` bits are pixels, msb first
    fn from_rows(w: usize, rows: &[u8]) -> Self {
        let mut bits = Vec::with_capacity(w * rows.len());
        for row in rows {
            for col in 0..w {
                bits.push((row >> (w - 1 - col)) & 1);
            }
        }
        Self {
            w,
            h: rows.len(),
            bits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontResource {
    glyphs: HashMap<char, Glyph>,
    fallback: Glyph,
}

impl FontResource {
    /// Build a font from a payload map. Keys are single characters plus the
    /// required `"null"` fallback.
    pub fn from_map(map: HashMap<String, Glyph>) -> Result<Self, RenderError> {
        let mut glyphs = HashMap::new();
        let mut fallback = None;
        for (key, glyph) in map {
            glyph.check()?;
            if key == FALLBACK_KEY {
                fallback = Some(glyph);
                continue;
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    glyphs.insert(c, glyph);
                }
                _ => {
                    return Err(RenderError::InvalidFont(format!(
                        "glyph key '{}' is not a single character",
                        key
                    )))
                }
            }
        }
        let fallback = fallback.ok_or_else(|| {
            RenderError::InvalidFont(format!("missing '{}' fallback glyph", FALLBACK_KEY))
        })?;
        Ok(Self { glyphs, fallback })
    }

    /// font payload: `{ "<char>": { "w": .., "h": .., "bits": [..] }, "null": {..} }`
    pub fn from_json(s: &str) -> Result<Self, RenderError> {
        let map: HashMap<String, Glyph> =
            serde_json::from_str(s).map_err(|e| RenderError::InvalidFont(e.to_string()))?;
        Self::from_map(map)
    }

    /// glyph for c, or the fallback glyph
    pub fn glyph(&self, c: char) -> &Glyph {
        self.glyphs.get(&c).unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &Glyph {
        &self.fallback
    }

    /// the fallback glyph's width doubles as line height
    pub fn line_height(&self) -> usize {
        self.fallback.w
    }

    /// Builtin 3x5 font: digits, latin letters (both cases share glyphs)
    /// and common punctuation. Fallback is a 5x5 box.
    pub fn builtin() -> Self {
        let mut glyphs = HashMap::new();
        for (c, rows) in BUILTIN_3X5 {
            let g = Glyph::from_rows(3, rows);
            if c.is_ascii_uppercase() {
                glyphs.insert(c.to_ascii_lowercase(), g.clone());
            }
            glyphs.insert(*c, g);
        }
        Self {
            glyphs,
            fallback: Glyph::from_rows(5, &[0b11111, 0b10001, 0b10001, 0b10001, 0b11111]),
        }
    }
}

/// Draws one glyph at (x, y): set bits overwrite R,G,B, alpha is untouched,
/// pixels outside the target are skipped.
pub fn draw_glyph(
    glyph: &Glyph,
    x: i64,
    y: i64,
    color: Color,
    target: &mut [u8],
    target_w: usize,
    target_h: usize,
) {
    for gy in 0..glyph.h {
        for gx in 0..glyph.w {
            if glyph.bits.get(gy * glyph.w + gx) != Some(&1) {
                continue;
            }
            if let Some(i) = pixel_index(x + gx as i64, y + gy as i64, target_w, target_h) {
                target[i] = color.r;
                target[i + 1] = color.g;
                target[i + 2] = color.b;
            }
        }
    }
}

/// Walks a multi-line string and calls `place` for every visible glyph
/// with its top-left position. Spaces advance the cursor but are not placed.
pub fn layout_text<F>(
    font: &FontResource,
    text: &str,
    x: i64,
    y: i64,
    line_spacing: i64,
    letter_spacing: i64,
    mut place: F,
) where
    F: FnMut(&Glyph, i64, i64),
{
    let line_height = font.line_height() as i64;
    let mut cy = y;
    for line in text.split('\n') {
        cy += line_height + line_spacing;
        let mut cx = x;
        for c in line.chars() {
            let g = font.glyph(c);
            if c != ' ' {
                place(g, cx, cy);
            }
            cx += g.w as i64 + letter_spacing;
        }
    }
}

/// Text rendering into a raw RGBA target. With a shadow color the same
/// text is first drawn one pixel lower in the shadow color.
#[allow(clippy::too_many_arguments)]
pub fn draw_text(
    font: &FontResource,
    text: &str,
    x: i64,
    y: i64,
    color: Color,
    shadow: Option<Color>,
    line_spacing: i64,
    letter_spacing: i64,
    target: &mut [u8],
    target_w: usize,
    target_h: usize,
) {
    if let Some(sc) = shadow {
        layout_text(font, text, x, y + 1, line_spacing, letter_spacing, |g, gx, gy| {
            draw_glyph(g, gx, gy, sc, target, target_w, target_h)
        });
    }
    layout_text(font, text, x, y, line_spacing, letter_spacing, |g, gx, gy| {
        draw_glyph(g, gx, gy, color, target, target_w, target_h)
    });
}

#[rustfmt::skip]
const BUILTIN_3X5: &[(char, [u8; 5])] = &[
    (' ', [0b000, 0b000, 0b000, 0b000, 0b000]),
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b111, 0b001, 0b111, 0b100, 0b111]),
    ('3', [0b111, 0b001, 0b111, 0b001, 0b111]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b111, 0b001, 0b111]),
    ('6', [0b111, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b010, 0b010, 0b010]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b111]),
    ('A', [0b010, 0b101, 0b111, 0b101, 0b101]),
    ('B', [0b110, 0b101, 0b110, 0b101, 0b110]),
    ('C', [0b011, 0b100, 0b100, 0b100, 0b011]),
    ('D', [0b110, 0b101, 0b101, 0b101, 0b110]),
    ('E', [0b111, 0b100, 0b110, 0b100, 0b111]),
    ('F', [0b111, 0b100, 0b110, 0b100, 0b100]),
    ('G', [0b011, 0b100, 0b101, 0b101, 0b011]),
    ('H', [0b101, 0b101, 0b111, 0b101, 0b101]),
    ('I', [0b111, 0b010, 0b010, 0b010, 0b111]),
    ('J', [0b001, 0b001, 0b001, 0b101, 0b010]),
    ('K', [0b101, 0b101, 0b110, 0b101, 0b101]),
    ('L', [0b100, 0b100, 0b100, 0b100, 0b111]),
    ('M', [0b101, 0b111, 0b111, 0b101, 0b101]),
    ('N', [0b110, 0b101, 0b101, 0b101, 0b101]),
    ('O', [0b010, 0b101, 0b101, 0b101, 0b010]),
    ('P', [0b110, 0b101, 0b110, 0b100, 0b100]),
    ('Q', [0b010, 0b101, 0b101, 0b110, 0b011]),
    ('R', [0b110, 0b101, 0b110, 0b101, 0b101]),
    ('S', [0b011, 0b100, 0b010, 0b001, 0b110]),
    ('T', [0b111, 0b010, 0b010, 0b010, 0b010]),
    ('U', [0b101, 0b101, 0b101, 0b101, 0b111]),
    ('V', [0b101, 0b101, 0b101, 0b101, 0b010]),
    ('W', [0b101, 0b101, 0b111, 0b111, 0b101]),
    ('X', [0b101, 0b101, 0b010, 0b101, 0b101]),
    ('Y', [0b101, 0b101, 0b010, 0b010, 0b010]),
    ('Z', [0b111, 0b001, 0b010, 0b100, 0b111]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    (',', [0b000, 0b000, 0b000, 0b010, 0b100]),
    (':', [0b000, 0b010, 0b000, 0b010, 0b000]),
    (';', [0b000, 0b010, 0b000, 0b010, 0b100]),
    ('(', [0b001, 0b010, 0b010, 0b010, 0b001]),
    (')', [0b100, 0b010, 0b010, 0b010, 0b100]),
    ('-', [0b000, 0b000, 0b111, 0b000, 0b000]),
    ('+', [0b000, 0b010, 0b111, 0b010, 0b000]),
    ('/', [0b001, 0b001, 0b010, 0b100, 0b100]),
    ('!', [0b010, 0b010, 0b010, 0b000, 0b010]),
    ('?', [0b110, 0b001, 0b010, 0b000, 0b010]),
    ('\'', [0b010, 0b010, 0b000, 0b000, 0b000]),
    ('=', [0b000, 0b111, 0b000, 0b111, 0b000]),
    ('_', [0b000, 0b000, 0b000, 0b000, 0b111]),
    ('%', [0b101, 0b001, 0b010, 0b100, 0b101]),
];

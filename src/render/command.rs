// BearPixel
// copyright bear_pixel developers 2025

//! Deferred draw commands. Commands are plain values, they are never
//! mutated after being enqueued; the layer offset is applied at flush time
//! by producing a translated copy.

use crate::render::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub font: String,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
    pub shadow: Option<Color>,
    pub line_spacing: i64,
    pub letter_spacing: i64,
}

impl TextCommand {
    /// text in the given font with default spacing (0 line, 1 letter)
    pub fn new(font: &str, text: &str, x: f64, y: f64, color: Color) -> Self {
        Self {
            font: font.to_string(),
            text: text.to_string(),
            x,
            y,
            color,
            shadow: None,
            line_spacing: 0,
            letter_spacing: 1,
        }
    }

    pub fn shadow(mut self, c: Color) -> Self {
        self.shadow = Some(c);
        self
    }

    pub fn spacing(mut self, line: i64, letter: i64) -> Self {
        self.line_spacing = line;
        self.letter_spacing = letter;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text(TextCommand),
    Tile {
        tileset: String,
        index: usize,
        x: f64,
        y: f64,
    },
    /// w x h grid of tiles, in tile units
    MultiTile {
        tileset: String,
        index: usize,
        x: f64,
        y: f64,
        w: usize,
        h: usize,
    },
}

impl DrawCommand {
    pub fn tile(tileset: &str, index: usize, x: f64, y: f64) -> Self {
        DrawCommand::Tile {
            tileset: tileset.to_string(),
            index,
            x,
            y,
        }
    }

    pub fn multi_tile(tileset: &str, index: usize, x: f64, y: f64, w: usize, h: usize) -> Self {
        DrawCommand::MultiTile {
            tileset: tileset.to_string(),
            index,
            x,
            y,
            w,
            h,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            DrawCommand::Text(t) => (t.x, t.y),
            DrawCommand::Tile { x, y, .. } | DrawCommand::MultiTile { x, y, .. } => (*x, *y),
        }
    }

    /// copy of this command moved by (dx, dy)
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let mut c = self.clone();
        match &mut c {
            DrawCommand::Text(t) => {
                t.x += dx;
                t.y += dy;
            }
            DrawCommand::Tile { x, y, .. } | DrawCommand::MultiTile { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
        c
    }
}

impl From<TextCommand> for DrawCommand {
    fn from(t: TextCommand) -> Self {
        DrawCommand::Text(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate_moves_copy_only() {
        let c = DrawCommand::multi_tile("tiles", 0, 10.0, 20.0, 2, 2);
        let t = c.translated(-5.0, -5.0);
        assert_eq!(c.position(), (10.0, 20.0));
        assert_eq!(t.position(), (5.0, 15.0));
        let txt: DrawCommand = TextCommand::new("default", "hi", 1.0, 1.0, Color::WHITE).into();
        assert_eq!(txt.translated(1.0, 2.0).position(), (2.0, 3.0));
    }
}

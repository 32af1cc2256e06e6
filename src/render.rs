// BearPixel
// copyright bear_pixel developers 2025

//! # Render module
//!
//! - `buffer`: RGBA pixel buffer, bit-blit compositor, palette quantization
//! - `glyph`: 1-bit bitmap fonts, glyph and text rasterization
//! - `style`: colors and the four-color palette
//! - `command`: deferred draw commands
//! - `layer`: z-ordered layer queues
//! - `renderer`: owns the buffer, resource tables and layers
//! - `adapter`: display surfaces (memory canvas, terminal)

pub mod adapter;
pub mod buffer;
pub mod command;
pub mod glyph;
pub mod layer;
pub mod renderer;
pub mod style;

pub use adapter::{MemorySurface, Surface};
pub use buffer::{blit_tile, PixelBuffer};
pub use command::{DrawCommand, TextCommand};
pub use glyph::{FontResource, Glyph};
pub use layer::{LayerQueue, RenderLayer};
pub use renderer::{RenderMode, Renderer, DEFAULT_FONT};
pub use style::{Color, Palette};

use std::{fmt, io};

/// Render errors are configuration mistakes (unknown ids, malformed
/// resources) or a failing display surface; clipping never errors.
#[derive(Debug)]
pub enum RenderError {
    UnknownLayer(String),
    UnknownTileset(String),
    UnknownFont(String),
    InvalidFont(String),
    Io(io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownLayer(id) => write!(f, "unknown render layer: {}", id),
            RenderError::UnknownTileset(id) => write!(f, "unknown tileset: {}", id),
            RenderError::UnknownFont(id) => write!(f, "unknown font: {}", id),
            RenderError::InvalidFont(msg) => write!(f, "invalid font: {}", msg),
            RenderError::Io(e) => write!(f, "surface error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<io::Error> for RenderError {
    fn from(e: io::Error) -> Self {
        RenderError::Io(e)
    }
}

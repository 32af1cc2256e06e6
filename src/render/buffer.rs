// BearPixel
// copyright bear_pixel developers 2025

//! PixelBuffer is the RGBA byte array mirroring the display surface.
//! Channel order is R,G,B,A, row-major, and the length is always
//! exactly width * height * 4.
//!
//! All drawing into the buffer is bounds-checked per pixel, a pixel that
//! falls outside the buffer is simply skipped (clipping, not an error).
//!
//! https://en.wikipedia.org/wiki/Bit_blit

use crate::render::style::{Color, Palette};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// a transparent-black buffer
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 4],
        }
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let mut b = Self::new(width, height);
        b.fill(color);
        b
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn fill(&mut self, color: Color) {
        let c = color.to_array();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&c);
        }
    }

    /// byte offset of pixel (x, y), None when outside the buffer
    #[inline]
    pub fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        pixel_index(x, y, self.width, self.height)
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let i = self.index_of(x, y)?;
        let mut p = [0u8; 4];
        p.copy_from_slice(&self.data[i..i + 4]);
        Some(p)
    }

    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color) {
        if let Some(i) = self.index_of(x, y) {
            self.data[i..i + 4].copy_from_slice(&color.to_array());
        }
    }

    /// blit one tile at an integer destination, see `blit_tile`
    pub fn blit(&mut self, tile: &[u8], tile_size: usize, dest_x: i64, dest_y: i64) {
        blit_tile(
            tile,
            tile_size,
            dest_x,
            dest_y,
            &mut self.data,
            self.width,
            self.height,
        );
    }

    /// quantize every pixel into the palette, alpha is preserved
    pub fn apply_palette(&mut self, palette: &Palette) {
        apply_palette(&mut self.data, palette);
    }
}

#[inline]
pub(crate) fn pixel_index(x: i64, y: i64, width: usize, height: usize) -> Option<usize> {
    if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
        return None;
    }
    Some((y as usize * width + x as usize) * 4)
}

/// Copies a tile's pixels into target at (dest_x, dest_y).
///
/// Pixels with alpha 0 are skipped (alpha-test, no blending), opaque pixels
/// replace the target RGBA verbatim, pixels landing outside
/// [0, target_w) x [0, target_h) are clipped. Destination must already be
/// rounded by the caller. Mutates target in place.
pub fn blit_tile(
    tile: &[u8],
    tile_size: usize,
    dest_x: i64,
    dest_y: i64,
    target: &mut [u8],
    target_w: usize,
    target_h: usize,
) {
    for y in 0..tile_size {
        for x in 0..tile_size {
            let ti = (y * tile_size + x) * 4;
            let Some(src) = tile.get(ti..ti + 4) else {
                // short tile data: nothing more to copy
                return;
            };
            if src[3] == 0 {
                continue;
            }
            if let Some(gi) = pixel_index(dest_x + x as i64, dest_y + y as i64, target_w, target_h)
            {
                target[gi..gi + 4].copy_from_slice(src);
            }
        }
    }
}

/// Palette pass over a raw RGBA slice, writes RGB and keeps A.
pub fn apply_palette(data: &mut [u8], palette: &Palette) {
    for px in data.chunks_exact_mut(4) {
        let c = palette.pick(Palette::luminance(px[0], px[1], px[2]));
        px[0] = c.r;
        px[1] = c.g;
        px[2] = c.b;
    }
}

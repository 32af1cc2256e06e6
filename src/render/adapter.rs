// BearPixel
// copyright bear_pixel developers 2025

//! Display surfaces.
//!
//! A Surface plays the role of the canvas: immediate primitives (rects and
//! single-line text) go straight onto it, the pixel buffer is read back
//! from it once per frame and committed to it in one write on flush.
//!
//! `MemorySurface` keeps its pixels in memory, it is what tests and
//! headless runs use. `CrosstermSurface` (feature `term`) presents the
//! committed pixels in a terminal.

use crate::{event::Event, render::style::Color};
use std::io;

#[cfg(feature = "term")]
pub mod cross;

pub trait Surface {
    /// (width, height) in pixels
    fn size(&self) -> (usize, usize);

    /// fill every pixel whose center lies inside the rectangle
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color);

    /// copy the surface pixels into out (RGBA, width * height * 4)
    fn get_image_data(&self, out: &mut [u8]);

    /// replace the surface pixels with data (RGBA, width * height * 4)
    fn put_image_data(&mut self, data: &[u8]) -> io::Result<()>;

    /// collect pending input events, returns true when the host wants to quit
    fn poll_events(&mut self, _events: &mut Vec<Event>) -> bool {
        false
    }
}

/// fill helper shared by surfaces that keep an RGBA pixel array
#[allow(clippy::too_many_arguments)]
pub(crate) fn fill_rect_rgba(
    pixels: &mut [u8],
    width: usize,
    height: usize,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    color: Color,
) {
    // pixel centers inside [x, x + w) x [y, y + h)
    let x0 = (x - 0.5).ceil().max(0.0) as usize;
    let y0 = (y - 0.5).ceil().max(0.0) as usize;
    let x1 = ((x + w - 0.5).ceil().max(0.0) as usize).min(width);
    let y1 = ((y + h - 0.5).ceil().max(0.0) as usize).min(height);
    let c = color.to_array();
    for py in y0..y1 {
        for px in x0..x1 {
            let i = (py * width + px) * 4;
            pixels[i..i + 4].copy_from_slice(&c);
        }
    }
}

pub(crate) fn copy_image(src: &[u8], dst: &mut [u8]) -> io::Result<()> {
    if src.len() != dst.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("image data is {} bytes, surface is {}", src.len(), dst.len()),
        ));
    }
    dst.copy_from_slice(src);
    Ok(())
}

/// In-memory canvas.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    /// number of put_image_data commits so far
    pub commits: usize,
}

impl MemorySurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            commits: 0,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut p = [0u8; 4];
        p.copy_from_slice(&self.pixels[i..i + 4]);
        Some(p)
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        fill_rect_rgba(&mut self.pixels, self.width, self.height, x, y, w, h, color);
    }

    fn get_image_data(&self, out: &mut [u8]) {
        let n = out.len().min(self.pixels.len());
        out[..n].copy_from_slice(&self.pixels[..n]);
    }

    fn put_image_data(&mut self, data: &[u8]) -> io::Result<()> {
        copy_image(data, &mut self.pixels)?;
        self.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_covers_pixel_centers() {
        let mut s = MemorySurface::new(4, 4);
        s.fill_rect(1.0, 1.0, 2.0, 1.0, Color::RED);
        assert_eq!(s.pixel(1, 1), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(2, 1), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(3, 1), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(1, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn fill_rect_clips() {
        let mut s = MemorySurface::new(2, 2);
        s.fill_rect(-10.0, -10.0, 100.0, 100.0, Color::WHITE);
        assert!(s.pixels().iter().all(|b| *b == 255));
    }

    #[test]
    fn put_rejects_wrong_size() {
        let mut s = MemorySurface::new(2, 2);
        assert!(s.put_image_data(&[0u8; 3]).is_err());
        assert!(s.put_image_data(&[7u8; 16]).is_ok());
        assert_eq!(s.commits, 1);
        let mut out = [0u8; 16];
        s.get_image_data(&mut out);
        assert_eq!(out, [7u8; 16]);
    }
}

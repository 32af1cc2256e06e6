// BearPixel
// copyright bear_pixel developers 2025

//! Renderer owns the pixel buffer, the tileset / font tables and the layer
//! queues, and talks to the display surface.
//!
//! Frame protocol used by the scene:
//!
//! ```text
//! clear()          solid background onto the surface
//! read_pixels()    surface -> buffer (before any buffer draw)
//! enqueue(..)      deferred tiles / multi-tiles / text
//! draw_layers()    layers in (z, id) order -> buffer, queues emptied
//! apply_palette()  optional 4-color quantization of the buffer
//! flush()          buffer -> surface, the only way buffer draws show up
//! ```
//!
//! `draw_rect` / `draw_text` are immediate and go straight onto the surface;
//! `draw_tile` / `draw_multi_tile` / `draw_text2` write the buffer at once
//! and need a `flush` to become visible.

use crate::{
    asset::{Resource, ResourcePayload, TileResource},
    render::{
        adapter::Surface,
        buffer::PixelBuffer,
        command::{DrawCommand, TextCommand},
        glyph::{self, layout_text, FontResource},
        layer::LayerQueue,
        style::{Color, Palette},
        RenderError,
    },
};
use log::{debug, info};
use std::collections::HashMap;

/// name of the builtin font, always registered
pub const DEFAULT_FONT: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Normal,
    /// round every coordinate to whole pixels
    Pixel,
}

/// round half up, the same way for positive and negative coordinates
#[inline]
pub fn round_px(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

pub struct Renderer {
    surface: Box<dyn Surface>,
    width: usize,
    height: usize,
    mode: RenderMode,
    pub background: Color,
    buffer: PixelBuffer,
    tilesets: HashMap<String, TileResource>,
    fonts: HashMap<String, FontResource>,
    layers: LayerQueue,
    palette: Option<Palette>,
}

impl Renderer {
    pub fn new(surface: Box<dyn Surface>, mode: RenderMode) -> Self {
        let (width, height) = surface.size();
        let mut fonts = HashMap::new();
        fonts.insert(DEFAULT_FONT.to_string(), FontResource::builtin());
        let mut r = Self {
            surface,
            width,
            height,
            mode,
            background: Color::rgb(0x22, 0x22, 0x22),
            buffer: PixelBuffer::new(width, height),
            tilesets: HashMap::new(),
            fonts,
            layers: LayerQueue::new(),
            palette: None,
        };
        r.read_pixels();
        r
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> &mut dyn Surface {
        self.surface.as_mut()
    }

    pub fn layers(&self) -> &LayerQueue {
        &self.layers
    }

    pub fn tileset(&self, id: &str) -> Option<&TileResource> {
        self.tilesets.get(id)
    }

    pub fn font(&self, id: &str) -> Option<&FontResource> {
        self.fonts.get(id)
    }

    fn num(&self, v: f64) -> f64 {
        match self.mode {
            RenderMode::Pixel => round_px(v) as f64,
            RenderMode::Normal => v,
        }
    }

    /// Register a tileset or a font under its name, replacing any previous
    /// resource of the same kind and name.
    pub fn load_resource(&mut self, res: Resource) {
        let Resource { name, payload } = res;
        match payload {
            ResourcePayload::Tileset(t) => {
                info!(
                    "load tileset '{}': {} tiles, {}px, {} cols",
                    name,
                    t.tiles.len(),
                    t.tile_size,
                    t.tile_cols
                );
                self.tilesets.insert(name, t);
            }
            ResourcePayload::Font(f) => {
                info!("load font '{}'", name);
                self.fonts.insert(name, f);
            }
        }
    }

    /// Solid background straight onto the surface.
    pub fn clear(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        self.surface.fill_rect(0.0, 0.0, w, h, self.background);
    }

    /// Snapshot the surface into the pixel buffer.
    pub fn read_pixels(&mut self) {
        self.surface.get_image_data(self.buffer.data_mut());
    }

    /// Commit the pixel buffer to the surface in one write.
    pub fn flush(&mut self) -> Result<(), RenderError> {
        self.surface.put_image_data(self.buffer.data())?;
        Ok(())
    }

    /// immediate rect onto the surface
    pub fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        let (x, y, w, h) = (self.num(x), self.num(y), self.num(w), self.num(h));
        self.surface.fill_rect(x, y, w, h, color);
    }

    /// Immediate single-line text in the default font onto the surface.
    /// Like a canvas baseline, the glyphs end up one line-height below y.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Color, shadow: Option<Color>) {
        let (x, y) = (round_px(x), round_px(y));
        let line = text.split('\n').next().unwrap_or_default();
        let Some(font) = self.fonts.get(DEFAULT_FONT) else {
            return;
        };
        let surface = &mut self.surface;
        let mut plot = |g: &glyph::Glyph, gx: i64, gy: i64, c: Color| {
            for by in 0..g.h {
                for bx in 0..g.w {
                    if g.bits.get(by * g.w + bx) == Some(&1) {
                        surface.fill_rect((gx + bx as i64) as f64, (gy + by as i64) as f64, 1.0, 1.0, c);
                    }
                }
            }
        };
        if let Some(sc) = shadow {
            layout_text(font, line, x, y + 1, 0, 1, |g, gx, gy| plot(g, gx, gy, sc));
        }
        layout_text(font, line, x, y, 0, 1, |g, gx, gy| plot(g, gx, gy, color));
    }

    /// Blit one tile into the buffer. Indices past the end of the tileset
    /// are skipped.
    pub fn draw_tile(&mut self, tileset: &str, index: usize, x: f64, y: f64) -> Result<(), RenderError> {
        let ts = self
            .tilesets
            .get(tileset)
            .ok_or_else(|| RenderError::UnknownTileset(tileset.to_string()))?;
        match ts.tiles.get(index) {
            Some(tile) => self.buffer.blit(tile, ts.tile_size, round_px(x), round_px(y)),
            None => debug!("tile {} out of range in '{}'", index, tileset),
        }
        Ok(())
    }

    /// Blit a w x h grid of tiles. Source indices start at `index` and step
    /// by the tileset's column count per grid row, so the sprite must be laid
    /// out contiguously in the tileset. Columns are the outer loop, rows the
    /// inner one.
    pub fn draw_multi_tile(
        &mut self,
        tileset: &str,
        index: usize,
        x: f64,
        y: f64,
        w: usize,
        h: usize,
    ) -> Result<(), RenderError> {
        let ts = self
            .tilesets
            .get(tileset)
            .ok_or_else(|| RenderError::UnknownTileset(tileset.to_string()))?;
        let (x, y) = (round_px(x), round_px(y));
        let size = ts.tile_size;
        for i in 0..w {
            for j in 0..h {
                let src = index + j * ts.tile_cols + i;
                let Some(tile) = ts.tiles.get(src) else {
                    debug!("tile {} out of range in '{}'", src, tileset);
                    continue;
                };
                self.buffer
                    .blit(tile, size, x + (i * size) as i64, y + (j * size) as i64);
            }
        }
        Ok(())
    }

    /// Multi-line bitmap text into the buffer.
    pub fn draw_text2(&mut self, t: &TextCommand) -> Result<(), RenderError> {
        let font = self
            .fonts
            .get(&t.font)
            .ok_or_else(|| RenderError::UnknownFont(t.font.clone()))?;
        let (w, h) = (self.width, self.height);
        glyph::draw_text(
            font,
            &t.text,
            round_px(t.x),
            round_px(t.y),
            t.color,
            t.shadow,
            t.line_spacing,
            t.letter_spacing,
            self.buffer.data_mut(),
            w,
            h,
        );
        Ok(())
    }

    pub fn draw_command(&mut self, c: &DrawCommand) -> Result<(), RenderError> {
        match c {
            DrawCommand::Text(t) => self.draw_text2(t),
            DrawCommand::Tile { tileset, index, x, y } => self.draw_tile(tileset, *index, *x, *y),
            DrawCommand::MultiTile {
                tileset,
                index,
                x,
                y,
                w,
                h,
            } => self.draw_multi_tile(tileset, *index, *x, *y, *w, *h),
        }
    }

    /// z None sorts like 0
    pub fn add_layer(&mut self, id: &str, z_index: impl Into<Option<i32>>) {
        self.layers.add_layer(id, z_index);
    }

    pub fn set_layer_offset(&mut self, id: &str, x: f64, y: f64) -> Result<(), RenderError> {
        self.layers.set_offset(id, x, y)
    }

    pub fn enqueue(&mut self, layer: &str, command: impl Into<DrawCommand>) -> Result<(), RenderError> {
        self.layers.enqueue(layer, command.into())
    }

    /// Draw every layer into the buffer in (z, id) order and empty all
    /// queues. On error the rest of the frame's commands are dropped.
    pub fn draw_layers(&mut self) -> Result<(), RenderError> {
        for batch in self.layers.drain_sorted() {
            for c in &batch.commands {
                self.draw_command(c)?;
            }
        }
        Ok(())
    }

    /// Throw away everything queued for this frame.
    pub fn discard_layers(&mut self) {
        self.layers.clear_all();
    }

    pub fn apply_palette(&mut self, c1: Color, c2: Color, c3: Color, c4: Color) {
        self.buffer.apply_palette(&Palette::new(c1, c2, c3, c4));
    }

    /// palette used by `apply_active_palette`, None disables the pass
    pub fn set_palette(&mut self, palette: Option<Palette>) {
        self.palette = palette;
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn apply_active_palette(&mut self) {
        if let Some(p) = self.palette {
            self.buffer.apply_palette(&p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::adapter::MemorySurface;

    fn checker_tileset() -> TileResource {
        // 2 cols x 2 rows of 2px tiles, each tile a distinct solid red level
        let tiles = (0..4u8)
            .map(|i| [10 + i, 0, 0, 255].repeat(4))
            .collect();
        TileResource {
            tile_size: 2,
            tile_cols: 2,
            tiles,
        }
    }

    fn renderer(w: usize, h: usize) -> Renderer {
        let mut r = Renderer::new(Box::new(MemorySurface::new(w, h)), RenderMode::Pixel);
        r.load_resource(Resource::tileset("t", checker_tileset()));
        r
    }

    #[test]
    fn round_half_up() {
        assert_eq!(round_px(1.5), 2);
        assert_eq!(round_px(-0.5), 0);
        assert_eq!(round_px(-0.6), -1);
        assert_eq!(round_px(2.49), 2);
    }

    #[test]
    fn multi_tile_walks_tileset_rows() {
        let mut r = renderer(4, 4);
        r.draw_multi_tile("t", 0, 0.0, 0.0, 2, 2).unwrap();
        assert_eq!(r.buffer().pixel(0, 0), Some([10, 0, 0, 255]));
        assert_eq!(r.buffer().pixel(2, 0), Some([11, 0, 0, 255]));
        assert_eq!(r.buffer().pixel(0, 2), Some([12, 0, 0, 255]));
        assert_eq!(r.buffer().pixel(3, 3), Some([13, 0, 0, 255]));
    }

    #[test]
    fn unknown_tileset_and_font_are_errors() {
        let mut r = renderer(4, 4);
        assert!(matches!(
            r.draw_tile("nope", 0, 0.0, 0.0),
            Err(RenderError::UnknownTileset(_))
        ));
        let t = TextCommand::new("nope", "x", 0.0, 0.0, Color::WHITE);
        assert!(matches!(r.draw_text2(&t), Err(RenderError::UnknownFont(_))));
    }

    #[test]
    fn out_of_range_tile_is_skipped() {
        let mut r = renderer(4, 4);
        let before = r.buffer().clone();
        r.draw_tile("t", 99, 0.0, 0.0).unwrap();
        assert_eq!(r.buffer(), &before);
    }

    #[test]
    fn immediate_draws_bypass_the_buffer() {
        let mut r = renderer(8, 8);
        r.draw_rect(0.0, 0.0, 2.0, 2.0, Color::RED);
        assert_eq!(r.buffer().pixel(0, 0), Some([0, 0, 0, 0]));
        r.read_pixels();
        assert_eq!(r.buffer().pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn buffer_draws_need_flush() {
        let mut r = renderer(4, 4);
        r.draw_tile("t", 3, 0.0, 0.0).unwrap();
        let mut out = vec![0u8; 4 * 4 * 4];
        r.surface().get_image_data(&mut out);
        assert_eq!(&out[0..4], &[0, 0, 0, 0]);
        r.flush().unwrap();
        r.surface().get_image_data(&mut out);
        assert_eq!(&out[0..4], &[13, 0, 0, 255]);
    }

    #[test]
    fn apply_palette_quantizes_buffer() {
        let mut r = renderer(4, 4);
        let (c1, c2, c3, c4) = (
            Color::rgb(1, 1, 1),
            Color::rgb(2, 2, 2),
            Color::rgb(3, 3, 3),
            Color::rgb(4, 4, 4),
        );
        r.draw_rect(0.0, 0.0, 1.0, 1.0, Color::WHITE);
        r.draw_rect(1.0, 0.0, 1.0, 1.0, Color::BLACK);
        r.read_pixels();
        r.apply_palette(c1, c2, c3, c4);
        assert_eq!(r.buffer().pixel(0, 0), Some([1, 1, 1, 255]));
        assert_eq!(r.buffer().pixel(1, 0), Some([4, 4, 4, 255]));
    }

    #[test]
    fn immediate_text_uses_builtin_font() {
        let mut r = renderer(16, 16);
        r.draw_text(0.0, 0.0, "1", Color::WHITE, None);
        r.read_pixels();
        // '1' row 0 is 010, drawn one line-height (5) down
        assert_eq!(r.buffer().pixel(1, 5), Some([255, 255, 255, 255]));
        assert_eq!(r.buffer().pixel(0, 5), Some([0, 0, 0, 0]));
    }
}

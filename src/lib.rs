// BearPixel
// copyright bear_pixel developers 2025

//! BearPixel is a small Gameboy-style 2D tile engine.
//!
//! Every frame is composited in software into a single RGBA pixel buffer:
//! game objects enqueue deferred draw commands (tiles, multi-tile sprites,
//! bitmap-font text) onto named z-ordered layers, the layers are flushed in
//! order through a bit-blit compositor and a glyph rasterizer, an optional
//! four-color palette pass quantizes the result, and the buffer is committed
//! to the display surface in one write.
//!
//! Modules:
//! - `render`: pixel buffer, blit, glyphs, palette, layer queue, renderer, surfaces
//! - `scene`: scene graph (arena of game objects), camera, player
//! - `game`: variable-timestep game loop driven by a frame scheduler
//! - `asset`: tileset / font resources and their loaders
//! - `tileset`: tileset and map text formats, tileset storage
//! - `event`, `context`: per-frame input snapshot and game info
//! - `init`, `log`: configuration and logging bootstrap

/// Gameboy screen width in pixels
pub const GAME_WIDTH: usize = 160;
/// Gameboy screen height in pixels
pub const GAME_HEIGHT: usize = 144;
/// target framerate for schedulers that pace themselves
pub const GAME_FRAME: u32 = 60;

/// resource descriptors and loaders: tilesets, fonts, PNG slicing
pub mod asset;

/// per-frame context handed to game objects
pub mod context;

/// keyboard events and the per-frame input snapshot
pub mod event;

/// game loop and frame schedulers
pub mod game;

/// game configuration
pub mod init;
pub use init::{get_game_config, init_game_config, GameConfig};

/// log
pub mod log;

/// Render module.
/// buffer: RGBA pixel buffer, bit-blit and palette quantization.
/// glyph: 1-bit bitmap fonts and text layout.
/// command: deferred draw commands.
/// layer: z-ordered command queues.
/// renderer: owns buffer, resources and layers.
/// adapter: display surfaces (memory, terminal).
pub mod render;

/// scene graph, camera and player
pub mod scene;

/// tileset / map text formats and tileset storage
pub mod tileset;

// BearPixel
// copyright bear_pixel developers 2025

//! Game configuration.
//!
//! A game is described by a small TOML file; every field has a default so
//! an empty file (or no file at all) gives the plain 160x144 Gameboy setup:
//!
//! ```toml
//! game_name = "bear"
//! background = "#222"
//! palette = ["#9bbc0f", "#8bac0f", "#306230", "#0f380f"]
//!
//! [[resources]]
//! kind = "tileset"
//! name = "tiles"
//! path = "assets/tiles.png"
//!
//! [map]
//! tileset = "tiles"
//! definitions = "assets/level.tileset"
//! template = "assets/level.map"
//! ```
//!
//! `init_game_config` stores the config process-wide once at startup,
//! `get_game_config` reads it from anywhere.

use crate::{
    asset::ResourceDesc,
    game::GameError,
    render::style::{Color, Palette},
    GAME_FRAME, GAME_HEIGHT, GAME_WIDTH,
};
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf, sync::OnceLock};

/// background map: tileset resource name plus the two text files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapDesc {
    pub tileset: String,
    pub definitions: PathBuf,
    pub template: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game_name: String,
    pub width: usize,
    pub height: usize,
    /// round all coordinates to whole pixels
    pub pixel_mode: bool,
    pub background: Color,
    /// FPS average refresh interval, ms
    pub fps_interval: f64,
    pub time_scale: f64,
    /// pacing of the interval scheduler
    pub frame_rate: u32,
    /// lightest first, None disables the palette pass
    pub palette: Option<[Color; 4]>,
    pub log_level: String,
    pub log_file: String,
    pub resources: Vec<ResourceDesc>,
    pub map: Option<MapDesc>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_name: "bear".to_string(),
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            pixel_mode: true,
            background: Color::rgb(0x22, 0x22, 0x22),
            fps_interval: 200.0,
            time_scale: 1.0,
            frame_rate: GAME_FRAME,
            palette: None,
            log_level: "info".to_string(),
            log_file: "log/bear.log".to_string(),
            resources: vec![],
            map: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, GameError> {
        toml::from_str(s).map_err(|e| GameError::Config(e.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let s = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&s)
    }

    pub fn palette(&self) -> Option<Palette> {
        self.palette.map(Palette)
    }
}

/// Global game configuration, set once at startup
pub static GAME_CONFIG: OnceLock<GameConfig> = OnceLock::new();

/// Store the config for the whole process. Later calls are ignored.
pub fn init_game_config(config: GameConfig) {
    let _ = GAME_CONFIG.set(config);
}

/// The process config, or the default one if nothing was stored.
pub fn get_game_config() -> &'static GameConfig {
    GAME_CONFIG.get_or_init(GameConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let c = GameConfig::from_toml_str("").unwrap();
        assert_eq!(c, GameConfig::default());
        assert_eq!((c.width, c.height), (160, 144));
        assert_eq!(c.background, Color::from_hex("#222").unwrap());
        assert!(c.palette().is_none());
    }

    #[test]
    fn full_config() {
        let c = GameConfig::from_toml_str(
            r##"
            game_name = "cave"
            time_scale = 0.5
            palette = ["#fff", "#aaa", "#555", "#000"]

            [[resources]]
            kind = "tileset"
            name = "tiles"
            path = "tiles.png"

            [[resources]]
            kind = "font"
            name = "big"
            path = "big.json"
            tile_size = 16

            [map]
            tileset = "tiles"
            definitions = "level.tileset"
            template = "level.map"
            "##,
        )
        .unwrap();
        assert_eq!(c.game_name, "cave");
        assert_eq!(c.time_scale, 0.5);
        assert_eq!(c.palette().unwrap().0[3], Color::BLACK);
        assert_eq!(c.resources.len(), 2);
        assert_eq!(c.resources[0].tile_size, 8);
        assert_eq!(c.resources[1].tile_size, 16);
        assert_eq!(c.map.unwrap().tileset, "tiles");
    }

    #[test]
    fn bad_color_is_config_error() {
        assert!(matches!(
            GameConfig::from_toml_str("background = \"#zz\""),
            Err(GameError::Config(_))
        ));
    }
}

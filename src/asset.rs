// BearPixel
// copyright bear_pixel developers 2025

//! Asset module turns files on disk into renderer resources.
//!
//! A game lists its resources in the config as `ResourceDesc`s
//! (`kind`, `name`, `path`); `load_resource` dispatches by kind and hands
//! back a typed `Resource` for `Renderer::load_resource`. Tilesets are PNG
//! spritesheets sliced into square tiles, fonts are JSON glyph maps.

use crate::render::glyph::FontResource;
use log::info;
use serde::Deserialize;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug)]
pub enum AssetError {
    Io(io::Error),
    Json(serde_json::Error),
    #[cfg(feature = "image")]
    Image(image::ImageError),
    UnknownKind(String),
    InvalidFont(String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Io(e) => write!(f, "asset io: {}", e),
            AssetError::Json(e) => write!(f, "asset json: {}", e),
            #[cfg(feature = "image")]
            AssetError::Image(e) => write!(f, "asset image: {}", e),
            AssetError::UnknownKind(k) => write!(f, "don't know how to load {}", k),
            AssetError::InvalidFont(msg) => write!(f, "invalid font: {}", msg),
        }
    }
}

impl std::error::Error for AssetError {}

impl From<io::Error> for AssetError {
    fn from(e: io::Error) -> Self {
        AssetError::Io(e)
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(e: serde_json::Error) -> Self {
        AssetError::Json(e)
    }
}

#[cfg(feature = "image")]
impl From<image::ImageError> for AssetError {
    fn from(e: image::ImageError) -> Self {
        AssetError::Image(e)
    }
}

/// Square tiles sliced from a spritesheet, indexed row-major:
/// `index = tile_row * tile_cols + tile_col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileResource {
    pub tile_size: usize,
    pub tile_cols: usize,
    /// tile_size * tile_size * 4 bytes each
    pub tiles: Vec<Vec<u8>>,
}

impl TileResource {
    /// Slice an RGBA image into tiles. Partial tiles at the right or bottom
    /// edge are kept, their pixels past the image edge stay transparent.
    pub fn from_rgba(width: usize, height: usize, data: &[u8], tile_size: usize) -> Self {
        if tile_size == 0 {
            return Self {
                tile_size,
                tile_cols: 0,
                tiles: vec![],
            };
        }
        let tile_cols = width.div_ceil(tile_size);
        let tile_rows = height.div_ceil(tile_size);
        let mut tiles = Vec::with_capacity(tile_cols * tile_rows);
        for tr in 0..tile_rows {
            for tc in 0..tile_cols {
                let mut tile = vec![0u8; tile_size * tile_size * 4];
                for y in 0..tile_size {
                    let gy = tr * tile_size + y;
                    if gy >= height {
                        break;
                    }
                    for x in 0..tile_size {
                        let gx = tc * tile_size + x;
                        if gx >= width {
                            break;
                        }
                        let src = (gy * width + gx) * 4;
                        let dst = (y * tile_size + x) * 4;
                        if let Some(px) = data.get(src..src + 4) {
                            tile[dst..dst + 4].copy_from_slice(px);
                        }
                    }
                }
                tiles.push(tile);
            }
        }
        Self {
            tile_size,
            tile_cols,
            tiles,
        }
    }

    pub fn tile_rows(&self) -> usize {
        if self.tile_cols == 0 {
            0
        } else {
            self.tiles.len() / self.tile_cols
        }
    }
}

/// Decode a PNG spritesheet and slice it.
#[cfg(feature = "image")]
pub fn load_png_tiles<P: AsRef<Path>>(path: P, tile_size: usize) -> Result<TileResource, AssetError> {
    let img = image::open(path.as_ref())?.to_rgba8();
    let (w, h) = (img.width() as usize, img.height() as usize);
    Ok(TileResource::from_rgba(w, h, img.as_raw(), tile_size))
}

pub enum ResourcePayload {
    Tileset(TileResource),
    Font(FontResource),
}

pub struct Resource {
    pub name: String,
    pub payload: ResourcePayload,
}

impl Resource {
    pub fn tileset(name: &str, t: TileResource) -> Self {
        Self {
            name: name.to_string(),
            payload: ResourcePayload::Tileset(t),
        }
    }

    pub fn font(name: &str, f: FontResource) -> Self {
        Self {
            name: name.to_string(),
            payload: ResourcePayload::Font(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Tileset,
    Font,
}

impl FromStr for ResourceKind {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tileset" => Ok(ResourceKind::Tileset),
            "font" => Ok(ResourceKind::Font),
            _ => Err(AssetError::UnknownKind(s.to_string())),
        }
    }
}

fn default_tile_size() -> usize {
    8
}

/// resource entry of the game config
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceDesc {
    pub kind: String,
    pub name: String,
    pub path: PathBuf,
    #[serde(default = "default_tile_size")]
    pub tile_size: usize,
}

/// Load one described resource, `path` is relative to `base_dir`.
/// An unknown kind is an error before anything is read.
pub fn load_resource(desc: &ResourceDesc, base_dir: &Path) -> Result<Resource, AssetError> {
    let kind: ResourceKind = desc.kind.parse()?;
    let path = base_dir.join(&desc.path);
    info!("load {} '{}' from {}", desc.kind, desc.name, path.display());
    match kind {
        ResourceKind::Tileset => load_tileset(&path, desc),
        ResourceKind::Font => {
            let s = fs::read_to_string(&path)?;
            let f = FontResource::from_json(&s).map_err(|e| AssetError::InvalidFont(e.to_string()))?;
            Ok(Resource::font(&desc.name, f))
        }
    }
}

#[cfg(feature = "image")]
fn load_tileset(path: &Path, desc: &ResourceDesc) -> Result<Resource, AssetError> {
    let t = load_png_tiles(path, desc.tile_size)?;
    Ok(Resource::tileset(&desc.name, t))
}

#[cfg(not(feature = "image"))]
fn load_tileset(_path: &Path, desc: &ResourceDesc) -> Result<Resource, AssetError> {
    Err(AssetError::UnknownKind(format!(
        "{} (built without png support)",
        desc.kind
    )))
}

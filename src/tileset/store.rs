// BearPixel
// copyright bear_pixel developers 2025

//! File-backed tileset storage: one JSON document per tileset at
//! `<data_dir>/<name>.json`. Names are checked with
//! `is_valid_tileset_id` so they can't escape the data directory.

use super::is_valid_tileset_id;
use log::info;
use serde_json::Value;
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub enum StoreError {
    /// bad tileset name, nothing written
    InvalidName(String),
    /// document is not a JSON object, nothing written
    InvalidData,
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidName(n) => write!(f, "Missing or invalid tileset name '{}'", n),
            StoreError::InvalidData => write!(f, "Missing or invalid tileset data"),
            StoreError::Io(e) => write!(f, "Failed to save tileset: {}", e),
            StoreError::Json(e) => write!(f, "Failed to parse tileset: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

pub struct TilesetStore {
    data_dir: PathBuf,
}

impl TilesetStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !is_valid_tileset_id(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.data_dir.join(format!("{}.json", name)))
    }

    /// Write `data` under `name`, replacing an earlier version.
    pub fn save(&self, name: &str, data: &Value) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name)?;
        if !data.is_object() {
            return Err(StoreError::InvalidData);
        }
        fs::create_dir_all(&self.data_dir)?;
        fs::write(&path, serde_json::to_string(data)?)?;
        info!("Tileset \"{}\" saved to {}", name, path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Value, StoreError> {
        let path = self.path_for(name)?;
        let s = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&s)?)
    }

    /// names of all stored tilesets, sorted
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = vec![];
        let entries = match fs::read_dir(&self.data_dir) {
            Ok(e) => e,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(names),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_tileset_id(stem) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

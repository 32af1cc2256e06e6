// BearPixel
// copyright bear_pixel developers 2025

//! Tileset and map text formats.
//!
//! A raw spritesheet is sliced into tiles (see `asset`), a *tileset* file
//! gives tiles two-character shortcodes, a *map template* lays shortcodes
//! out on a grid:
//!
//! ```text
//! level.tileset          level.map
//! gr 0  wa 1             wawawawa
//! fl 34                  wagr..wa
//!                        wawawawa
//! ```
//!
//! `..` is an empty cell. Resolving a template against its definitions
//! gives a `TileMap` of tile indices.

pub mod store;

use itertools::Itertools;
use log::warn;
use regex::Regex;
use std::{collections::HashMap, sync::OnceLock};

/// shortcode -> tile index
pub type TileDefinitions = HashMap<String, usize>;

/// shortcode of an empty map cell
pub const EMPTY_CELL: &str = "..";

fn definition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\S{2})\s(\d+)").expect("valid regex"))
}

fn shortcode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S{2}").expect("valid regex"))
}

fn tileset_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"))
}

/// Read `<code> <index>` pairs, any number per line. A repeated code
/// overrides the earlier one.
pub fn parse_tileset(s: &str) -> TileDefinitions {
    let mut defs = TileDefinitions::new();
    for line in s.lines() {
        for cap in definition_re().captures_iter(line) {
            let Ok(index) = cap[2].parse::<usize>() else {
                warn!("tile index '{}' out of range", &cap[2]);
                continue;
            };
            if defs.insert(cap[1].to_string(), index).is_some() {
                warn!("Already tile defined with id '{}', overriding.", &cap[1]);
            }
        }
    }
    defs
}

/// Grid of shortcodes, rows may be ragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapTemplate {
    /// length of the longest row
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<String>>,
}

/// Split a map template into shortcodes. Codes missing from `defs` are
/// kept but reported.
pub fn parse_map_template(s: &str, defs: &TileDefinitions) -> MapTemplate {
    let rows: Vec<Vec<String>> = s
        .trim()
        .lines()
        .map(|line| {
            shortcode_re()
                .find_iter(line)
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .collect();
    for code in rows.iter().flatten().unique() {
        if code != EMPTY_CELL && !defs.contains_key(code) {
            warn!("Unknown tile '{}' in map", code);
        }
    }
    MapTemplate {
        width: rows.iter().map(|r| r.len()).max().unwrap_or(0),
        height: rows.len(),
        rows,
    }
}

impl MapTemplate {
    /// Turn shortcodes into tile indices; empty and unknown cells and the
    /// padding of short rows become None.
    pub fn resolve(&self, defs: &TileDefinitions) -> TileMap {
        let mut cells = vec![None; self.width * self.height];
        for (row, codes) in self.rows.iter().enumerate() {
            for (col, code) in codes.iter().enumerate() {
                cells[row * self.width + col] = defs.get(code).copied();
            }
        }
        TileMap::new(self.width, self.height, cells)
    }
}

/// Row-major grid of optional tile indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    pub width: usize,
    pub height: usize,
    cells: Vec<Option<usize>>,
}

impl TileMap {
    /// `cells` is cut or padded to width * height
    pub fn new(width: usize, height: usize, mut cells: Vec<Option<usize>>) -> Self {
        cells.resize(width * height, None);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn get(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells[row * self.width + col]
    }

    /// (col, row, tile index) of every non-empty cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.height)
            .cartesian_product(0..self.width)
            .filter_map(|(row, col)| self.get(col, row).map(|i| (col, row, i)))
    }
}

/// Tileset ids double as file names: letters, digits, '_' and '-' only.
pub fn is_valid_tileset_id(id: &str) -> bool {
    tileset_id_re().is_match(id)
}

// BearPixel
// copyright bear_pixel developers 2025

//! # Tileset tool
//!
//! ```bash
//! tileset slice assets/tiles.png --tile-size 8
//! tileset parse assets/level.tileset assets/level.map
//! tileset check-id my_tileset
//! tileset save my_tileset doc.json --data-dir data
//! ```

use bear_pixel::{
    asset::load_png_tiles,
    log::{init_log, level_from_str},
    tileset::{is_valid_tileset_id, parse_map_template, parse_tileset, store::TilesetStore},
};
use clap::{Parser, Subcommand};
use log::info;
use std::{error::Error, fs, path::PathBuf, process};

#[derive(Parser)]
#[command(name = "tileset", about = "bear_pixel tileset tool")]
struct Cli {
    /// log level written to log/tileset.log
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// slice a png spritesheet and print tile statistics
    Slice {
        image: PathBuf,
        #[arg(short, long, default_value_t = 8)]
        tile_size: usize,
    },
    /// resolve a map template against tileset definitions
    Parse { tileset: PathBuf, map: PathBuf },
    /// check a tileset id
    CheckId { id: String },
    /// store a json tileset document
    Save {
        name: String,
        file: PathBuf,
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Slice { image, tile_size } => {
            let t = load_png_tiles(&image, tile_size)?;
            let empty = t
                .tiles
                .iter()
                .filter(|tile| tile.chunks(4).all(|p| p[3] == 0))
                .count();
            println!(
                "{}: {} tiles ({} cols x {} rows, {}px), {} fully transparent",
                image.display(),
                t.tiles.len(),
                t.tile_cols,
                t.tile_rows(),
                t.tile_size,
                empty
            );
        }
        Command::Parse { tileset, map } => {
            let defs = parse_tileset(&fs::read_to_string(&tileset)?);
            let tmpl = parse_map_template(&fs::read_to_string(&map)?, &defs);
            let tiles = tmpl.resolve(&defs);
            println!("{} definitions, map {}x{}", defs.len(), tiles.width, tiles.height);
            for row in 0..tiles.height {
                let line: Vec<String> = (0..tiles.width)
                    .map(|col| match tiles.get(col, row) {
                        Some(i) => format!("{:4}", i),
                        None => "   .".to_string(),
                    })
                    .collect();
                println!("{}", line.join(""));
            }
        }
        Command::CheckId { id } => {
            if !is_valid_tileset_id(&id) {
                return Err(format!("'{}' is not a valid tileset id", id).into());
            }
            println!("'{}' ok", id);
        }
        Command::Save {
            name,
            file,
            data_dir,
        } => {
            let data: serde_json::Value = serde_json::from_str(&fs::read_to_string(&file)?)?;
            let path = TilesetStore::new(data_dir).save(&name, &data)?;
            println!("Tileset \"{}\" saved successfully to {}", name, path.display());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = init_log(level_from_str(&cli.log_level), "log/tileset.log") {
        eprintln!("log init failed: {}", e);
    }
    info!("tileset tool start...");
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

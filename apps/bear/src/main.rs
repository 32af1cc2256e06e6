// BearPixel
// copyright bear_pixel developers 2025

//! Demo game: a bear (WASD) on a walled meadow, arrow keys scroll the
//! camera, Esc or q quits.
//!
//! cargo run -p bear [path/to/bear.toml]

use bear_pixel::{
    asset::{Resource, TileResource},
    game::{Game, IntervalScheduler, LAYER_OBJ},
    get_game_config, init_game_config,
    log::{init_log, level_from_str},
    render::{adapter::cross::CrosstermSurface, Color},
    scene::{
        camera::Camera,
        object::{Group, Node, TileSprite},
        player::Player,
    },
    GameConfig,
};
use log::{error, info};
use std::{env, error::Error, path::Path};

const TILE: usize = 8;
const COLS: usize = 4;

/// Tileset drawn in code, 4 x 2 tiles:
/// 0 1 = bear head, 4 5 = bear body, 2 grass, 3 wall, 6 flower, 7 empty.
fn demo_tiles() -> TileResource {
    let (w, h) = (COLS * TILE, 2 * TILE);
    let mut data = vec![0u8; w * h * 4];
    let fur = Color::rgb(0x8b, 0x5a, 0x2b);
    let dark = Color::rgb(0x2b, 0x1a, 0x0b);
    let grass = Color::rgb(0x4c, 0x9a, 0x2a);
    let stone = Color::rgb(0x80, 0x80, 0x80);
    let petal = Color::rgb(0xf0, 0xe0, 0x40);
    let mut put = |x: usize, y: usize, c: Color| {
        let i = (y * w + x) * 4;
        data[i..i + 4].copy_from_slice(&c.to_array());
    };
    for y in 0..h {
        for x in 0..w {
            let (tx, ty) = (x / TILE, y / TILE);
            let (lx, ly) = (x % TILE, y % TILE);
            match (tx, ty) {
                // bear: 16x16 sprite over tiles 0,1,4,5
                (0 | 1, _) => {
                    let (bx, by) = (x as i32 - 8, y as i32 - 8);
                    let ears = by < -4 && (bx.abs() - 5).abs() <= 1;
                    let body = bx * bx + by * by <= 48;
                    if ears || body {
                        let eye = by == -2 && bx.abs() == 3;
                        let nose = by == 1 && bx.abs() <= 1;
                        put(x, y, if eye || nose { dark } else { fur });
                    }
                }
                (2, 0) => put(x, y, if (lx * 3 + ly * 5) % 7 == 0 { fur } else { grass }),
                (3, 0) => put(x, y, if ly % 4 == 3 || (lx + (ly / 4) * 4) % 8 == 0 { dark } else { stone }),
                (2, 1) => {
                    let d = (lx as i32 - 3).abs() + (ly as i32 - 3).abs();
                    put(x, y, if d <= 1 { petal } else { grass });
                }
                _ => {}
            }
        }
    }
    TileResource::from_rgba(w, h, &data, TILE)
}

fn run() -> Result<(), Box<dyn Error>> {
    let cfg_path = env::args().nth(1).unwrap_or_else(|| "apps/bear/bear.toml".to_string());
    let cfg_path = Path::new(&cfg_path);
    let config = if cfg_path.exists() {
        GameConfig::load(cfg_path)?
    } else {
        GameConfig::default()
    };
    let base_dir = cfg_path.parent().unwrap_or(Path::new(".")).to_path_buf();
    init_game_config(config);
    let config = get_game_config();
    if let Err(e) = init_log(level_from_str(&config.log_level), &config.log_file) {
        eprintln!("log init failed: {}", e);
    }
    info!("config loaded from {}", cfg_path.display());

    let surface = CrosstermSurface::new(config.width, config.height)?;
    let mut g = Game::new(config, Box::new(surface));
    g.renderer.load_resource(Resource::tileset("tiles", demo_tiles()));
    g.load_resources(config, &base_dir)?;

    let (w, h) = (config.width as f64, config.height as f64);
    // a few flowers over the meadow, drawn by components
    let flowers = [(40.0, 32.0), (112.0, 96.0), (64.0, 112.0)]
        .iter()
        .fold(Node::new(), |n, (x, y)| {
            n.with_component(TileSprite::new(LAYER_OBJ, "tiles", 6, *x, *y))
        });
    g.scene.add_child(Group::with_node(flowers));
    g.scene.add_child(Player::new(w / 2.0, h / 2.0, 0.1, "tiles"));
    let cam = g.scene.add_child(Camera::default());
    g.scene.set_camera(cam)?;

    g.run(&mut IntervalScheduler::new(config.frame_rate))?;
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("bear stopped: {}", e);
        eprintln!("bear stopped: {}", e);
        std::process::exit(1);
    }
}

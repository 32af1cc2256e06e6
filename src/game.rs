// BearPixel
// copyright bear_pixel developers 2025

//! Game owns the Context, the Renderer and the main Scene and runs the
//! variable-timestep loop.
//!
//! The loop is driven by a `FrameScheduler`, the stand-in for the display
//! refresh callback: each call returns the timestamp (ms) of the next frame,
//! or None to stop. Every frame then is
//!
//! ```text
//! dt = (now - last, or BOOTSTRAP_DT on the first frame) * time_scale
//! refresh input snapshot -> scene.update(dt) -> scene.draw(dt)
//! ```
//!
//! There is no fixed-timestep accumulator and no frame skipping, movement
//! scales with dt.
//!
//! # Example
//!
//! ```no_run
//! use bear_pixel::{game::{Game, IntervalScheduler}, render::MemorySurface, GameConfig};
//!
//! let config = GameConfig::default();
//! let surface = MemorySurface::new(config.width, config.height);
//! let mut g = Game::new(&config, Box::new(surface));
//! g.load_resources(&config, std::path::Path::new(".")).unwrap();
//! g.run(&mut IntervalScheduler::new(config.frame_rate)).unwrap();
//! ```

use crate::{
    asset::{self, AssetError},
    context::Context,
    init::GameConfig,
    render::{adapter::Surface, RenderError, RenderMode, Renderer},
    scene::{object::NodeId, Scene},
    tileset,
};
use log::{error, info};
use std::{
    collections::VecDeque,
    fmt, fs, io,
    path::Path,
    thread,
    time::{Duration, Instant},
};

/// dt reported for the very first frame, one 60Hz frame
pub const BOOTSTRAP_DT: f64 = 1000.0 / 60.0;

/// camera-relative tile layer
pub const LAYER_BG: &str = "bg";
/// camera-relative object layer
pub const LAYER_OBJ: &str = "obj";
/// screen-fixed HUD layer
pub const LAYER_UI: &str = "ui";

#[derive(Debug)]
pub enum GameError {
    Render(RenderError),
    Asset(AssetError),
    Io(io::Error),
    UnknownNode(NodeId),
    Config(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Render(e) => write!(f, "render: {}", e),
            GameError::Asset(e) => write!(f, "asset: {}", e),
            GameError::Io(e) => write!(f, "io: {}", e),
            GameError::UnknownNode(id) => write!(f, "unknown node {:?}", id),
            GameError::Config(msg) => write!(f, "config: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<RenderError> for GameError {
    fn from(e: RenderError) -> Self {
        GameError::Render(e)
    }
}

impl From<AssetError> for GameError {
    fn from(e: AssetError) -> Self {
        GameError::Asset(e)
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}

/// Source of frame timestamps in ms, None ends the loop.
pub trait FrameScheduler {
    fn request_next_frame(&mut self) -> Option<f64>;
}

/// Hands out a fixed list of timestamps, for tests and replays.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    frames: VecDeque<f64>,
}

impl ManualScheduler {
    pub fn new<I: IntoIterator<Item = f64>>(frames: I) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, now: f64) {
        self.frames.push_back(now);
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_next_frame(&mut self) -> Option<f64> {
        self.frames.pop_front()
    }
}

/// Sleeps until the next frame slot at a fixed rate, runs forever.
pub struct IntervalScheduler {
    start: Instant,
    next: Instant,
    tick_rate: Duration,
}

impl IntervalScheduler {
    pub fn new(frame_rate: u32) -> Self {
        let now = Instant::now();
        Self {
            start: now,
            next: now,
            tick_rate: Duration::from_nanos(1_000_000_000 / frame_rate.max(1) as u64),
        }
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_next_frame(&mut self) -> Option<f64> {
        let now = Instant::now();
        if let Some(wait) = self.next.checked_duration_since(now) {
            thread::sleep(wait);
        }
        // late frames don't pile up
        self.next = Instant::now().max(self.next) + self.tick_rate;
        Some(self.start.elapsed().as_secs_f64() * 1000.0)
    }
}

pub struct Game {
    pub context: Context,
    pub renderer: Renderer,
    pub scene: Scene,
    last_frame: Option<f64>,
}

impl Game {
    /// Set up the renderer on `surface` with the bg / obj / ui layers and
    /// the configured background and palette.
    pub fn new(config: &GameConfig, surface: Box<dyn Surface>) -> Self {
        let (w, h) = surface.size();
        let mode = if config.pixel_mode {
            RenderMode::Pixel
        } else {
            RenderMode::Normal
        };
        let mut renderer = Renderer::new(surface, mode);
        renderer.background = config.background;
        renderer.add_layer(LAYER_BG, 0);
        renderer.add_layer(LAYER_OBJ, 10);
        renderer.add_layer(LAYER_UI, 20);
        renderer.set_palette(config.palette());
        let mut context = Context::new(&config.game_name, w, h);
        context.time_scale = config.time_scale;
        info!("{}(bear_pixel) start...{}x{}", config.game_name, w, h);
        Self {
            context,
            renderer,
            scene: Scene::new(config.fps_interval),
            last_frame: None,
        }
    }

    /// Load every configured resource and the optional background map.
    /// Paths are relative to `base_dir`.
    pub fn load_resources(&mut self, config: &GameConfig, base_dir: &Path) -> Result<(), GameError> {
        for desc in &config.resources {
            let r = asset::load_resource(desc, base_dir)?;
            self.renderer.load_resource(r);
        }
        if let Some(map) = &config.map {
            let defs = tileset::parse_tileset(&fs::read_to_string(base_dir.join(&map.definitions))?);
            let template = tileset::parse_map_template(
                &fs::read_to_string(base_dir.join(&map.template))?,
                &defs,
            );
            let tiles = template.resolve(&defs);
            info!(
                "background map {}x{} on tileset '{}'",
                tiles.width, tiles.height, map.tileset
            );
            self.scene.set_background(&map.tileset, tiles);
        }
        Ok(())
    }

    /// Run one frame stamped `now` (ms) and return its dt.
    pub fn tick(&mut self, now: f64) -> Result<f64, GameError> {
        let raw = match self.last_frame {
            // a clock running backwards gives dt 0
            Some(last) => (now - last).max(0.0),
            None => BOOTSTRAP_DT,
        };
        self.last_frame = Some(now);
        let dt = raw * self.context.time_scale;
        self.context.elapsed += dt;
        self.step(dt)?;
        Ok(dt)
    }

    /// update then draw with an explicit dt
    pub fn step(&mut self, dt: f64) -> Result<(), GameError> {
        self.context.stage += 1;
        self.context.refresh_input();
        self.scene.update(&self.context, dt);
        self.scene.draw(&self.context, &mut self.renderer, dt)?;
        Ok(())
    }

    /// Main loop. Ends when the scheduler runs dry or the surface asks to
    /// quit; a failing frame stops the loop and is returned.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), GameError> {
        info!("Begin run...");
        while let Some(now) = scheduler.request_next_frame() {
            if self
                .renderer
                .surface_mut()
                .poll_events(&mut self.context.input_events)
            {
                info!("quit requested");
                break;
            }
            if let Err(e) = self.tick(now) {
                error!("frame {} failed, stopping: {}", self.context.stage, e);
                return Err(e);
            }
        }
        Ok(())
    }
}

// BearPixel
// copyright bear_pixel developers 2025

//! Scene graph.
//!
//! The scene owns its game objects in an arena (`Vec<Box<dyn GameObject>>`)
//! addressed by `NodeId`. Roots are kept in registration order; both update
//! and draw walk the forest depth-first, pre-order, roots in order.
//!
//! One call to `draw` produces a whole frame:
//!
//! 1. camera offset `round(-camera.position)` onto the camera-relative layers
//! 2. `clear` + `read_pixels`
//! 3. HUD (dt, average and immediate fps) onto the screen-fixed layer
//! 4. background tile map onto the bg layer
//! 5. every node's draw, pre-order
//! 6. `draw_layers`, palette pass, `flush`

pub mod camera;
pub mod object;
pub mod player;

use crate::{
    context::Context,
    game::{GameError, LAYER_BG, LAYER_OBJ, LAYER_UI},
    render::{renderer::round_px, Color, DrawCommand, RenderError, Renderer, TextCommand, DEFAULT_FONT},
    tileset::TileMap,
};
use object::{GameObject, NodeId};

struct Background {
    tileset: String,
    map: TileMap,
}

pub struct Scene {
    nodes: Vec<Box<dyn GameObject>>,
    roots: Vec<NodeId>,
    camera: Option<NodeId>,
    background: Option<Background>,
    fps: f64,
    frame_count: u32,
    frame_count_time: f64,
    fps_interval: f64,
    pub show_hud: bool,
    pub hud_color: Color,
    pub hud_shadow: Color,
}

impl Scene {
    pub fn new(fps_interval: f64) -> Self {
        Self {
            nodes: vec![],
            roots: vec![],
            camera: None,
            background: None,
            fps: 0.0,
            frame_count: 0,
            frame_count_time: 0.0,
            fps_interval,
            show_hud: true,
            hud_color: Color::rgb(0xaa, 0xaa, 0xaa),
            hud_shadow: Color::BLACK,
        }
    }

    fn attach(&mut self, mut obj: Box<dyn GameObject>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let node = obj.node_mut();
        node.id = Some(id);
        node.parent = parent;
        self.nodes.push(obj);
        id
    }

    /// Attach a new root.
    pub fn add_child(&mut self, obj: impl GameObject + 'static) -> NodeId {
        let id = self.attach(Box::new(obj), None);
        self.roots.push(id);
        id
    }

    /// Attach under an existing node.
    pub fn add_child_to(&mut self, parent: NodeId, obj: impl GameObject + 'static) -> Result<NodeId, GameError> {
        if parent.0 >= self.nodes.len() {
            return Err(GameError::UnknownNode(parent));
        }
        let id = self.attach(Box::new(obj), Some(parent));
        self.nodes[parent.0].node_mut().children.push(id);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&dyn GameObject> {
        self.nodes.get(id.0).map(|n| n.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut (dyn GameObject + 'static)> {
        self.nodes.get_mut(id.0).map(|n| n.as_mut())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Use a node's position as the camera.
    pub fn set_camera(&mut self, id: NodeId) -> Result<(), GameError> {
        if id.0 >= self.nodes.len() {
            return Err(GameError::UnknownNode(id));
        }
        self.camera = Some(id);
        Ok(())
    }

    pub fn set_background(&mut self, tileset: &str, map: TileMap) {
        self.background = Some(Background {
            tileset: tileset.to_string(),
            map,
        });
    }

    /// offset applied to camera-relative layers, (0, 0) without a camera
    pub fn camera_offset(&self) -> (f64, f64) {
        match self.camera.and_then(|id| self.get(id)) {
            Some(c) => {
                let (x, y) = c.position();
                (round_px(-x) as f64, round_px(-y) as f64)
            }
            None => (0.0, 0.0),
        }
    }

    /// pre-order node ids, roots in registration order
    pub fn traversal(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        for root in &self.roots {
            let mut stack = vec![*root];
            while let Some(id) = stack.pop() {
                order.push(id);
                stack.extend(self.nodes[id.0].node().children.iter().rev());
            }
        }
        order
    }

    pub fn update(&mut self, ctx: &Context, dt: f64) {
        for id in self.traversal() {
            self.nodes[id.0].update(ctx, dt);
        }
    }

    /// Produce one frame. A failing frame leaves no queued command behind.
    pub fn draw(&mut self, ctx: &Context, r: &mut Renderer, dt: f64) -> Result<(), RenderError> {
        let res = self.draw_frame(ctx, r, dt);
        if res.is_err() {
            r.discard_layers();
        }
        res
    }

    fn draw_frame(&mut self, ctx: &Context, r: &mut Renderer, dt: f64) -> Result<(), RenderError> {
        let (ox, oy) = self.camera_offset();
        r.set_layer_offset(LAYER_BG, ox, oy)?;
        r.set_layer_offset(LAYER_OBJ, ox, oy)?;

        r.clear();
        r.read_pixels();

        let fps_average = self.fps_average(dt);
        if self.show_hud {
            let fps_immediate = if dt > 0.0 { 1000.0 / dt } else { 0.0 };
            let lines = [
                format!("dt: {:.2}ms", dt),
                format!("fps: {:.2} ({:.2})", fps_average, fps_immediate),
            ];
            for (i, text) in lines.iter().enumerate() {
                let t = TextCommand::new(DEFAULT_FONT, text, 4.0, (i * 8) as f64, self.hud_color)
                    .shadow(self.hud_shadow);
                r.enqueue(LAYER_UI, t)?;
            }
        }

        if let Some(bg) = &self.background {
            let ts = r
                .tileset(&bg.tileset)
                .ok_or_else(|| RenderError::UnknownTileset(bg.tileset.clone()))?
                .tile_size as f64;
            for (col, row, index) in bg.map.cells() {
                let cmd = DrawCommand::tile(&bg.tileset, index, col as f64 * ts, row as f64 * ts);
                r.enqueue(LAYER_BG, cmd)?;
            }
        }

        for id in self.traversal() {
            self.nodes[id.0].draw(ctx, r, dt)?;
        }

        r.draw_layers()?;
        r.apply_active_palette();
        r.flush()
    }

    /// Rolling FPS: the value only changes once the accumulated time reaches
    /// the interval, the leftover time is carried into the next window.
    pub fn fps_average(&mut self, dt: f64) -> f64 {
        self.frame_count += 1;
        self.frame_count_time += dt;
        if self.frame_count_time < self.fps_interval {
            return self.fps;
        }
        self.fps = self.frame_count as f64 / self.frame_count_time * 1000.0;
        self.frame_count = 0;
        self.frame_count_time %= self.fps_interval;
        self.fps
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

// BearPixel
// copyright bear_pixel developers 2025

//! Game objects.
//!
//! Every object embeds a `Node` by value: its handle in the scene arena,
//! parent and children handles, and its components. Objects never hold a
//! reference to the scene or the game; they get the `Context` passed into
//! update and draw instead.

use crate::{
    context::Context,
    render::{DrawCommand, RenderError, Renderer},
};

/// handle of a node in the scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Behavior attached to a node, run before the node's own logic.
pub trait Component {
    fn update(&mut self, _ctx: &Context, _dt: f64) {}

    fn draw(&mut self, _ctx: &Context, _r: &mut Renderer, _dt: f64) -> Result<(), RenderError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct Node {
    /// set by the scene when the object is attached
    pub id: Option<NodeId>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub components: Vec<Box<dyn Component>>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, c: impl Component + 'static) -> Self {
        self.components.push(Box::new(c));
        self
    }

    pub fn update_components(&mut self, ctx: &Context, dt: f64) {
        for c in self.components.iter_mut() {
            c.update(ctx, dt);
        }
    }

    pub fn draw_components(&mut self, ctx: &Context, r: &mut Renderer, dt: f64) -> Result<(), RenderError> {
        for c in self.components.iter_mut() {
            c.draw(ctx, r, dt)?;
        }
        Ok(())
    }
}

/// Capability interface of everything in the scene graph.
/// The default update / draw just run the components.
pub trait GameObject {
    fn node(&self) -> &Node;

    fn node_mut(&mut self) -> &mut Node;

    fn update(&mut self, ctx: &Context, dt: f64) {
        self.node_mut().update_components(ctx, dt);
    }

    fn draw(&mut self, ctx: &Context, r: &mut Renderer, dt: f64) -> Result<(), RenderError> {
        self.node_mut().draw_components(ctx, r, dt)
    }

    /// world position in pixels
    fn position(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
}

/// Plain node that only carries components and children.
#[derive(Default)]
pub struct Group {
    pub node: Node,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(node: Node) -> Self {
        Self { node }
    }
}

impl GameObject for Group {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }
}

/// Component that draws a fixed tile sprite (w x h tiles) on a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSprite {
    pub layer: String,
    pub tileset: String,
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub w: usize,
    pub h: usize,
}

impl TileSprite {
    pub fn new(layer: &str, tileset: &str, index: usize, x: f64, y: f64) -> Self {
        Self {
            layer: layer.to_string(),
            tileset: tileset.to_string(),
            index,
            x,
            y,
            w: 1,
            h: 1,
        }
    }

    pub fn size(mut self, w: usize, h: usize) -> Self {
        self.w = w;
        self.h = h;
        self
    }
}

impl Component for TileSprite {
    fn draw(&mut self, _ctx: &Context, r: &mut Renderer, _dt: f64) -> Result<(), RenderError> {
        let cmd = if self.w == 1 && self.h == 1 {
            DrawCommand::tile(&self.tileset, self.index, self.x, self.y)
        } else {
            DrawCommand::multi_tile(&self.tileset, self.index, self.x, self.y, self.w, self.h)
        };
        r.enqueue(&self.layer, cmd)
    }
}

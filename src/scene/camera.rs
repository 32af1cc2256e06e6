// BearPixel
// copyright bear_pixel developers 2025

use crate::{
    context::Context,
    event::KeyCode,
    scene::object::{GameObject, Node},
};

/// Free camera moved with the arrow keys, speed in px per ms.
/// Register it with `Scene::set_camera` to scroll the camera-relative layers.
pub struct Camera {
    pub node: Node,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl Camera {
    pub fn new(x: f64, y: f64, speed: f64) -> Self {
        Self {
            node: Node::new(),
            x,
            y,
            speed,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.1)
    }
}

impl GameObject for Camera {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn update(&mut self, ctx: &Context, dt: f64) {
        self.node.update_components(ctx, dt);
        self.x += ctx.input.axis(KeyCode::Left, KeyCode::Right) * self.speed * dt;
        self.y += ctx.input.axis(KeyCode::Up, KeyCode::Down) * self.speed * dt;
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

// BearPixel
// copyright bear_pixel developers 2025

use crate::{
    context::Context,
    event::KeyCode,
    game::LAYER_OBJ,
    render::{DrawCommand, RenderError, Renderer},
    scene::object::{GameObject, Node},
};

/// The player: WASD movement in px per ms, kept inside the screen, drawn
/// as a 2x2 tile sprite centered on its position.
pub struct Player {
    pub node: Node,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub tileset: String,
    /// top-left tile of the 2x2 sprite
    pub sprite: usize,
}

impl Player {
    pub fn new(x: f64, y: f64, speed: f64, tileset: &str) -> Self {
        Self {
            node: Node::new(),
            x,
            y,
            speed,
            tileset: tileset.to_string(),
            sprite: 0,
        }
    }
}

impl GameObject for Player {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn update(&mut self, ctx: &Context, dt: f64) {
        self.node.update_components(ctx, dt);
        let input = &ctx.input;
        self.x += input.axis(KeyCode::Char('a'), KeyCode::Char('d')) * self.speed * dt;
        self.y += input.axis(KeyCode::Char('w'), KeyCode::Char('s')) * self.speed * dt;
        self.x = self.x.clamp(0.0, ctx.width.saturating_sub(1) as f64);
        self.y = self.y.clamp(0.0, ctx.height.saturating_sub(1) as f64);
    }

    fn draw(&mut self, ctx: &Context, r: &mut Renderer, dt: f64) -> Result<(), RenderError> {
        self.node.draw_components(ctx, r, dt)?;
        let cmd = DrawCommand::multi_tile(&self.tileset, self.sprite, self.x - 8.0, self.y - 8.0, 2, 2);
        r.enqueue(LAYER_OBJ, cmd)
    }

    fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn wasd_moves_and_clamps() {
        let mut ctx = Context::new("t", 160, 144);
        let mut p = Player::new(80.0, 72.0, 0.1, "tiles");
        ctx.input.apply(&[Event::KeyDown(KeyCode::Char('D'))]);
        p.update(&ctx, 100.0);
        assert_eq!(p.position(), (90.0, 72.0));
        p.update(&ctx, 10_000.0);
        assert_eq!(p.position(), (159.0, 72.0));
        ctx.input.apply(&[
            Event::KeyUp(KeyCode::Char('d')),
            Event::KeyDown(KeyCode::Char('w')),
        ]);
        p.update(&ctx, 10_000.0);
        assert_eq!(p.position(), (159.0, 0.0));
    }
}

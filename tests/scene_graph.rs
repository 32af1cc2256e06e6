// BearPixel
// copyright bear_pixel developers 2025

use bear_pixel::{
    asset::{Resource, TileResource},
    context::Context,
    event::{Event, KeyCode},
    game::{Game, ManualScheduler, BOOTSTRAP_DT, LAYER_OBJ, LAYER_UI},
    render::{Color, MemorySurface, RenderError, Renderer},
    scene::{
        camera::Camera,
        object::{Component, GameObject, Group, Node, TileSprite},
        player::Player,
        Scene,
    },
    tileset::{parse_map_template, parse_tileset},
    GameConfig,
};
use std::{cell::RefCell, rc::Rc};

type Log = Rc<RefCell<Vec<String>>>;

struct Recorder {
    node: Node,
    name: &'static str,
    log: Log,
}

impl Recorder {
    fn new(name: &'static str, log: &Log) -> Self {
        Self {
            node: Node::new(),
            name,
            log: log.clone(),
        }
    }
}

impl GameObject for Recorder {
    fn node(&self) -> &Node {
        &self.node
    }

    fn node_mut(&mut self) -> &mut Node {
        &mut self.node
    }

    fn update(&mut self, ctx: &Context, dt: f64) {
        self.node.update_components(ctx, dt);
        self.log.borrow_mut().push(format!("update {}", self.name));
    }

    fn draw(&mut self, _ctx: &Context, _r: &mut Renderer, _dt: f64) -> Result<(), RenderError> {
        self.log.borrow_mut().push(format!("draw {}", self.name));
        Ok(())
    }
}

struct Tick(Log);

impl Component for Tick {
    fn update(&mut self, _ctx: &Context, _dt: f64) {
        self.0.borrow_mut().push("component".to_string());
    }
}

fn game() -> Game {
    let c = GameConfig::default();
    Game::new(&c, Box::new(MemorySurface::new(c.width, c.height)))
}

fn px(g: &Game, x: usize, y: usize) -> [u8; 4] {
    let mut out = vec![0u8; 160 * 144 * 4];
    g.renderer.surface().get_image_data(&mut out);
    let i = (y * 160 + x) * 4;
    [out[i], out[i + 1], out[i + 2], out[i + 3]]
}

#[test]
fn update_and_draw_are_pre_order() {
    let log: Log = Rc::default();
    let mut g = game();
    let a = g.scene.add_child(Recorder::new("A", &log));
    g.scene.add_child(Recorder::new("B", &log));
    g.scene.add_child_to(a, Recorder::new("C", &log)).unwrap();

    g.tick(0.0).unwrap();
    assert_eq!(
        *log.borrow(),
        vec!["update A", "update C", "update B", "draw A", "draw C", "draw B"]
    );
}

#[test]
fn components_run_before_node() {
    let log: Log = Rc::default();
    let mut scene = Scene::new(200.0);
    scene.add_child(Group::with_node(Node::new().with_component(Tick(log.clone()))));
    scene.add_child(Recorder::new("R", &log));
    scene.update(&Context::new("t", 160, 144), 16.0);
    assert_eq!(*log.borrow(), vec!["component", "update R"]);
}

#[test]
fn fps_changes_only_at_interval() {
    let mut s = Scene::new(200.0);
    let mut seen = vec![];
    let mut t = 0.0;
    while t < 300.0 {
        t += 16.0;
        seen.push((t, s.fps_average(16.0)));
    }
    for (t, fps) in &seen {
        if *t < 208.0 {
            assert_eq!(*fps, 0.0, "at {}", t);
        } else {
            assert_eq!(*fps, 13.0 / 208.0 * 1000.0, "at {}", t);
        }
    }
}

#[test]
fn first_frame_uses_bootstrap_dt() {
    let mut g = game();
    let dt = g.tick(123_456.0).unwrap();
    assert_eq!(dt, BOOTSTRAP_DT);
    assert!(dt > 16.0 && dt < 17.0);
    assert_eq!(g.tick(123_472.0).unwrap(), 16.0);
}

#[test]
fn camera_offset_rounds_negated_position() {
    let mut s = Scene::new(200.0);
    assert_eq!(s.camera_offset(), (0.0, 0.0));
    let cam = s.add_child(Camera::new(10.4, -3.6, 0.1));
    s.set_camera(cam).unwrap();
    assert_eq!(s.camera_offset(), (-10.0, 4.0));
}

#[test]
fn camera_moves_world_layers_not_hud() {
    let mut g = game();
    let red = Color::RED.to_array().repeat(64);
    g.renderer.load_resource(Resource::tileset(
        "tiles",
        TileResource {
            tile_size: 8,
            tile_cols: 2,
            tiles: vec![red; 4],
        },
    ));
    g.scene.add_child(Player::new(80.0, 72.0, 0.1, "tiles"));
    let cam = g.scene.add_child(Camera::new(8.0, 0.0, 0.1));
    g.scene.set_camera(cam).unwrap();
    g.tick(0.0).unwrap();

    let bg = [0x22, 0x22, 0x22, 255];
    // sprite spans (72..88, 64..80) in the world, shifted 8px left
    assert_eq!(px(&g, 64, 64), [255, 0, 0, 255]);
    assert_eq!(px(&g, 79, 79), [255, 0, 0, 255]);
    assert_eq!(px(&g, 63, 64), bg);
    assert_eq!(px(&g, 80, 64), bg);
    // HUD 'd' of "dt:" stays at x=4, first line 5px down
    assert_eq!(px(&g, 4, 5), [0xaa, 0xaa, 0xaa, 255]);
}

#[test]
fn background_map_follows_camera() {
    let mut g = game();
    let (red, blue) = (Color::RED, Color::rgb(0, 0, 255));
    g.renderer.load_resource(Resource::tileset(
        "land",
        TileResource {
            tile_size: 8,
            tile_cols: 2,
            tiles: vec![red.to_array().repeat(64), blue.to_array().repeat(64)],
        },
    ));
    let defs = parse_tileset("rd 0  bl 1");
    let map = parse_map_template("rd..bl\n..blrd\n", &defs).resolve(&defs);
    g.scene.set_background("land", map);
    // offset round(40.4), round(39.6) = (40, 40)
    let cam = g.scene.add_child(Camera::new(-40.4, -39.6, 0.1));
    g.scene.set_camera(cam).unwrap();
    g.tick(0.0).unwrap();

    let bg = [0x22, 0x22, 0x22, 255];
    let cell = |col: usize, row: usize| (col * 8 + 40, row * 8 + 40);
    for (col, row, want) in [
        (0, 0, Some(red)),
        (1, 0, None),
        (2, 0, Some(blue)),
        (0, 1, None),
        (1, 1, Some(blue)),
        (2, 1, Some(red)),
    ] {
        let (x, y) = cell(col, row);
        let want = want.map(|c| c.to_array()).unwrap_or(bg);
        assert_eq!(px(&g, x, y), want, "cell {},{}", col, row);
        assert_eq!(px(&g, x + 7, y + 7), want, "cell {},{}", col, row);
    }
    assert_eq!(px(&g, 39, 40), bg);
    assert_eq!(px(&g, 64, 40), bg);
}

#[test]
fn tile_sprite_component_draws_through_its_group() {
    let mut g = game();
    let red = Color::RED.to_array().repeat(4);
    let blue = Color::rgb(0, 0, 255).to_array().repeat(4);
    g.renderer.load_resource(Resource::tileset(
        "deco",
        TileResource {
            tile_size: 2,
            tile_cols: 2,
            tiles: vec![red.clone(), blue.clone(), blue, red],
        },
    ));
    let node = Node::new()
        .with_component(TileSprite::new(LAYER_OBJ, "deco", 1, 100.0, 100.0))
        .with_component(TileSprite::new(LAYER_UI, "deco", 0, 120.0, 100.0).size(2, 2));
    g.scene.add_child(Group::with_node(node));
    let cam = g.scene.add_child(Camera::new(10.0, 0.0, 0.1));
    g.scene.set_camera(cam).unwrap();
    g.tick(0.0).unwrap();

    let bg = [0x22, 0x22, 0x22, 255];
    // single tile on the world layer, moved by the camera
    assert_eq!(px(&g, 90, 100), [0, 0, 255, 255]);
    assert_eq!(px(&g, 100, 100), bg);
    // 2x2 block on the HUD layer stays put
    assert_eq!(px(&g, 120, 100), [255, 0, 0, 255]);
    assert_eq!(px(&g, 122, 100), [0, 0, 255, 255]);
    assert_eq!(px(&g, 120, 102), [0, 0, 255, 255]);
    assert_eq!(px(&g, 123, 103), [255, 0, 0, 255]);
    assert_eq!(g.renderer.layers().pending(), 0);
}

#[test]
fn input_reaches_player_through_run() {
    let mut g = game();
    g.renderer.load_resource(Resource::tileset(
        "tiles",
        TileResource {
            tile_size: 8,
            tile_cols: 2,
            tiles: vec![vec![0u8; 256]; 4],
        },
    ));
    let p = g.scene.add_child(Player::new(80.0, 72.0, 0.1, "tiles"));
    g.context.input_events.push(Event::KeyDown(KeyCode::Char('s')));
    g.run(&mut ManualScheduler::new([0.0, 100.0])).unwrap();
    let (x, y) = g.scene.get(p).unwrap().position();
    assert_eq!(x, 80.0);
    assert!((y - (72.0 + 0.1 * (BOOTSTRAP_DT + 100.0))).abs() < 1e-9);
}

// BearPixel
// copyright bear_pixel developers 2025

use bear_pixel::{
    asset::{Resource, TileResource},
    render::{Color, DrawCommand, MemorySurface, Palette, RenderMode, Renderer, TextCommand, DEFAULT_FONT},
};

const BG: [u8; 4] = [0x22, 0x22, 0x22, 255];

fn solid_tileset(colors: &[Color], tile_size: usize, tile_cols: usize) -> TileResource {
    TileResource {
        tile_size,
        tile_cols,
        tiles: colors
            .iter()
            .map(|c| c.to_array().repeat(tile_size * tile_size))
            .collect(),
    }
}

fn renderer() -> Renderer {
    let mut r = Renderer::new(Box::new(MemorySurface::new(160, 144)), RenderMode::Pixel);
    r.background = Color::from_hex("#222").unwrap();
    r
}

fn committed(r: &Renderer) -> Vec<u8> {
    let (w, h) = r.size();
    let mut out = vec![0u8; w * h * 4];
    r.surface().get_image_data(&mut out);
    out
}

fn px(data: &[u8], w: usize, x: usize, y: usize) -> [u8; 4] {
    let i = (y * w + x) * 4;
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

fn frame(r: &mut Renderer) {
    r.draw_layers().unwrap();
    r.apply_active_palette();
    r.flush().unwrap();
}

#[test]
fn red_tile_end_to_end() {
    let mut r = renderer();
    r.load_resource(Resource::tileset("t", solid_tileset(&[Color::RED], 8, 1)));
    r.add_layer("bg", 0);
    r.clear();
    r.read_pixels();
    r.enqueue("bg", DrawCommand::tile("t", 0, 0.0, 0.0)).unwrap();
    frame(&mut r);

    let out = committed(&r);
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(px(&out, 160, x, y), [255, 0, 0, 255], "({}, {})", x, y);
        }
    }
    assert_eq!(px(&out, 160, 8, 0), BG);
    assert_eq!(px(&out, 160, 0, 8), BG);
    assert_eq!(r.layers().pending(), 0);
}

#[test]
fn equal_z_breaks_ties_by_id() {
    let colors = [Color::rgb(1, 0, 0), Color::rgb(2, 0, 0), Color::rgb(3, 0, 0)];
    let mut r = renderer();
    r.load_resource(Resource::tileset("t", solid_tileset(&colors, 4, 3)));
    r.add_layer("b", 5);
    r.add_layer("a", 5);
    r.add_layer("c", 1);
    r.clear();
    r.read_pixels();
    // every layer covers (0,0); c also covers (4,0), a also covers (8,0)
    r.enqueue("b", DrawCommand::tile("t", 1, 0.0, 0.0)).unwrap();
    r.enqueue("a", DrawCommand::tile("t", 0, 0.0, 0.0)).unwrap();
    r.enqueue("a", DrawCommand::tile("t", 0, 8.0, 0.0)).unwrap();
    r.enqueue("c", DrawCommand::tile("t", 2, 0.0, 0.0)).unwrap();
    r.enqueue("c", DrawCommand::tile("t", 2, 4.0, 0.0)).unwrap();
    r.enqueue("c", DrawCommand::tile("t", 2, 8.0, 0.0)).unwrap();
    frame(&mut r);

    let out = committed(&r);
    assert_eq!(px(&out, 160, 0, 0), [2, 0, 0, 255]);
    assert_eq!(px(&out, 160, 4, 0), [3, 0, 0, 255]);
    assert_eq!(px(&out, 160, 8, 0), [1, 0, 0, 255]);
}

#[test]
fn fifo_within_layer() {
    let mut r = renderer();
    r.load_resource(Resource::tileset(
        "t",
        solid_tileset(&[Color::RED, Color::WHITE], 4, 2),
    ));
    r.add_layer("obj", 0);
    r.enqueue("obj", DrawCommand::tile("t", 0, 0.0, 0.0)).unwrap();
    r.enqueue("obj", DrawCommand::tile("t", 1, 2.0, 0.0)).unwrap();
    frame(&mut r);
    let out = committed(&r);
    assert_eq!(px(&out, 160, 1, 0), [255, 0, 0, 255]);
    assert_eq!(px(&out, 160, 2, 0), [255, 255, 255, 255]);
}

#[test]
fn layer_offset_matches_control_draw() {
    let ts = solid_tileset(&[Color::RED], 8, 1);

    let mut shifted = renderer();
    shifted.load_resource(Resource::tileset("t", ts.clone()));
    shifted.add_layer("bg", 0);
    shifted.set_layer_offset("bg", -5.0, -5.0).unwrap();
    shifted.clear();
    shifted.read_pixels();
    shifted.enqueue("bg", DrawCommand::tile("t", 0, 10.0, 20.0)).unwrap();
    frame(&mut shifted);

    let mut control = renderer();
    control.load_resource(Resource::tileset("t", ts));
    control.clear();
    control.read_pixels();
    control.draw_tile("t", 0, 5.0, 15.0).unwrap();
    control.flush().unwrap();

    let out = committed(&shifted);
    assert_eq!(out, committed(&control));
    assert_eq!(px(&out, 160, 5, 15), [255, 0, 0, 255]);
    assert_eq!(px(&out, 160, 4, 15), BG);
    assert_eq!(px(&out, 160, 12, 22), [255, 0, 0, 255]);
    assert_eq!(px(&out, 160, 13, 22), BG);
}

#[test]
fn palette_pass_before_flush() {
    let dmg = Palette::dmg();
    let gray = Color::rgb(192, 192, 192);
    let mut r = renderer();
    r.load_resource(Resource::tileset("t", solid_tileset(&[gray], 8, 1)));
    r.add_layer("bg", 0);
    r.set_palette(Some(dmg));
    r.clear();
    r.read_pixels();
    r.enqueue("bg", DrawCommand::tile("t", 0, 0.0, 0.0)).unwrap();
    frame(&mut r);

    let out = committed(&r);
    // (3*192 + 6*192 + 192) >> 3 = 240, not lighter than 240
    assert_eq!(px(&out, 160, 0, 0), dmg.0[1].to_array());
    // #222: (3*34 + 6*34 + 34) >> 3 = 42
    assert_eq!(px(&out, 160, 8, 0), dmg.0[3].to_array());
}

#[test]
fn multi_tile_steps_by_tileset_columns() {
    let colors: Vec<Color> = (0..8u8).map(|i| Color::rgb(i, 0, 0)).collect();
    let mut r = renderer();
    // 4 columns x 2 rows
    r.load_resource(Resource::tileset("t", solid_tileset(&colors, 2, 4)));
    r.add_layer("obj", 0);
    r.enqueue("obj", DrawCommand::multi_tile("t", 1, 10.0, 10.0, 2, 2)).unwrap();
    frame(&mut r);

    let out = committed(&r);
    assert_eq!(px(&out, 160, 10, 10), [1, 0, 0, 255]);
    assert_eq!(px(&out, 160, 12, 10), [2, 0, 0, 255]);
    assert_eq!(px(&out, 160, 10, 12), [5, 0, 0, 255]);
    assert_eq!(px(&out, 160, 13, 13), [6, 0, 0, 255]);
}

#[test]
fn queued_text_keeps_alpha_and_uses_shadow() {
    let mut r = renderer();
    r.add_layer("ui", 20);
    r.clear();
    r.read_pixels();
    let t = TextCommand::new(DEFAULT_FONT, "1", 0.0, 0.0, Color::WHITE).shadow(Color::rgb(9, 9, 9));
    r.enqueue("ui", t).unwrap();
    frame(&mut r);

    let out = committed(&r);
    // '1' rows: 010 110 010 010 111, first line one line-height (5) down
    assert_eq!(px(&out, 160, 1, 5), [255, 255, 255, 255]);
    assert_eq!(px(&out, 160, 0, 5), BG);
    // shadow of row 1 (110) lands on row 2 (010) at x=0
    assert_eq!(px(&out, 160, 0, 7), [9, 9, 9, 255]);
    // bottom row shadow below the text
    assert_eq!(px(&out, 160, 2, 10), [9, 9, 9, 255]);
}

#[test]
fn unknown_layer_is_an_error() {
    let mut r = renderer();
    assert!(r.enqueue("nope", DrawCommand::tile("t", 0, 0.0, 0.0)).is_err());
    assert!(r.set_layer_offset("nope", 1.0, 1.0).is_err());
}

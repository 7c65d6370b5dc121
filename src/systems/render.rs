//! Drawing.
//!
//! The world is y-up with the origin at the lower-left corner of the map,
//! raylib draws y-down from the top-left. Everything in world space goes
//! through [`world_to_map_rect`] before it reaches the camera, which works in
//! map pixels. Tile positions in the map file are already top-down and are
//! drawn as-is.
//!
//! Per screen:
//! - Loading: a "Loading..." caption.
//! - Menu: screen-space sprites (the title) and the key hints.
//! - Playing: map tiles and the player through [`Camera2DRes`], plus the
//!   collision overlay while [`DebugMode`] is present.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::player::Player;
use crate::components::screenposition::ScreenPosition;
use crate::components::sprite::Sprite;
use crate::resources::assetcache::TextureCache;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::collisionlayer::{CollisionLayer, TileGrid};
use crate::resources::debugmode::DebugMode;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::tilemap::{LoadedMap, Tilemap};

const BACKGROUND: Color = Color {
    r: 24,
    g: 20,
    b: 37,
    a: 255,
};
const HINT_FONT_SIZE: i32 = 20;

/// Convert a y-up world rectangle to map pixels (top-left origin, y down).
///
/// `map_height` is the map height in pixels.
pub fn world_to_map_rect(rect: Rectangle, map_height: f32) -> Rectangle {
    Rectangle {
        x: rect.x,
        y: map_height - rect.y - rect.height,
        width: rect.width,
        height: rect.height,
    }
}

/// Source rectangle of tile `id` in a tileset `tileset_width` pixels wide.
///
/// Ids are zero-based and run left to right, top to bottom.
pub fn tile_source_rect(id: u32, tile_size: u32, tileset_width: i32) -> Rectangle {
    let tiles_per_row = (tileset_width.max(0) as u32 / tile_size.max(1)).max(1);
    let col = id % tiles_per_row;
    let row = id / tiles_per_row;
    let size = tile_size as f32;
    Rectangle {
        x: col as f32 * size,
        y: row as f32 * size,
        width: size,
        height: size,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut rl: NonSendMut<RaylibHandle>,
    thread: NonSend<RaylibThread>,
    textures: NonSend<TextureCache>,
    state: Res<GameState>,
    camera: Option<Res<Camera2DRes>>,
    map: Option<Res<LoadedMap>>,
    collision: Option<Res<CollisionLayer>>,
    debug: Option<Res<DebugMode>>,
    players: Query<(&Player, &Sprite)>,
    screen_sprites: Query<(&Sprite, &ScreenPosition)>,
) {
    let fps = rl.get_fps();
    let screen_h = rl.get_screen_height();
    let mut d = rl.begin_drawing(&thread);
    d.clear_background(BACKGROUND);

    match state.get() {
        GameStates::Loading => {
            d.draw_text("Loading...", 20, screen_h - 40, HINT_FONT_SIZE, Color::RAYWHITE);
        }
        GameStates::Menu => {
            for (sprite, pos) in screen_sprites.iter() {
                if let Some(tex) = textures.resolve(&sprite.texture) {
                    let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
                    let dest = Rectangle::new(pos.pos.x, pos.pos.y, sprite.width, sprite.height);
                    d.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
                }
            }
            d.draw_text(
                "ENTER to start - ESC to quit",
                20,
                screen_h - 40,
                HINT_FONT_SIZE,
                Color::RAYWHITE,
            );
        }
        GameStates::Playing => {
            let (Some(camera), Some(map)) = (camera, map) else {
                return;
            };
            let (_, map_h) = map.tilemap.pixel_size();
            {
                let mut d2 = d.begin_mode2D(camera.0);

                if let Some(tileset) = map.tileset.as_ref().and_then(|h| textures.resolve(h)) {
                    draw_tiles(&mut d2, tileset, &map.tilemap);
                }

                for (player, sprite) in players.iter() {
                    let dest = world_to_map_rect(player.bounds(), map_h);
                    match textures.resolve(&sprite.texture) {
                        Some(tex) => {
                            let src =
                                Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
                            d2.draw_texture_pro(tex, src, dest, Vector2::zero(), 0.0, Color::WHITE);
                        }
                        None => d2.draw_rectangle_rec(dest, Color::MAGENTA),
                    }
                }

                if debug.is_some() {
                    if let Some(layer) = collision.as_deref() {
                        draw_blocked_cells(&mut d2, layer, map_h);
                    }
                    for (player, _) in players.iter() {
                        let rect = world_to_map_rect(player.bounds(), map_h);
                        d2.draw_rectangle_lines_ex(rect, 1.0, Color::GREEN);
                    }
                }
            }

            if debug.is_some() {
                d.draw_text(
                    &format!("DEBUG MODE (press F11 to toggle) | FPS: {}", fps),
                    10,
                    10,
                    10,
                    Color::RAYWHITE,
                );
                for (i, (player, _)) in players.iter().enumerate() {
                    let text = format!(
                        "Player pos: ({:.1}, {:.1}) vel: ({:.1}, {:.1})",
                        player.position.x, player.position.y, player.velocity.x, player.velocity.y
                    );
                    d.draw_text(&text, 10, 30 + 20 * i as i32, 10, Color::RAYWHITE);
                }
            }
        }
        GameStates::None | GameStates::Quitting => {}
    }
}

fn draw_tiles(d2: &mut impl RaylibDraw, tileset: &Texture2D, tilemap: &Tilemap) {
    let size = tilemap.tile_size as f32;
    for layer in &tilemap.layers {
        for pos in &layer.positions {
            let src = tile_source_rect(pos.id, tilemap.tile_size, tileset.width);
            let dest = Rectangle::new(pos.x as f32 * size, pos.y as f32 * size, size, size);
            d2.draw_texture_pro(tileset, src, dest, Vector2::zero(), 0.0, Color::WHITE);
        }
    }
}

fn draw_blocked_cells(d2: &mut impl RaylibDraw, layer: &CollisionLayer, map_height: f32) {
    let tw = layer.tile_width() as f32;
    let th = layer.tile_height() as f32;
    for (col, row) in layer.blocked_cells() {
        let world = Rectangle::new(col as f32 * tw, row as f32 * th, tw, th);
        let rect = world_to_map_rect(world, map_height);
        d2.draw_rectangle_lines_ex(rect, 1.0, Color::RED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_world_rect_at_origin_lands_on_bottom_row() {
        let r = world_to_map_rect(Rectangle::new(0.0, 0.0, 32.0, 48.0), 640.0);
        assert!(approx_eq(r.x, 0.0));
        assert!(approx_eq(r.y, 592.0));
        assert!(approx_eq(r.width, 32.0));
        assert!(approx_eq(r.height, 48.0));
    }

    #[test]
    fn test_world_rect_at_top_lands_on_row_zero() {
        let r = world_to_map_rect(Rectangle::new(64.0, 608.0, 32.0, 32.0), 640.0);
        assert!(approx_eq(r.x, 64.0));
        assert!(approx_eq(r.y, 0.0));
    }

    #[test]
    fn test_tile_source_rect_wraps_rows() {
        // 4 tiles per row in a 128px wide tileset
        let r = tile_source_rect(5, 32, 128);
        assert!(approx_eq(r.x, 32.0));
        assert!(approx_eq(r.y, 32.0));
        assert!(approx_eq(r.width, 32.0));
    }

    #[test]
    fn test_tile_source_rect_narrow_tileset() {
        let r = tile_source_rect(3, 32, 16);
        assert!(approx_eq(r.x, 0.0));
        assert!(approx_eq(r.y, 96.0));
    }
}

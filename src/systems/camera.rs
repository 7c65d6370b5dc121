//! Camera follow system.
//!
//! Keeps [`Camera2DRes`] centered on the player while staying inside the
//! map. On a map smaller than the window the map is centered instead.
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::player::Player;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::tilemap::LoadedMap;
use crate::systems::render::world_to_map_rect;

/// Point the camera should look at to follow `focus` (map pixels).
///
/// `view` is the visible area in pixels and `map` the map size in pixels.
/// Each axis is clamped so no area outside the map is shown, unless the map
/// is smaller than the view on that axis, in which case it is centered.
pub fn follow_target(focus: Vector2, view: Vector2, map: Vector2) -> Vector2 {
    fn axis(focus: f32, view: f32, map: f32) -> f32 {
        let half = view * 0.5;
        if map <= view {
            map * 0.5
        } else {
            focus.clamp(half, map - half)
        }
    }
    Vector2 {
        x: axis(focus.x, view.x, map.x),
        y: axis(focus.y, view.y, map.y),
    }
}

pub fn camera_follow(
    camera: Option<ResMut<Camera2DRes>>,
    map: Res<LoadedMap>,
    players: Query<&Player>,
) {
    let (Some(mut camera), Some(player)) = (camera, players.iter().next()) else {
        return;
    };
    let (map_w, map_h) = map.tilemap.pixel_size();
    let rect = world_to_map_rect(player.bounds(), map_h);
    let focus = Vector2 {
        x: rect.x + rect.width * 0.5,
        y: rect.y + rect.height * 0.5,
    };
    let view = Vector2 {
        x: camera.0.offset.x * 2.0,
        y: camera.0.offset.y * 2.0,
    };
    camera.0.target = follow_target(focus, view, Vector2 { x: map_w, y: map_h });
}

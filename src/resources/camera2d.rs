//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`] so that the camera system and
//! the renderer agree on a single world/screen transform. The target is
//! expressed in map pixels (top-left origin, y down), i.e. after the y-up
//! world has been flipped for drawing.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera looking at `target` from the middle of a `width` x `height`
    /// screen, unzoomed.
    pub fn centered(width: f32, height: f32, target: Vector2) -> Self {
        Camera2DRes(Camera2D {
            target,
            offset: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
            rotation: 0.0,
            zoom: 1.0,
        })
    }
}

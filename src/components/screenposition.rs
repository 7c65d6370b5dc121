//! Screen-space position component.
//!
//! The [`ScreenPosition`] component stores an entity's position in screen
//! (pixel) coordinates, top-left origin, y down. Use this for elements such
//! as the menu title that do not move with the camera. The player lives in
//! world space instead, see [`Player`](super::player::Player).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Top-left corner of an entity in screen pixels.
#[derive(Component, Clone, Copy, Debug)]
pub struct ScreenPosition {
    pub pos: Vector2,
}

impl Default for ScreenPosition {
    fn default() -> Self {
        Self {
            pos: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

impl ScreenPosition {
    /// Create a ScreenPosition from x and y.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    /// Position that centers a `width` x `height` box on a screen of the
    /// given size.
    pub fn centered(width: f32, height: f32, screen_width: f32, screen_height: f32) -> Self {
        Self::new(
            (screen_width - width) * 0.5,
            (screen_height - height) * 0.5,
        )
    }
}

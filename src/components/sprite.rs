//! Sprite component.
//!
//! A [`Sprite`] does not own its texture: it holds the [`AssetHandle`] of
//! the instance it was given by the
//! [`TextureCache`](crate::resources::assetcache::TextureCache). Whoever
//! despawns the entity disposes that handle.
use bevy_ecs::prelude::Component;

use crate::resources::assetcache::AssetHandle;

/// Drawable texture instance with its on-screen size in pixels.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub texture: AssetHandle,
    pub width: f32,
    pub height: f32,
}

impl Sprite {
    pub fn new(texture: AssetHandle, width: f32, height: f32) -> Self {
        Self {
            texture,
            width,
            height,
        }
    }
}

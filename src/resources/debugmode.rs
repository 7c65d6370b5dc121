//! Debug overlay toggle.
//!
//! The mere presence of this resource turns on the collision overlay drawn
//! by [`crate::systems::render`]. Remove it to hide the overlay.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, blocked tiles and player bounds are drawn.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}

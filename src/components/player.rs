//! Player character controller.
//!
//! [`Player`] owns the character's position, size and velocity, turns key
//! events into velocity, and advances the position every frame while keeping
//! it out of blocked tiles.
//!
//! # Collision
//!
//! Movement is resolved one axis at a time: X is moved and checked first,
//! then Y. A blocked axis snaps back to its previous value and its velocity is
//! zeroed, so the player slides along walls. Because only the final position
//! of each axis is checked, the player can clip a blocking corner diagonally,
//! and a large enough step can carry the player past a thin wall.
//!
//! Each probe samples points along the edge facing the direction of travel,
//! starting at the edge's lower/left end and stepping by half a tile until
//! the player's extent on that edge is reached. The last sample therefore
//! lies less than half a tile short of the far corner.

use bevy_ecs::prelude::Component;
use raylib::prelude::{KeyboardKey, Rectangle, Vector2};

use crate::components::inputcontrolled::{Direction, KeyHandler};
use crate::resources::collisionlayer::TileGrid;

/// Default movement speed in world units per second.
pub const DEFAULT_SPEED: f32 = 60.0 * 5.0;
/// Default factor applied to the sprite's pixel size.
pub const DEFAULT_SCALE: f32 = 3.0;

/// The controllable character.
///
/// `position` is the lower-left corner of the character in y-up world
/// coordinates.
#[derive(Component, Clone, Debug)]
pub struct Player {
    pub position: Vector2,
    pub velocity: Vector2,
    size: Vector2,
    speed: f32,
}

impl Player {
    /// Create a player whose size is the sprite size times `scale`.
    pub fn new(position: Vector2, sprite_width: f32, sprite_height: f32, scale: f32) -> Self {
        Self {
            position,
            velocity: Vector2::zero(),
            size: Vector2::new(sprite_width * scale, sprite_height * scale),
            speed: DEFAULT_SPEED,
        }
    }

    /// Builder-style speed override.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Change the speed used by subsequent key presses.
    ///
    /// The current velocity is left alone.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn size(&self) -> Vector2 {
        self.size
    }

    /// World-space bounds of the character.
    pub fn bounds(&self) -> Rectangle {
        Rectangle {
            x: self.position.x,
            y: self.position.y,
            width: self.size.x,
            height: self.size.y,
        }
    }

    /// Start moving in the direction bound to `key`.
    ///
    /// Always reports the event as consumed.
    pub fn on_key_down(&mut self, key: KeyboardKey) -> bool {
        match Direction::from_key(key) {
            Some(Direction::Up) => self.velocity.y = self.speed,
            Some(Direction::Down) => self.velocity.y = -self.speed,
            Some(Direction::Left) => self.velocity.x = -self.speed,
            Some(Direction::Right) => self.velocity.x = self.speed,
            None => {}
        }
        true
    }

    /// Stop moving along the axis of the direction bound to `key`.
    ///
    /// Releasing either key of an axis stops that axis. Returns `false` for
    /// keys that are not movement keys.
    pub fn on_key_up(&mut self, key: KeyboardKey) -> bool {
        match Direction::from_key(key) {
            Some(dir) if dir.is_horizontal() => {
                self.velocity.x = 0.0;
                true
            }
            Some(_) => {
                self.velocity.y = 0.0;
                true
            }
            None => false,
        }
    }

    /// Advance the position by `delta` seconds, resolving tile collisions.
    ///
    /// A zero, negative or non-finite `delta` leaves the player untouched.
    pub fn update(&mut self, delta: f32, grid: &impl TileGrid) {
        if !(delta > 0.0) || !delta.is_finite() {
            return;
        }
        let old = self.position;

        self.position.x += self.velocity.x * delta;
        let collision_x = if self.velocity.x < 0.0 {
            self.collides_left(grid)
        } else if self.velocity.x > 0.0 {
            self.collides_right(grid)
        } else {
            false
        };
        if collision_x {
            self.position.x = old.x;
            self.velocity.x = 0.0;
        }

        self.position.y += self.velocity.y * delta;
        let collision_y = if self.velocity.y < 0.0 {
            self.collides_bottom(grid)
        } else if self.velocity.y > 0.0 {
            self.collides_top(grid)
        } else {
            false
        };
        if collision_y {
            self.position.y = old.y;
            self.velocity.y = 0.0;
        }
    }

    /// Whether any sample along the left edge lies in a blocked tile.
    pub fn collides_left(&self, grid: &impl TileGrid) -> bool {
        self.probe_vertical_edge(grid, self.position.x)
    }

    /// Whether any sample along the right edge lies in a blocked tile.
    pub fn collides_right(&self, grid: &impl TileGrid) -> bool {
        self.probe_vertical_edge(grid, self.position.x + self.size.x)
    }

    /// Whether any sample along the top edge lies in a blocked tile.
    pub fn collides_top(&self, grid: &impl TileGrid) -> bool {
        self.probe_horizontal_edge(grid, self.position.y + self.size.y)
    }

    /// Whether any sample along the bottom edge lies in a blocked tile.
    pub fn collides_bottom(&self, grid: &impl TileGrid) -> bool {
        self.probe_horizontal_edge(grid, self.position.y)
    }

    fn probe_vertical_edge(&self, grid: &impl TileGrid, x: f32) -> bool {
        let step = grid.tile_height() as f32 / 2.0;
        edge_samples(self.size.y, step).any(|offset| grid.is_blocked_at(x, self.position.y + offset))
    }

    fn probe_horizontal_edge(&self, grid: &impl TileGrid, y: f32) -> bool {
        let step = grid.tile_width() as f32 / 2.0;
        edge_samples(self.size.x, step).any(|offset| grid.is_blocked_at(self.position.x + offset, y))
    }
}

/// Offsets `0, step, 2*step, ...` strictly below `extent`.
fn edge_samples(extent: f32, step: f32) -> impl Iterator<Item = f32> {
    let valid = step > 0.0 && extent.is_finite();
    std::iter::successors(valid.then_some(0.0_f32), move |offset| Some(offset + step))
        .take_while(move |offset| *offset < extent)
}

impl KeyHandler for Player {
    fn key_down(&mut self, key: KeyboardKey) -> bool {
        self.on_key_down(key)
    }

    fn key_up(&mut self, key: KeyboardKey) -> bool {
        self.on_key_up(key)
    }
}

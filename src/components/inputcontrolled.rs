//! Keyboard-driven movement capability.
//!
//! - [`Direction`] – the four logical movement directions and their key codes
//! - [`KeyHandler`] – anything that reacts to discrete key-down/key-up events
//! - [`InputControlled`] – marker for entities that receive key events
//!
//! The observer in [`crate::systems::player`] forwards every
//! [`KeyEvent`](crate::events::input::KeyEvent) to the [`KeyHandler`] of each
//! entity tagged [`InputControlled`].

use bevy_ecs::prelude::Component;
use raylib::prelude::KeyboardKey;

/// Logical movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a key code to a direction: W/Up, S/Down, A/Left, D/Right.
    /// Every other key maps to `None`.
    pub fn from_key(key: KeyboardKey) -> Option<Self> {
        match key {
            KeyboardKey::KEY_W | KeyboardKey::KEY_UP => Some(Direction::Up),
            KeyboardKey::KEY_S | KeyboardKey::KEY_DOWN => Some(Direction::Down),
            KeyboardKey::KEY_A | KeyboardKey::KEY_LEFT => Some(Direction::Left),
            KeyboardKey::KEY_D | KeyboardKey::KEY_RIGHT => Some(Direction::Right),
            _ => None,
        }
    }

    /// Whether the direction moves along the horizontal axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Receiver of discrete key events.
///
/// Both methods return whether the event was consumed.
pub trait KeyHandler {
    fn key_down(&mut self, key: KeyboardKey) -> bool;
    fn key_up(&mut self, key: KeyboardKey) -> bool;
}

/// Marker: this entity's [`KeyHandler`] receives key events.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct InputControlled;

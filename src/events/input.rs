//! Key events.
//!
//! A [`KeyEvent`] is triggered once per bound key whenever it goes down or
//! comes back up. Observers such as the player controller and the screen
//! navigation react to these instead of polling
//! [`InputState`](crate::resources::input::InputState).

use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;

/// A bound key was pressed (`pressed == true`) or released.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    pub key: KeyboardKey,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: KeyboardKey) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: KeyboardKey) -> Self {
        Self {
            key,
            pressed: false,
        }
    }
}

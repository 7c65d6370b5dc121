//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame,
//!   writes the results into [`crate::resources::input::InputState`] and
//!   triggers a [`KeyEvent`] for every bound key that went down or up.
//! - Pressing the debug key also triggers
//!   [`SwitchDebugEvent`](crate::events::switchdebug::SwitchDebugEvent).
use bevy_ecs::prelude::*;

use crate::events::input::KeyEvent;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;

/// Poll Raylib for keyboard input and dispatch key events.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let events = input.apply(|key| rl.is_key_down(key));
    dispatch_key_events(&input, &events, &mut commands);
}

/// Trigger the observers for this frame's key transitions.
pub fn dispatch_key_events(input: &InputState, events: &[KeyEvent], commands: &mut Commands) {
    for event in events {
        if event.pressed && event.key == input.mode_debug.key_binding {
            commands.trigger(SwitchDebugEvent {});
        }
        commands.trigger(*event);
    }
}

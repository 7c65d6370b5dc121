//! Player systems.
//!
//! - [`player_key_observer`] forwards every [`KeyEvent`] to the key handler
//!   of input-controlled players.
//! - [`player_movement`] advances players by the frame delta against the
//!   [`CollisionLayer`]. It must run before `render_system` so each frame
//!   draws the updated position.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::trace;

use crate::components::inputcontrolled::{InputControlled, KeyHandler};
use crate::components::player::Player;
use crate::events::input::KeyEvent;
use crate::resources::collisionlayer::CollisionLayer;
use crate::resources::worldtime::WorldTime;

pub fn player_key_observer(
    trigger: On<KeyEvent>,
    mut players: Query<&mut Player, With<InputControlled>>,
) {
    let event = trigger.event();
    for mut player in players.iter_mut() {
        let consumed = if event.pressed {
            player.key_down(event.key)
        } else {
            player.key_up(event.key)
        };
        trace!("{:?} pressed={} consumed={}", event.key, event.pressed, consumed);
    }
}

pub fn player_movement(
    mut players: Query<&mut Player>,
    time: Res<WorldTime>,
    layer: Res<CollisionLayer>,
) {
    for mut player in players.iter_mut() {
        player.update(time.delta, &*layer);
    }
}

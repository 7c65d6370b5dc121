//! Screen flow systems.
//!
//! - [`check_pending_state`] turns a pending [`NextGameState`] into a
//!   [`GameStateChangedEvent`].
//! - [`loading_screen`] forwards from the loading screen to the configured
//!   next screen the first time it runs.
//! - [`screen_navigation_observer`] maps confirm/back keys to transitions.
//! - `state_is_*` are run conditions.
use crate::events::gamestate::GameStateChangedEvent;
use crate::events::input::KeyEvent;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::input::InputState;
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

pub fn check_pending_state(mut commands: Commands, next_state: Res<NextGameState>) {
    if next_state.is_pending() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Request the screen configured to follow loading.
///
/// Runs only while the loading screen is showing and fires at most once:
/// the request stays pending until the observer applies it.
pub fn loading_screen(
    mut fired: Local<bool>,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextGameState>,
) {
    if *fired {
        return;
    }
    *fired = true;
    debug!("Loading screen forwarding to {}", config.after_loading);
    next_state.set(config.after_loading);
}

/// Confirm/back navigation between screens.
///
/// - Menu: confirm starts playing, back quits.
/// - Playing: back returns to the menu.
pub fn screen_navigation_observer(
    trigger: On<KeyEvent>,
    input: Res<InputState>,
    state: Res<GameState>,
    mut next_state: ResMut<NextGameState>,
) {
    let event = trigger.event();
    if !event.pressed {
        return;
    }
    let confirm = event.key == input.action_confirm.key_binding;
    let back = event.key == input.action_back.key_binding;
    match state.get() {
        GameStates::Menu if confirm => next_state.set(GameStates::Playing),
        GameStates::Menu if back => next_state.set(GameStates::Quitting),
        GameStates::Playing if back => next_state.set(GameStates::Menu),
        _ => {}
    }
}

pub fn state_is_loading(state: Res<GameState>) -> bool {
    state.get() == GameStates::Loading
}

pub fn state_is_playing(state: Res<GameState>) -> bool {
    state.get() == GameStates::Playing
}

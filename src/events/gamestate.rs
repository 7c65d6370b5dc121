//! Screen transition event and observer.
//!
//! Systems request a change of screen by updating [`NextGameState`].
//! Emitting a [`GameStateChangedEvent`] then triggers the observer in this
//! module, which applies the transition to [`GameState`] and runs the
//! exit/enter hooks stored in [`SystemsStore`].
use crate::resources::gamestate::NextGameStates::{Pending, Unchanged};
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::systemsstore::{SystemsStore, hooks};
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info, warn};

/// Event used to indicate that a pending screen transition should be applied.
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStateChangedEvent {}

/// Observer that applies a pending screen transition.
///
/// - Reads the intention from [`NextGameState`].
/// - If pending, copies the new value into [`GameState`], runs the exit hook
///   of the previous screen, then the enter hook of the new one, and resets
///   [`NextGameState`] to [`Unchanged`].
/// - Transitions to the screen already showing are dropped.
pub fn observe_gamestate_change_event(
    _trigger: On<GameStateChangedEvent>,
    mut commands: Commands,
    mut next_game_state: ResMut<NextGameState>,
    mut game_state: ResMut<GameState>,
    systems_store: Res<SystemsStore>,
) {
    match next_game_state.get().clone() {
        Pending(new_state) => {
            next_game_state.reset();
            let old_state = game_state.get();
            if old_state == new_state {
                debug!("Already in {} state, ignoring transition", new_state);
                return;
            }
            info!("Transitioning from {} to {}", old_state, new_state);
            game_state.set(new_state);
            on_state_exit(old_state, &mut commands, &systems_store);
            on_state_enter(new_state, &mut commands, &systems_store);
        }
        Unchanged => {
            debug!("No state change pending.");
        }
    }
}

fn run_hook(name: &str, commands: &mut Commands, systems_store: &SystemsStore) {
    match systems_store.get(name) {
        Some(id) => {
            commands.run_system(id);
        }
        None => warn!("Screen hook '{}' not registered", name),
    }
}

/// Run screen-specific "enter" systems for the given state.
fn on_state_enter(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::None | GameStates::Loading => debug!("Entered {} state", state),
        GameStates::Menu => run_hook(hooks::ENTER_MENU, commands, systems_store),
        GameStates::Playing => run_hook(hooks::ENTER_PLAY, commands, systems_store),
        GameStates::Quitting => info!("Quit requested"),
    }
}

/// Run screen-specific "exit" systems for the given state.
fn on_state_exit(state: GameStates, commands: &mut Commands, systems_store: &SystemsStore) {
    match state {
        GameStates::Menu | GameStates::Playing => {
            run_hook(hooks::CLEAN_SCENE, commands, systems_store)
        }
        GameStates::None | GameStates::Loading | GameStates::Quitting => {
            debug!("Exited {} state", state)
        }
    }
}

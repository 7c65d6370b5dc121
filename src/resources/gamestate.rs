//! Screen state resources.
//!
//! These resources track which screen is active and any pending transition
//! requested by systems. See
//! `crate::events::gamestate::observe_gamestate_change_event` for how a
//! transition is applied and the enter/exit hooks are invoked.

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Resource;

/// Screens the game can be showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStates {
    #[default]
    None,
    /// Forwards to the configured next screen on its first frame.
    Loading,
    Menu,
    Playing,
    /// Ends the frame loop.
    Quitting,
}

impl fmt::Display for GameStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameStates::None => "none",
            GameStates::Loading => "loading",
            GameStates::Menu => "menu",
            GameStates::Playing => "playing",
            GameStates::Quitting => "quitting",
        };
        f.write_str(name)
    }
}

impl FromStr for GameStates {
    type Err = String;

    /// Parse a screen name as written in the config file (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loading" => Ok(GameStates::Loading),
            "menu" => Ok(GameStates::Menu),
            "playing" | "play" => Ok(GameStates::Playing),
            "quitting" | "quit" => Ok(GameStates::Quitting),
            other => Err(format!("unknown screen '{}'", other)),
        }
    }
}

/// Representation of a requested next state.
///
/// Use [`NextGameState::set`] to mark a transition as pending; an observer
/// will later apply it and reset the value to [`NextGameStates::Unchanged`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NextGameStates {
    #[default]
    Unchanged,
    Pending(GameStates),
}

/// Authoritative current screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    current: GameStates,
}

impl GameState {
    /// Create a new state initialized to [`GameStates::None`].
    pub fn new() -> Self {
        GameState {
            current: GameStates::None,
        }
    }
    /// Read-only access to the current state.
    pub fn get(&self) -> GameStates {
        self.current
    }
    /// Update the current state immediately.
    ///
    /// Prefer requesting transitions via [`NextGameState`] so that the
    /// enter/exit hooks run.
    pub fn set(&mut self, state: GameStates) {
        self.current = state;
    }
}

/// Intent to change to a new screen.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NextGameState {
    next: NextGameStates,
}

impl NextGameState {
    /// Create a new value initialized to [`NextGameStates::Unchanged`].
    pub fn new() -> Self {
        NextGameState {
            next: NextGameStates::Unchanged,
        }
    }

    /// Get the current transition request.
    pub fn get(&self) -> &NextGameStates {
        &self.next
    }

    /// Whether a transition is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        matches!(self.next, NextGameStates::Pending(_))
    }

    /// Request a transition to `next` by marking it as pending.
    ///
    /// The `check_pending_state` system emits the change event.
    pub fn set(&mut self, next: GameStates) {
        self.next = NextGameStates::Pending(next);
    }

    /// Reset to [`NextGameStates::Unchanged`].
    pub fn reset(&mut self) {
        self.next = NextGameStates::Unchanged;
    }
}

//! Registry for screen hook systems.
//!
//! Enter/exit hooks are registered once under string keys and looked up by
//! the game state observer, which runs them through their
//! [`bevy_ecs::system::SystemId`]. Well-known keys are listed in
//! [`hooks`].

use bevy_ecs::prelude::Resource;
use bevy_ecs::system::SystemId;
use rustc_hash::FxHashMap;

/// Keys the game state observer looks up.
pub mod hooks {
    pub const ENTER_MENU: &str = "enter_menu";
    pub const ENTER_PLAY: &str = "enter_play";
    pub const CLEAN_SCENE: &str = "clean_scene";
}

/// Map of string names to system IDs.
#[derive(Resource, Default)]
pub struct SystemsStore {
    map: FxHashMap<String, SystemId>,
}

impl SystemsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a system ID under a human-readable name.
    pub fn insert(&mut self, name: impl Into<String>, id: SystemId) {
        self.map.insert(name.into(), id);
    }

    /// Retrieve a system ID by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<SystemId> {
        self.map.get(name.as_ref()).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

//! Heslington Hustle library.
//!
//! Exposes the game's ECS components, resources, systems and events so the
//! binary and the integration tests share one copy.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;

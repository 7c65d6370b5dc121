//! Game systems.
//!
//! Submodules overview
//! - [`camera`] – keep the camera on the player inside the map
//! - [`gamestate`] – pending transitions, loading screen, menu/play navigation
//! - [`input`] – read hardware input and dispatch key events
//! - [`player`] – key handling and movement with tile collision
//! - [`render`] – draw each screen and the debug overlay using Raylib
//! - [`time`] – update simulation time and delta

pub mod camera;
pub mod gamestate;
pub mod input;
pub mod player;
pub mod render;
pub mod time;

//! ECS components for entities.
//!
//! Submodules overview:
//! - [`inputcontrolled`] – key handler capability and the marker for entities receiving key events
//! - [`persistent`] – marker for entities that survive screen changes
//! - [`player`] – the controllable character and its tile collision
//! - [`screenposition`] – screen-space position for UI elements
//! - [`sprite`] – texture instance drawn for an entity

pub mod inputcontrolled;
pub mod persistent;
pub mod player;
pub mod screenposition;
pub mod sprite;

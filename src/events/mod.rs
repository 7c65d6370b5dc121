//! Event types and observers.
//!
//! Submodules:
//! - [`gamestate`] – screen transition notifications and the observer running screen hooks
//! - [`input`] – key down/up notifications
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod gamestate;
pub mod input;
pub mod switchdebug;

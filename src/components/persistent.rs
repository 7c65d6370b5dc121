//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive `clean_scene`, which
//! runs whenever the menu or play screen is left. Registered hook systems and
//! observers carry it so a screen change never removes them.

use bevy_ecs::prelude::Component;

/// Tag component for entities that outlive screen changes.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Persistent;

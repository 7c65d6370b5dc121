//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Movement is bound to both WASD
//! and the arrow keys; Enter confirms, Escape goes back and F11 toggles the
//! debug overlay.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::events::input::KeyEvent;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    /// Inactive state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            key_binding: key,
            ..Self::default()
        }
    }

    /// Record the key's state for this frame and report the transition, if any.
    fn refresh(&mut self, down: bool) -> Option<KeyEvent> {
        self.just_pressed = down && !self.active;
        self.just_released = !down && self.active;
        self.active = down;
        if self.just_pressed {
            Some(KeyEvent::down(self.key_binding))
        } else if self.just_released {
            Some(KeyEvent::up(self.key_binding))
        } else {
            None
        }
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
///
/// Fields are grouped by purpose: main movement (WASD), secondary movement
/// (arrow keys), and actions.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    // Action keys
    pub action_confirm: BoolState,
    pub action_back: BoolState,
    pub mode_debug: BoolState,
}

impl Default for BoolState {
    fn default() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: KeyboardKey::KEY_NULL,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_confirm: BoolState::bound(KeyboardKey::KEY_ENTER),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    fn bindings_mut(&mut self) -> [&mut BoolState; 11] {
        [
            &mut self.maindirection_up,
            &mut self.maindirection_left,
            &mut self.maindirection_down,
            &mut self.maindirection_right,
            &mut self.secondarydirection_up,
            &mut self.secondarydirection_down,
            &mut self.secondarydirection_left,
            &mut self.secondarydirection_right,
            &mut self.action_confirm,
            &mut self.action_back,
            &mut self.mode_debug,
        ]
    }

    /// Refresh every binding from `is_down` and return this frame's key
    /// transitions, in binding order.
    pub fn apply(&mut self, mut is_down: impl FnMut(KeyboardKey) -> bool) -> Vec<KeyEvent> {
        self.bindings_mut()
            .into_iter()
            .filter_map(|state| {
                let down = is_down(state.key_binding);
                state.refresh(down)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolstate_default() {
        let bs = BoolState::default();
        assert!(!bs.active);
        assert!(!bs.just_pressed);
        assert!(!bs.just_released);
        assert_eq!(bs.key_binding, KeyboardKey::KEY_NULL);
    }

    #[test]
    fn test_inputstate_default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.maindirection_left.key_binding, KeyboardKey::KEY_A);
        assert_eq!(input.maindirection_down.key_binding, KeyboardKey::KEY_S);
        assert_eq!(input.maindirection_right.key_binding, KeyboardKey::KEY_D);
        assert_eq!(
            input.secondarydirection_up.key_binding,
            KeyboardKey::KEY_UP
        );
        assert_eq!(
            input.secondarydirection_down.key_binding,
            KeyboardKey::KEY_DOWN
        );
        assert_eq!(
            input.secondarydirection_left.key_binding,
            KeyboardKey::KEY_LEFT
        );
        assert_eq!(
            input.secondarydirection_right.key_binding,
            KeyboardKey::KEY_RIGHT
        );
        assert_eq!(input.action_confirm.key_binding, KeyboardKey::KEY_ENTER);
        assert_eq!(input.action_back.key_binding, KeyboardKey::KEY_ESCAPE);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F11);
    }

    #[test]
    fn test_apply_reports_press_then_release() {
        let mut input = InputState::default();

        let events = input.apply(|key| key == KeyboardKey::KEY_D);
        assert_eq!(events, vec![KeyEvent::down(KeyboardKey::KEY_D)]);
        assert!(input.maindirection_right.active);
        assert!(input.maindirection_right.just_pressed);

        // Held: no new event.
        let events = input.apply(|key| key == KeyboardKey::KEY_D);
        assert!(events.is_empty());
        assert!(input.maindirection_right.active);
        assert!(!input.maindirection_right.just_pressed);

        let events = input.apply(|_| false);
        assert_eq!(events, vec![KeyEvent::up(KeyboardKey::KEY_D)]);
        assert!(!input.maindirection_right.active);
        assert!(input.maindirection_right.just_released);

        assert!(input.apply(|_| false).is_empty());
        assert!(!input.maindirection_right.just_released);
    }

    #[test]
    fn test_apply_multiple_keys_in_binding_order() {
        let mut input = InputState::default();
        let events = input.apply(|key| {
            matches!(key, KeyboardKey::KEY_RIGHT | KeyboardKey::KEY_W | KeyboardKey::KEY_F11)
        });
        assert_eq!(
            events,
            vec![
                KeyEvent::down(KeyboardKey::KEY_W),
                KeyEvent::down(KeyboardKey::KEY_RIGHT),
                KeyEvent::down(KeyboardKey::KEY_F11),
            ]
        );
    }

    #[test]
    fn test_unbound_keys_never_reported() {
        let mut input = InputState::default();
        let events = input.apply(|key| key == KeyboardKey::KEY_SPACE);
        assert!(events.is_empty());
    }
}

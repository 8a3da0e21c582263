//! Input Module
//!
//! Platform-agnostic keyboard state and logical key bindings.
//! Hosts feed raw key events in; the character controller reads
//! [`DirectionFlags`] out.
//!
//! # Example
//!
//! ```rust,ignore
//! use stride_engine::input::{InputState, KeyCode};
//!
//! let mut input = InputState::new();
//! input.handle_key(KeyCode::ArrowUp, true);
//! assert!(input.direction_flags().any());
//! ```

pub mod bindings;
pub mod keyboard;

pub use bindings::{InputAction, KeyBindings};
pub use keyboard::{KeyCode, KeyboardState};

/// Raw directional flags as they are keyed in the direction-offset table.
///
/// `up` and `down` are the keys bound to the logical forward and backward
/// actions respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    /// Flags with nothing pressed.
    pub const NONE: Self = Self {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// `true` when any of the four directions is held.
    #[inline]
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Combined keyboard state and bindings.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub bindings: KeyBindings,
}

impl InputState {
    /// Create a new input state with default bindings and no keys held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input state with custom bindings.
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            bindings,
        }
    }

    /// Forward a raw key event.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        self.keyboard.handle_key(key, pressed);
    }

    /// Shorthand for `handle_key(key, true)`.
    pub fn press(&mut self, key: KeyCode) {
        self.handle_key(key, true);
    }

    /// Shorthand for `handle_key(key, false)`.
    pub fn release(&mut self, key: KeyCode) {
        self.handle_key(key, false);
    }

    /// Raw pressed query.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keyboard.is_pressed(key)
    }

    /// Whether the key bound to `action` is held. Unbound actions are never held.
    pub fn is_action_pressed(&self, action: InputAction) -> bool {
        self.bindings
            .get_key(action)
            .is_some_and(|key| self.keyboard.is_pressed(key))
    }

    /// Consume a pending key-down edge for the key bound to `action`.
    pub fn take_action_just_pressed(&mut self, action: InputAction) -> bool {
        match self.bindings.get_key(action) {
            Some(key) => self.keyboard.take_just_pressed(key),
            None => false,
        }
    }

    /// Read the four directional flags through the bindings.
    pub fn direction_flags(&self) -> DirectionFlags {
        DirectionFlags {
            up: self.is_action_pressed(InputAction::MoveForward),
            down: self.is_action_pressed(InputAction::MoveBack),
            left: self.is_action_pressed(InputAction::MoveLeft),
            right: self.is_action_pressed(InputAction::MoveRight),
        }
    }

    /// Release every key.
    pub fn reset(&mut self) {
        self.keyboard.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_default() {
        let input = InputState::new();
        assert!(!input.direction_flags().any());
    }

    #[test]
    fn test_direction_flags_follow_bindings() {
        let mut input = InputState::new();
        input.press(KeyCode::ArrowUp);
        input.press(KeyCode::ArrowLeft);

        let flags = input.direction_flags();
        assert!(flags.up);
        assert!(flags.left);
        assert!(!flags.down);
        assert!(!flags.right);
    }

    #[test]
    fn test_rebound_keys_drive_flags() {
        let mut input = InputState::new();
        input.bindings.bind(KeyCode::W, InputAction::MoveForward);

        input.press(KeyCode::ArrowUp);
        assert!(!input.direction_flags().up);

        input.press(KeyCode::W);
        assert!(input.direction_flags().up);
    }

    #[test]
    fn test_non_direction_key_does_not_move() {
        let mut input = InputState::new();
        input.press(KeyCode::Shift);
        assert!(!input.direction_flags().any());
    }

    #[test]
    fn test_toggle_edge_through_binding() {
        let mut input = InputState::new();
        input.press(KeyCode::Shift);
        assert!(input.take_action_just_pressed(InputAction::ToggleRun));
        assert!(!input.take_action_just_pressed(InputAction::ToggleRun));
    }
}

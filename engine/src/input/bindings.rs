//! Input Bindings Module
//!
//! Maps physical keys to logical locomotion actions so game code never
//! refers to raw keys directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::KeyCode;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputAction {
    /// Move forward (default: ArrowUp)
    MoveForward,
    /// Move backward (default: ArrowDown)
    MoveBack,
    /// Move left (default: ArrowLeft)
    MoveLeft,
    /// Move right (default: ArrowRight)
    MoveRight,
    /// Flip between walking and running (default: Shift)
    ToggleRun,
}

/// Bidirectional key/action map.
///
/// Binding a key that is already in use, or an action that already has a
/// key, replaces the old pairing on both sides.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_action: HashMap<KeyCode, InputAction>,
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Default bindings:
    /// - ArrowUp = MoveForward
    /// - ArrowDown = MoveBack
    /// - ArrowLeft = MoveLeft
    /// - ArrowRight = MoveRight
    /// - Shift = ToggleRun
    pub fn new() -> Self {
        let mut bindings = Self::empty();
        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);
        bindings.bind(KeyCode::ArrowDown, InputAction::MoveBack);
        bindings.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        bindings.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        bindings.bind(KeyCode::Shift, InputAction::ToggleRun);
        bindings
    }

    /// Bindings with nothing mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        }
    }

    /// Build bindings from `(action, key)` pairs, e.g. from a config file.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (InputAction, KeyCode)>) -> Self {
        let mut bindings = Self::empty();
        for (action, key) in pairs {
            bindings.bind(key, action);
        }
        bindings
    }

    /// Bind a physical key to a logical action.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }
        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific action.
    pub fn unbind_action(&mut self, action: InputAction) {
        if let Some(key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&key);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// All current bindings as action/key pairs.
    pub fn all_bindings(&self) -> impl Iterator<Item = (InputAction, KeyCode)> + '_ {
        self.action_to_key.iter().map(|(&a, &k)| (a, k))
    }
}

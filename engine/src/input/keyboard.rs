//! Keyboard Input Module
//!
//! Key identifiers and pressed-key tracking, decoupled from any windowing
//! system. Key names follow the lowercase DOM `KeyboardEvent.key` spelling
//! (`"arrowup"`, `"shift"`, ...) so hosts and config files can refer to them
//! by string.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCode {
    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letter keys commonly used for movement
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    F,

    // Modifiers and control keys
    Shift,
    Control,
    Space,
    Enter,
    Escape,
    Tab,

    /// Catch-all for unhandled keys
    Unknown,
}

impl KeyCode {
    /// Lowercase DOM-style name of the key.
    pub fn name(self) -> &'static str {
        match self {
            KeyCode::ArrowUp => "arrowup",
            KeyCode::ArrowDown => "arrowdown",
            KeyCode::ArrowLeft => "arrowleft",
            KeyCode::ArrowRight => "arrowright",
            KeyCode::W => "w",
            KeyCode::A => "a",
            KeyCode::S => "s",
            KeyCode::D => "d",
            KeyCode::Q => "q",
            KeyCode::E => "e",
            KeyCode::R => "r",
            KeyCode::F => "f",
            KeyCode::Shift => "shift",
            KeyCode::Control => "control",
            KeyCode::Space => " ",
            KeyCode::Enter => "enter",
            KeyCode::Escape => "escape",
            KeyCode::Tab => "tab",
            KeyCode::Unknown => "unidentified",
        }
    }

    /// Parse a key name, case-insensitive. Unrecognised names map to
    /// [`KeyCode::Unknown`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "arrowup" => KeyCode::ArrowUp,
            "arrowdown" => KeyCode::ArrowDown,
            "arrowleft" => KeyCode::ArrowLeft,
            "arrowright" => KeyCode::ArrowRight,
            "w" => KeyCode::W,
            "a" => KeyCode::A,
            "s" => KeyCode::S,
            "d" => KeyCode::D,
            "q" => KeyCode::Q,
            "e" => KeyCode::E,
            "r" => KeyCode::R,
            "f" => KeyCode::F,
            "shift" => KeyCode::Shift,
            "control" => KeyCode::Control,
            " " | "space" => KeyCode::Space,
            "enter" => KeyCode::Enter,
            "escape" => KeyCode::Escape,
            "tab" => KeyCode::Tab,
            _ => KeyCode::Unknown,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeyCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[cfg(feature = "winit")]
impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as W;
        match key {
            W::ArrowUp => KeyCode::ArrowUp,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowRight => KeyCode::ArrowRight,
            W::KeyW => KeyCode::W,
            W::KeyA => KeyCode::A,
            W::KeyS => KeyCode::S,
            W::KeyD => KeyCode::D,
            W::KeyQ => KeyCode::Q,
            W::KeyE => KeyCode::E,
            W::KeyR => KeyCode::R,
            W::KeyF => KeyCode::F,
            W::ShiftLeft | W::ShiftRight => KeyCode::Shift,
            W::ControlLeft | W::ControlRight => KeyCode::Control,
            W::Space => KeyCode::Space,
            W::Enter => KeyCode::Enter,
            W::Escape => KeyCode::Escape,
            W::Tab => KeyCode::Tab,
            _ => KeyCode::Unknown,
        }
    }
}

/// Tracks which keys are currently held.
///
/// Key-down transitions are also recorded as "just pressed" until drained
/// with [`KeyboardState::take_just_pressed`], so toggles fire once per press
/// rather than once per frame.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl KeyboardState {
    /// Create a new keyboard state with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update state based on key press/release.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::Unknown {
            return;
        }
        if pressed {
            if self.pressed.insert(key) {
                self.just_pressed.insert(key);
            }
        } else {
            self.pressed.remove(&key);
        }
    }

    /// Check if a key is currently held.
    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Consume a pending key-down edge. Returns `true` at most once per press.
    pub fn take_just_pressed(&mut self, key: KeyCode) -> bool {
        self.just_pressed.remove(&key)
    }

    /// Iterate over all held keys.
    pub fn pressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.pressed.iter().copied()
    }

    /// Release every key and drop pending edges.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }
}

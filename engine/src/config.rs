//! Engine configuration
//!
//! One JSON document tunes the locomotion controller, the third-person rig,
//! the tick loop and key bindings. Every field is optional; missing values
//! fall back to the built-in defaults.
//!
//! ```json
//! {
//!     "locomotion": { "run_velocity": 6.0, "fade_duration": 0.2 },
//!     "third_person": { "offset": [0.0, 20.0, -50.0] },
//!     "tick": { "max_delta_ms": 50.0 },
//!     "bindings": { "move_forward": "w", "toggle_run": "space" }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::ThirdPersonConfig;
use crate::character::LocomotionConfig;
use crate::input::{InputAction, KeyBindings, KeyCode};
use crate::tick::TickConfig;

/// Errors that can occur while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    IoError(std::io::Error),
    /// JSON deserialization error.
    JsonError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::JsonError(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::JsonError(e)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub locomotion: LocomotionConfig,
    pub third_person: ThirdPersonConfig,
    pub tick: TickConfig,
    /// Per-action key overrides applied on top of the default bindings
    pub bindings: HashMap<InputAction, KeyCode>,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Default bindings with this config's overrides applied.
    pub fn key_bindings(&self) -> KeyBindings {
        let mut bindings = KeyBindings::new();
        // Sorted so that two actions claiming one key resolve the same way every run
        let mut overrides: Vec<_> = self.bindings.iter().map(|(a, k)| (*a, *k)).collect();
        overrides.sort_by_key(|(action, _)| *action as u8);
        for (action, key) in overrides {
            bindings.bind(key, action);
        }
        bindings
    }
}

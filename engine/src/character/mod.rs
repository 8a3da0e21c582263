//! Character Module
//!
//! Third-person character locomotion: input is resolved into a
//! [`MovementIntent`], the intent picks one [`LocomotionState`], state
//! changes become crossfades, and moving states issue camera-relative
//! velocity commands to a physics body.
//!
//! # Components
//!
//! - [`CharacterController`] - the per-frame locomotion state machine
//! - [`LocomotionConfig`] - speeds, turn rate and pose offsets
//! - [`plan_crossfade`] / [`apply_crossfade`] - pure transition planning
//!   and its execution against an animation clip set
//! - [`direction_offset`] - the 8-way camera-relative direction table

pub mod controller;
pub mod crossfade;
pub mod locomotion;

use std::fmt;

pub use controller::{CharacterController, CharacterPose, LocomotionConfig};
pub use crossfade::{ClipCommand, Crossfade, apply_crossfade, plan_crossfade};
pub use locomotion::{Gait, LocomotionState, MovementIntent, direction_offset};

/// Errors raised by the character controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterError {
    /// The clip set has no clip for this state. Content must be validated
    /// before the controller runs; this is never retried.
    MissingClip(LocomotionState),
}

impl fmt::Display for CharacterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterError::MissingClip(state) => {
                write!(f, "missing animation clip '{}'", state.clip_name())
            }
        }
    }
}

impl std::error::Error for CharacterError {}

//! Locomotion state and per-frame movement intent.
//!
//! # Direction offsets
//!
//! The offset is the angle (about +Y) applied to the flattened camera
//! forward vector to get the world movement direction. It is keyed by the
//! raw flags, where `down`/`up` are the backward/forward bindings:
//!
//! | down | up | left | right | offset        |
//! |------|----|------|-------|---------------|
//! |      |    |      |       | 0             |
//! | x    |    |      | x     | π/4           |
//! | x    |    | x    |       | -π/4          |
//! |      | x  |      | x     | π/4 + π/2     |
//! |      | x  | x    |       | -π/4 - π/2    |
//! |      | x  |      |       | π             |
//! |      |    |      | x     | π/2           |
//! |      |    | x    |       | -π/2          |
//!
//! `down` is checked before `up`, and `right` before `left` within each
//! branch. Because the controller moves along `-direction`, the forward key
//! (offset π) walks away from the camera.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::DirectionFlags;

/// Discrete gait driving animation and movement. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LocomotionState {
    #[default]
    Idle,
    Walk,
    Run,
}

impl LocomotionState {
    /// Name of the animation clip backing this state.
    pub fn clip_name(self) -> &'static str {
        match self {
            LocomotionState::Idle => "Idle",
            LocomotionState::Walk => "Walk",
            LocomotionState::Run => "Run",
        }
    }

    /// Walk and Run translate the character; Idle does not.
    #[inline]
    pub fn is_moving(self) -> bool {
        matches!(self, LocomotionState::Walk | LocomotionState::Run)
    }
}

impl fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.clip_name())
    }
}

/// Gait requested while a direction is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gait {
    Walk,
    Run,
}

impl From<Gait> for LocomotionState {
    fn from(gait: Gait) -> Self {
        match gait {
            Gait::Walk => LocomotionState::Walk,
            Gait::Run => LocomotionState::Run,
        }
    }
}

/// Movement intent derived from input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementIntent {
    /// Any of the four direction bindings held
    pub direction_pressed: bool,
    /// Gait picked by the run toggle
    pub requested_gait: Gait,
    /// Radians, see the module table
    pub direction_offset: f32,
}

impl Default for MovementIntent {
    fn default() -> Self {
        Self {
            direction_pressed: false,
            requested_gait: Gait::Walk,
            direction_offset: 0.0,
        }
    }
}

impl MovementIntent {
    pub fn resolve(flags: DirectionFlags, toggle_run: bool) -> Self {
        Self {
            direction_pressed: flags.any(),
            requested_gait: if toggle_run { Gait::Run } else { Gait::Walk },
            direction_offset: direction_offset(flags),
        }
    }

    /// The state this intent asks for. Total: always exactly one state.
    pub fn desired_state(&self) -> LocomotionState {
        if self.direction_pressed {
            self.requested_gait.into()
        } else {
            LocomotionState::Idle
        }
    }
}

/// Look up the movement angle for the raw direction flags.
pub fn direction_offset(flags: DirectionFlags) -> f32 {
    if flags.down {
        if flags.right {
            FRAC_PI_4
        } else if flags.left {
            -FRAC_PI_4
        } else {
            0.0
        }
    } else if flags.up {
        if flags.right {
            FRAC_PI_4 + FRAC_PI_2
        } else if flags.left {
            -FRAC_PI_4 - FRAC_PI_2
        } else {
            PI
        }
    } else if flags.right {
        FRAC_PI_2
    } else if flags.left {
        -FRAC_PI_2
    } else {
        0.0
    }
}

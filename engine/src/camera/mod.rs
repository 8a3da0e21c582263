//! Camera Module
//!
//! Camera transform, orbit target and the standalone third-person follow
//! rig. This module is window-system agnostic - it only deals with camera
//! state and math.
//!
//! Two wiring modes drive the camera and they never run together:
//! - [`CameraWiring::CharacterFollow`] - the character controller shifts the
//!   camera with the character and points the orbit target at it (default)
//! - [`CameraWiring::ThirdPerson`] - a [`ThirdPersonCamera`] owns the camera

pub mod scene_camera;
pub mod third_person;

pub use scene_camera::{OrbitControl, SceneCamera};
pub use third_person::{ThirdPersonCamera, ThirdPersonConfig};

/// Which component writes the camera transform each tick.
#[derive(Clone, Debug, Default)]
pub enum CameraWiring {
    /// Character controller drives the orbit target.
    #[default]
    CharacterFollow,
    /// Smoothed third-person rig drives position and orbit target.
    ThirdPerson(ThirdPersonCamera),
}

impl CameraWiring {
    pub fn is_character_follow(&self) -> bool {
        matches!(self, CameraWiring::CharacterFollow)
    }
}

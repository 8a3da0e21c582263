//! Third-Person Camera
//!
//! Standalone follow camera: each update computes an ideal position and
//! look-at point from the followed transform, then moves the live camera a
//! fixed fraction of the way there.
//!
//! The smoothing fraction is `1 - decay_base^nominal_elapsed` with a fixed
//! nominal elapsed time, not the real frame delta. Responsiveness is
//! therefore constant per call and scales with frame rate.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::scene_camera::{OrbitControl, SceneCamera};
use crate::scene::Transform;

/// Tuning for [`ThirdPersonCamera`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThirdPersonConfig {
    /// Camera position in the target's local space (lateral, up, forward)
    pub offset: Vec3,
    /// Look-at point in the target's local space
    pub lookat: Vec3,
    /// Elapsed time fed to the smoothing curve on every call (seconds)
    pub nominal_elapsed: f32,
    /// Fraction of the remaining distance left after one second
    pub decay_base: f32,
}

impl Default for ThirdPersonConfig {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 20.0, -50.0),
            lookat: Vec3::new(0.0, 0.0, 30.0),
            nominal_elapsed: 0.1,
            decay_base: 0.001,
        }
    }
}

/// Exponentially smoothed follow camera.
#[derive(Clone, Debug)]
pub struct ThirdPersonCamera {
    config: ThirdPersonConfig,
    current_position: Vec3,
    current_lookat: Vec3,
}

impl ThirdPersonCamera {
    /// Create the rig with default tuning. The camera is immediately aimed
    /// at the orbit control's target.
    pub fn new(camera: &mut SceneCamera, orbit: &OrbitControl) -> Self {
        Self::with_config(ThirdPersonConfig::default(), camera, orbit)
    }

    pub fn with_config(config: ThirdPersonConfig, camera: &mut SceneCamera, orbit: &OrbitControl) -> Self {
        camera.look_at(orbit.target);
        Self {
            config,
            current_position: Vec3::ZERO,
            current_lookat: Vec3::ZERO,
        }
    }

    pub fn config(&self) -> &ThirdPersonConfig {
        &self.config
    }

    /// Smoothed camera position.
    pub fn current_position(&self) -> Vec3 {
        self.current_position
    }

    /// Smoothed look-at point.
    pub fn current_lookat(&self) -> Vec3 {
        self.current_lookat
    }

    /// Lerp factor applied on every update.
    #[inline]
    pub fn smoothing_factor(&self) -> f32 {
        1.0 - self.config.decay_base.powf(self.config.nominal_elapsed)
    }

    /// Unsmoothed camera position for `target`.
    pub fn ideal_offset(&self, target: &Transform) -> Vec3 {
        target.transform_point(self.config.offset)
    }

    /// Unsmoothed look-at point for `target`.
    pub fn ideal_lookat(&self, target: &Transform) -> Vec3 {
        target.transform_point(self.config.lookat)
    }

    /// Move the smoothed state toward the ideal pose and apply it to the
    /// camera and orbit control.
    pub fn update(&mut self, target: &Transform, camera: &mut SceneCamera, orbit: &mut OrbitControl) {
        let ideal_offset = self.ideal_offset(target);
        let ideal_lookat = self.ideal_lookat(target);

        let t = self.smoothing_factor();
        self.current_position = self.current_position.lerp(ideal_offset, t);
        self.current_lookat = self.current_lookat.lerp(ideal_lookat, t);

        camera.position = self.current_position;
        camera.look_at(self.current_lookat);
        orbit.target = self.current_lookat;
    }
}

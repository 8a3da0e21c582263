//! Scene camera transform and orbit target
//!
//! The camera looks down its local -Z axis, +Y up. This is window-system
//! agnostic; projection parameters belong to the renderer.

use glam::{Mat3, Quat, Vec3};

/// World-space camera transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCamera {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 5.0),
            rotation: Quat::IDENTITY,
        }
    }
}

impl SceneCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at `position` already aimed at `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self {
            position,
            rotation: Quat::IDENTITY,
        };
        camera.look_at(target);
        camera
    }

    /// Rotate the camera so its -Z axis points at `target`.
    ///
    /// When `target` coincides with the camera position the rotation is
    /// left unchanged. Looking straight up or down nudges the basis off the
    /// pole so the result stays well defined.
    pub fn look_at(&mut self, target: Vec3) {
        let mut z = self.position - target;
        if z.length_squared() < f32::EPSILON {
            return;
        }
        z = z.normalize();

        let mut x = Vec3::Y.cross(z);
        if x.length_squared() < f32::EPSILON {
            z.z += 0.0001;
            z = z.normalize();
            x = Vec3::Y.cross(z);
        }
        x = x.normalize();
        let y = z.cross(x);

        self.rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize();
    }

    /// Direction the camera faces in world space (normalized).
    #[inline]
    pub fn world_direction(&self) -> Vec3 {
        (self.rotation * Vec3::NEG_Z).normalize()
    }
}

/// Orbit-style control: the point the camera orbits and looks at.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrbitControl {
    pub target: Vec3,
}

impl OrbitControl {
    pub fn new(target: Vec3) -> Self {
        Self { target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rotation_faces_neg_z() {
        let camera = SceneCamera::new();
        let dir = camera.world_direction();
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_look_at_points_direction_at_target() {
        let mut camera = SceneCamera::new();
        camera.position = Vec3::new(0.0, 10.0, 10.0);
        camera.look_at(Vec3::ZERO);

        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((camera.world_direction() - expected).length() < 1e-5);
    }

    #[test]
    fn test_look_at_keeps_horizon_level() {
        let camera = SceneCamera::looking_at(Vec3::new(3.0, 2.0, -4.0), Vec3::new(-1.0, 0.0, 5.0));
        // Camera right axis stays in the horizontal plane
        let right = camera.rotation * Vec3::X;
        assert!(right.y.abs() < 1e-5);
    }

    #[test]
    fn test_look_at_same_point_is_noop() {
        let mut camera = SceneCamera::new();
        let before = camera.rotation;
        camera.look_at(camera.position);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_look_straight_down_is_finite() {
        let mut camera = SceneCamera::new();
        camera.position = Vec3::new(0.0, 10.0, 0.0);
        camera.look_at(Vec3::ZERO);
        let dir = camera.world_direction();
        assert!(dir.is_finite());
        assert!(dir.y < -0.99);
    }
}

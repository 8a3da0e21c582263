//! Physics collaborator contracts
//!
//! The locomotion core never owns a physics engine. It only issues velocity
//! commands to a body and reads its position back, and the tick loop steps
//! the world once per frame.

use super::types::{BodyHandle, Vec3};

/// A rigid body the character controller drives.
///
/// Position is owned by the physics engine. Controllers only write
/// velocities and read position.
pub trait PhysicsBody {
    /// Current world-space position.
    fn position(&self) -> Vec3;

    /// Current linear velocity.
    fn velocity(&self) -> Vec3;

    /// Set linear velocity in world space (units per second).
    fn set_velocity(&mut self, velocity: Vec3);

    /// Set angular velocity (radians per second about each axis).
    fn set_angular_velocity(&mut self, angular: Vec3);
}

/// The physics world stepped by the tick loop.
pub trait PhysicsWorld {
    /// Advance the simulation. `delta_ms` is already clamped and scaled by
    /// the caller.
    fn update(&mut self, delta_ms: f32);

    /// Refresh any debug geometry mirroring the bodies. No-op by default.
    fn update_debug_visualization(&mut self) {}

    /// Look up a body by handle.
    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut dyn PhysicsBody>;

    /// Immutable body lookup.
    fn body(&self, handle: BodyHandle) -> Option<&dyn PhysicsBody>;
}

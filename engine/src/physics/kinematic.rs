//! Kinematic reference world
//!
//! A minimal stand-in for a real physics engine: bodies integrate their
//! linear velocity and nothing else. Optional z bounds act as walls so a
//! body pushed into them stops moving, which is what the controller's stuck
//! detection watches for.
//!
//! # Unit System
//!
//! Velocities are in units per second; [`KinematicWorld::update`] takes
//! milliseconds, matching what the tick loop hands to any physics world.

use super::body::{PhysicsBody, PhysicsWorld};
use super::types::{BodyHandle, Vec3};

/// A body that moves by integrating velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    position: Vec3,
    velocity: Vec3,
    angular_velocity: Vec3,
    /// Inclusive (min, max) range the body's z may occupy.
    z_bounds: Option<(f32, f32)>,
}

impl KinematicBody {
    /// Create a resting body at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            z_bounds: None,
        }
    }

    /// Confine the body's z coordinate between two walls.
    pub fn with_z_bounds(mut self, min: f32, max: f32) -> Self {
        self.z_bounds = Some((min.min(max), min.max(max)));
        self
    }

    /// Current angular velocity (recorded, not integrated).
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Teleport the body.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn integrate(&mut self, dt_seconds: f32) {
        self.position += self.velocity * dt_seconds;
        if let Some((min, max)) = self.z_bounds {
            if self.position.z < min || self.position.z > max {
                self.position.z = self.position.z.clamp(min, max);
                self.velocity.z = 0.0;
            }
        }
    }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, angular: Vec3) {
        self.angular_velocity = angular;
    }
}

/// Collection of kinematic bodies stepped together.
#[derive(Debug, Clone, Default)]
pub struct KinematicWorld {
    bodies: Vec<KinematicBody>,
    /// Total simulated time in milliseconds
    elapsed_ms: f64,
    /// Number of debug visualization refreshes requested
    debug_refreshes: u64,
}

impl KinematicWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body and return its handle.
    pub fn add_body(&mut self, body: KinematicBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle((self.bodies.len() - 1) as u32)
    }

    /// Concrete body access (tests and demos inspect angular velocity etc.).
    pub fn kinematic_body(&self, handle: BodyHandle) -> Option<&KinematicBody> {
        self.bodies.get(handle.0 as usize)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn debug_refreshes(&self) -> u64 {
        self.debug_refreshes
    }
}

impl PhysicsWorld for KinematicWorld {
    fn update(&mut self, delta_ms: f32) {
        if delta_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += delta_ms as f64;
        let dt = delta_ms / 1000.0;
        for body in &mut self.bodies {
            body.integrate(dt);
        }
    }

    fn update_debug_visualization(&mut self) {
        self.debug_refreshes += 1;
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut dyn PhysicsBody> {
        self.bodies
            .get_mut(handle.0 as usize)
            .map(|body| body as &mut dyn PhysicsBody)
    }

    fn body(&self, handle: BodyHandle) -> Option<&dyn PhysicsBody> {
        self.bodies
            .get(handle.0 as usize)
            .map(|body| body as &dyn PhysicsBody)
    }
}

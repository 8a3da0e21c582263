//! Physics module
//!
//! Contracts the locomotion core consumes from a physics engine, plus a
//! small kinematic world used by the demo and the tests.
//!
//! # Unit System
//!
//! - Distances in world units (1 unit = 1 meter)
//! - Velocities in units per second
//! - World step deltas in milliseconds
//!
//! # Submodules
//!
//! - [`types`] - glam re-exports and [`BodyHandle`]
//! - [`body`] - [`PhysicsBody`] and [`PhysicsWorld`] traits
//! - [`kinematic`] - velocity-integrating reference world

pub mod body;
pub mod kinematic;
pub mod types;

pub use body::{PhysicsBody, PhysicsWorld};
pub use kinematic::{KinematicBody, KinematicWorld};
pub use types::{BodyHandle, Quat, Vec3};

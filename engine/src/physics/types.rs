//! Physics type re-exports from glam
//!
//! Bodies and the world speak glam vectors; hosts wrapping another engine
//! convert at the trait boundary.

pub use glam::{Quat, Vec3};

/// Opaque handle identifying a body inside a [`super::PhysicsWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl std::fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

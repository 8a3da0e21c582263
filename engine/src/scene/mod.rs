//! Scene Module
//!
//! Entities the tick loop renders and animates. Each entity carries an
//! explicit [`EntityKind`] with the fields that kind needs, so nothing is
//! bolted onto a generic object after construction.

pub mod transform;

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub use transform::Transform;

/// Vertical distance a spring entity rises per tick.
pub const DEFAULT_SPRING_RISE: f32 = 0.01;

/// Stable identifier of a scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Collision proxy shape for bounding volumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundingShape {
    Box { half_extents: Vec3 },
    Sphere { radius: f32 },
}

/// What an entity is, with the per-variant data it needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    /// The rendered character model, mirrored from the character controller.
    Character,
    /// Static scenery.
    Prop { draggable: bool },
    /// Procedurally animated platform rising a fixed amount every tick.
    Spring { rise_per_tick: f32 },
    /// Invisible collision proxy wrapped around a loaded model.
    BoundingVolume { shape: BoundingShape, draggable: bool },
}

impl EntityKind {
    /// Spring with the default per-tick rise.
    pub fn spring() -> Self {
        EntityKind::Spring {
            rise_per_tick: DEFAULT_SPRING_RISE,
        }
    }

    pub fn is_draggable(&self) -> bool {
        match self {
            EntityKind::Prop { draggable } | EntityKind::BoundingVolume { draggable, .. } => {
                *draggable
            }
            EntityKind::Character | EntityKind::Spring { .. } => false,
        }
    }

    /// Whether the tick loop moves this entity on its own.
    pub fn is_procedurally_animated(&self) -> bool {
        matches!(self, EntityKind::Spring { .. })
    }
}

/// A named object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntity {
    pub id: EntityId,
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: EntityKind,
}

/// Ordered entity storage.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<SceneEntity>,
    next_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity and return its id. Bounding volumes start hidden.
    pub fn spawn(&mut self, name: impl Into<String>, transform: Transform, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(SceneEntity {
            id,
            name: name.into(),
            transform,
            visible: !matches!(kind, EntityKind::BoundingVolume { .. }),
            kind,
        });
        id
    }

    /// Remove an entity, returning it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<SceneEntity> {
        let index = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// First entity with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Copy the character pose onto every [`EntityKind::Character`] entity.
    pub fn sync_character(&mut self, pose: &Transform) {
        for entity in &mut self.entities {
            if entity.kind == EntityKind::Character {
                entity.transform = *pose;
            }
        }
    }

    /// Step procedurally animated entities by one tick. Returns how many moved.
    pub fn advance_animated(&mut self) -> usize {
        let mut moved = 0;
        for entity in &mut self.entities {
            if let EntityKind::Spring { rise_per_tick } = entity.kind {
                entity.transform.position.y += rise_per_tick;
                moved += 1;
            }
        }
        moved
    }
}

//! Stride Engine Library
//!
//! Third-person character locomotion driven by a per-frame tick loop.
//! Input picks one locomotion state, state changes crossfade animation
//! clips, moving states push camera-relative velocity to a physics body,
//! and a fixed-order tick sequences physics, character, scene and render.
//!
//! # Modules
//!
//! - [`input`] - Key state, key bindings and direction flags
//! - [`character`] - Locomotion state machine, crossfades and velocity commands
//! - [`animation`] - Animation clip contracts and a reference mixer
//! - [`physics`] - Physics body/world contracts and a kinematic reference world
//! - [`camera`] - Scene camera, orbit target and the third-person follow rig
//! - [`scene`] - Entities sharing the scene with the character
//! - [`tick`] - The frame loop, its broadcast and host collaborator traits
//! - [`config`] - JSON configuration for all of the above
//!
//! # Example
//!
//! ```ignore
//! use stride_engine::animation::ClipMixer;
//! use stride_engine::character::CharacterController;
//! use stride_engine::physics::{KinematicBody, KinematicWorld};
//! use stride_engine::tick::{FixedStepSource, TickOrchestrator};
//! use stride_engine::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let mut world = KinematicWorld::new();
//! let body = world.add_body(KinematicBody::new(Vec3::new(0.0, 2.0, 1.0)));
//!
//! let mut orchestrator = TickOrchestrator::new(Box::new(world), config.tick)
//!     .with_renderer(Box::new(my_renderer));
//! let controller = CharacterController::new(
//!     Box::new(ClipMixer::with_locomotion_clips()),
//!     config.locomotion,
//! )?;
//! orchestrator.attach_character(controller, body);
//!
//! orchestrator.input_mut().press(KeyCode::ArrowUp);
//! orchestrator.run(&mut FixedStepSource::new(16.0, 16.0, 600))?;
//! ```

pub mod animation;
pub mod camera;
pub mod character;
pub mod config;
pub mod input;
pub mod physics;
pub mod scene;
pub mod tick;

// Re-export commonly used types at crate level for convenience
pub use character::{CharacterController, CharacterError, LocomotionConfig, LocomotionState};
pub use config::{ConfigError, EngineConfig};
pub use input::{InputAction, InputState, KeyBindings, KeyCode};
pub use tick::{TickConfig, TickError, TickFrame, TickOrchestrator};

//! Tick Orchestrator
//!
//! Drives one frame of the scene per call, always in this order:
//!
//! 1. Measure the raw delta and clamp it to `[0, max_delta_ms]`
//! 2. Step physics by `clamped * physics_time_scale` and refresh its debug view
//! 3. Update the character controller with the fixed `character_delta`
//!    (not the measured delta), then the third-person rig if it owns the camera
//! 4. Advance procedurally animated scene entities
//! 5. Record fps and the timestamp for the next delta
//! 6. Render
//! 7. Broadcast a [`TickFrame`]
//! 8. Update the performance overlay
//!
//! The loop is single-threaded and synchronous. It re-enters only when the
//! host's frame driver delivers the next frame.

use std::fmt;

use log::{info, trace, warn};
use serde::{Deserialize, Serialize};

use super::bus::TickBus;
use super::frame::{FrameHandle, TickFrame};
use super::host::{FrameSource, FrameStats, Renderer};
use crate::camera::{CameraWiring, OrbitControl, SceneCamera, ThirdPersonCamera, ThirdPersonConfig};
use crate::character::{CharacterController, CharacterError};
use crate::input::{InputAction, InputState};
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::scene::Scene;

/// Upper bound on the per-tick delta, in milliseconds
pub const MAX_DELTA_MS: f64 = 100.0;

/// Physics steps this many milliseconds per rendered millisecond
pub const PHYSICS_TIME_SCALE: f64 = 3.0;

/// Delta handed to the character controller on every tick, regardless of
/// the measured frame time
pub const CHARACTER_DELTA: f32 = 0.01;

/// Timing configuration for [`TickOrchestrator`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    pub max_delta_ms: f64,
    pub physics_time_scale: f64,
    pub character_delta: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            max_delta_ms: MAX_DELTA_MS,
            physics_time_scale: PHYSICS_TIME_SCALE,
            character_delta: CHARACTER_DELTA,
        }
    }
}

/// Lifecycle of the loop. Teardown belongs to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Idle,
    Running,
}

/// Errors raised while starting or running the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum TickError {
    /// `start` was called without a renderer.
    MissingRenderer,
    /// `tick` was called before `start`.
    NotRunning,
    /// The attached character's body is not in the physics world.
    MissingBody(BodyHandle),
    Character(CharacterError),
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::MissingRenderer => {
                write!(f, "updating frame failed: uninitialized renderer")
            }
            TickError::NotRunning => write!(f, "tick loop has not been started"),
            TickError::MissingBody(handle) => {
                write!(f, "character {handle} is not in the physics world")
            }
            TickError::Character(e) => write!(f, "character update failed: {e}"),
        }
    }
}

impl std::error::Error for TickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TickError::Character(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CharacterError> for TickError {
    fn from(e: CharacterError) -> Self {
        TickError::Character(e)
    }
}

/// Character controller plus the body it drives.
#[derive(Debug)]
struct CharacterSlot {
    controller: CharacterController,
    body: BodyHandle,
}

/// Frame loop sequencing physics, character, animated entities, render and
/// the tick broadcast.
pub struct TickOrchestrator {
    config: TickConfig,
    state: LoopState,
    last_timestamp: f64,
    fps: f64,
    ticks: u64,
    physics: Box<dyn PhysicsWorld>,
    renderer: Option<Box<dyn Renderer>>,
    stats: Option<Box<dyn FrameStats>>,
    character: Option<CharacterSlot>,
    camera: SceneCamera,
    orbit: OrbitControl,
    wiring: CameraWiring,
    scene: Scene,
    input: InputState,
    bus: TickBus,
}

impl fmt::Debug for TickOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickOrchestrator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("last_timestamp", &self.last_timestamp)
            .field("ticks", &self.ticks)
            .field("character", &self.character)
            .field("wiring", &self.wiring)
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}

impl TickOrchestrator {
    pub fn new(physics: Box<dyn PhysicsWorld>, config: TickConfig) -> Self {
        Self {
            config,
            state: LoopState::Idle,
            last_timestamp: 0.0,
            fps: 0.0,
            ticks: 0,
            physics,
            renderer: None,
            stats: None,
            character: None,
            camera: SceneCamera::default(),
            orbit: OrbitControl::default(),
            wiring: CameraWiring::CharacterFollow,
            scene: Scene::new(),
            input: InputState::new(),
            bus: TickBus::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_stats(mut self, stats: Box<dyn FrameStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    pub fn with_camera(mut self, camera: SceneCamera, orbit: OrbitControl) -> Self {
        self.camera = camera;
        self.orbit = orbit;
        self
    }

    pub fn with_input(mut self, input: InputState) -> Self {
        self.input = input;
        self
    }

    /// Attach the character and the physics body it drives. In follow
    /// wiring the orbit target is pointed at the character immediately.
    pub fn attach_character(&mut self, controller: CharacterController, body: BodyHandle) {
        if self.wiring.is_character_follow() {
            controller.attach_orbit(&mut self.orbit);
        }
        self.character = Some(CharacterSlot { controller, body });
    }

    /// Choose which component writes the camera.
    pub fn set_camera_wiring(&mut self, wiring: CameraWiring) {
        self.wiring = wiring;
        if let (CameraWiring::CharacterFollow, Some(slot)) = (&self.wiring, &self.character) {
            slot.controller.attach_orbit(&mut self.orbit);
        }
    }

    /// Hand the camera to a [`ThirdPersonCamera`] built against the current
    /// camera and orbit target.
    pub fn use_third_person_camera(&mut self, config: ThirdPersonConfig) {
        let rig = ThirdPersonCamera::with_config(config, &mut self.camera, &self.orbit);
        self.set_camera_wiring(CameraWiring::ThirdPerson(rig));
    }

    /// Enter the running state. Fails without a renderer.
    pub fn start(&mut self) -> Result<(), TickError> {
        if self.renderer.is_none() {
            return Err(TickError::MissingRenderer);
        }
        if self.state != LoopState::Running {
            info!("tick loop started");
            self.state = LoopState::Running;
        }
        Ok(())
    }

    /// Run one frame. Returns the record that was broadcast.
    ///
    /// A character error does not cut the frame short: physics, render,
    /// broadcast and stats all run and the timestamp advances before the
    /// error is returned.
    pub fn tick(&mut self, timestamp: f64, frame: Option<FrameHandle>) -> Result<TickFrame, TickError> {
        if self.state != LoopState::Running {
            return Err(TickError::NotRunning);
        }

        let time_diff = timestamp - self.last_timestamp;
        let time_diff_capped = time_diff.clamp(0.0, self.config.max_delta_ms);
        if time_diff != time_diff_capped {
            warn!("frame delta {time_diff:.1}ms clamped to {time_diff_capped:.1}ms");
        }

        self.physics
            .update((time_diff_capped * self.config.physics_time_scale) as f32);
        self.physics.update_debug_visualization();

        // A failed character step still completes the frame; the error is
        // returned once the tick has been broadcast.
        let character_step = self.step_character();

        self.scene.advance_animated();

        self.fps = 1000.0 / time_diff;
        self.last_timestamp = timestamp;

        let renderer = self.renderer.as_mut().ok_or(TickError::MissingRenderer)?;
        renderer.render(&self.scene, &self.camera);

        let tick_frame = TickFrame {
            timestamp,
            time_diff: time_diff_capped,
            fps: self.fps,
            frame,
        };
        self.bus.publish(&tick_frame);

        if let Some(stats) = self.stats.as_mut() {
            stats.update(&tick_frame);
        }

        self.ticks += 1;
        trace!("tick {} at {timestamp:.1}ms", self.ticks);
        character_step?;
        Ok(tick_frame)
    }

    /// Start the loop and pump frames until the source runs dry.
    /// Returns the number of ticks run.
    pub fn run(&mut self, source: &mut dyn FrameSource) -> Result<u64, TickError> {
        self.start()?;
        let mut count = 0;
        while let Some(request) = source.next_frame() {
            self.tick(request.timestamp, request.frame)?;
            count += 1;
        }
        Ok(count)
    }

    fn step_character(&mut self) -> Result<(), TickError> {
        let Some(slot) = self.character.as_mut() else {
            return Ok(());
        };

        if self.input.take_action_just_pressed(InputAction::ToggleRun) {
            slot.controller.switch_run_toggle();
        }

        let body = self
            .physics
            .body_mut(slot.body)
            .ok_or(TickError::MissingBody(slot.body))?;
        let orbit = match self.wiring {
            CameraWiring::CharacterFollow => Some(&mut self.orbit),
            CameraWiring::ThirdPerson(_) => None,
        };
        slot.controller.update(
            self.config.character_delta,
            &self.input,
            body,
            &mut self.camera,
            orbit,
        )?;

        let pose = *slot.controller.pose();
        self.scene.sync_character(&pose);

        if let CameraWiring::ThirdPerson(rig) = &mut self.wiring {
            rig.update(&pose, &mut self.camera, &mut self.orbit);
        }
        Ok(())
    }

    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_timestamp(&self) -> f64 {
        self.last_timestamp
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    pub fn orbit(&self) -> &OrbitControl {
        &self.orbit
    }

    pub fn camera_wiring(&self) -> &CameraWiring {
        &self.wiring
    }

    pub fn physics(&self) -> &dyn PhysicsWorld {
        self.physics.as_ref()
    }

    pub fn character(&self) -> Option<&CharacterController> {
        self.character.as_ref().map(|slot| &slot.controller)
    }

    pub fn character_mut(&mut self) -> Option<&mut CharacterController> {
        self.character.as_mut().map(|slot| &mut slot.controller)
    }

    pub fn bus_mut(&mut self) -> &mut TickBus {
        &mut self.bus
    }
}

//! Character Controller
//!
//! Per-frame locomotion state machine for a physics-driven character.
//! Movement direction is relative to the camera.
//!
//! # Frame Sequence
//!
//! 1. Mirror the physics body position onto the rendered model
//!    (y lowered by the model-to-collider pivot offset)
//! 2. Resolve input into a [`MovementIntent`] and a desired state
//! 3. Crossfade clips when the state changes
//! 4. Advance the animation clock by `delta * animation_time_scale`
//! 5. Moving states turn the model toward the camera-relative heading, set
//!    the body velocity and drag the follow camera along; Idle zeroes the
//!    body velocity every frame
//!
//! # Usage
//!
//! ```rust,ignore
//! use stride_engine::animation::ClipMixer;
//! use stride_engine::character::{CharacterController, LocomotionConfig};
//!
//! let mut controller =
//!     CharacterController::new(Box::new(ClipMixer::with_locomotion_clips()), LocomotionConfig::default())?;
//!
//! // Each frame:
//! controller.update(0.01, &input, body, &mut camera, Some(&mut orbit))?;
//! ```

use glam::{Quat, Vec3};
use log::debug;
use serde::{Deserialize, Serialize};

use super::CharacterError;
use super::crossfade::{apply_crossfade, plan_crossfade};
use super::locomotion::{LocomotionState, MovementIntent};
use crate::animation::AnimationClipSet;
use crate::camera::{OrbitControl, SceneCamera};
use crate::input::InputState;
use crate::physics::PhysicsBody;
use crate::scene::Transform;

/// Run speed in units per second
pub const RUN_VELOCITY: f32 = 5.0;

/// Walk speed in units per second
pub const WALK_VELOCITY: f32 = 2.0;

/// Animation clock multiplier applied to every update delta
pub const ANIMATION_TIME_SCALE: f32 = 1.5;

/// Model origin sits this far below the collider origin
pub const VERTICAL_OFFSET: f32 = 2.0;

/// Maximum model turn per update, in radians
pub const TURN_STEP: f32 = 0.05;

/// Rendered model transform.
pub type CharacterPose = Transform;

/// Tuning for [`CharacterController`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub run_velocity: f32,
    pub walk_velocity: f32,
    /// Crossfade duration in seconds (0 = hard cut)
    pub fade_duration: f32,
    pub animation_time_scale: f32,
    pub vertical_offset: f32,
    pub turn_step: f32,
    /// Height of the orbit target above the model origin
    pub camera_target_height: f32,
    /// Body z positions closer than this count as "not moved"
    pub stuck_precision: f32,
    /// Whether the controller starts in run mode
    pub initial_toggle_run: bool,
    /// Model position before the first update
    pub initial_position: Vec3,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            run_velocity: RUN_VELOCITY,
            walk_velocity: WALK_VELOCITY,
            fade_duration: 0.0,
            animation_time_scale: ANIMATION_TIME_SCALE,
            vertical_offset: VERTICAL_OFFSET,
            turn_step: TURN_STEP,
            camera_target_height: 1.0,
            stuck_precision: 1e-3,
            initial_toggle_run: true,
            initial_position: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

impl LocomotionConfig {
    /// Body speed for a state. Idle does not move.
    pub fn speed_for(&self, state: LocomotionState) -> f32 {
        match state {
            LocomotionState::Run => self.run_velocity,
            LocomotionState::Walk => self.walk_velocity,
            LocomotionState::Idle => 0.0,
        }
    }
}

/// Locomotion state machine driving a physics body, an animation clip set
/// and the follow camera.
pub struct CharacterController {
    config: LocomotionConfig,
    clips: Box<dyn AnimationClipSet>,
    state: LocomotionState,
    toggle_run: bool,
    pose: CharacterPose,
    /// Orbit target the follow camera looks at
    camera_target: Vec3,
    /// Body z from the previous moving frame, for stuck detection
    prev_z: f32,
    last_intent: MovementIntent,
}

impl std::fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterController")
            .field("state", &self.state)
            .field("toggle_run", &self.toggle_run)
            .field("pose", &self.pose)
            .field("camera_target", &self.camera_target)
            .finish_non_exhaustive()
    }
}

impl CharacterController {
    /// Create a controller in the Idle state and start the Idle clip.
    pub fn new(
        mut clips: Box<dyn AnimationClipSet>,
        config: LocomotionConfig,
    ) -> Result<Self, CharacterError> {
        let initial = LocomotionState::Idle;
        clips
            .clip_mut(initial.clip_name())
            .ok_or(CharacterError::MissingClip(initial))?
            .play();

        let pose = CharacterPose::from_position(config.initial_position);
        Ok(Self {
            camera_target: pose.position + Vec3::Y * config.camera_target_height,
            config,
            clips,
            state: initial,
            toggle_run: config.initial_toggle_run,
            pose,
            prev_z: 0.0,
            last_intent: MovementIntent::default(),
        })
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn state(&self) -> LocomotionState {
        self.state
    }

    pub fn pose(&self) -> &CharacterPose {
        &self.pose
    }

    pub fn camera_target(&self) -> Vec3 {
        self.camera_target
    }

    pub fn toggle_run(&self) -> bool {
        self.toggle_run
    }

    /// Intent resolved on the most recent update.
    pub fn last_intent(&self) -> &MovementIntent {
        &self.last_intent
    }

    pub fn clips(&self) -> &dyn AnimationClipSet {
        self.clips.as_ref()
    }

    /// Flip between walking and running.
    pub fn switch_run_toggle(&mut self) {
        self.toggle_run = !self.toggle_run;
    }

    /// Point the orbit control at the current follow target.
    pub fn attach_orbit(&self, orbit: &mut OrbitControl) {
        orbit.target = self.camera_target;
    }

    /// Advance the controller by one frame.
    ///
    /// `orbit` selects the camera wiring: with `Some`, the controller drags
    /// the camera along with the character and retargets the orbit control;
    /// with `None` the camera is only read (another rig owns it).
    pub fn update(
        &mut self,
        delta: f32,
        input: &InputState,
        body: &mut dyn PhysicsBody,
        camera: &mut SceneCamera,
        orbit: Option<&mut OrbitControl>,
    ) -> Result<(), CharacterError> {
        let body_position = body.position();
        self.pose.position = Vec3::new(
            body_position.x,
            body_position.y - self.config.vertical_offset,
            body_position.z,
        );

        let intent = MovementIntent::resolve(input.direction_flags(), self.toggle_run);
        self.last_intent = intent;
        let desired = intent.desired_state();

        if let Some(crossfade) = plan_crossfade(self.state, desired, self.config.fade_duration) {
            apply_crossfade(self.clips.as_mut(), &crossfade)?;
            debug!("locomotion {} -> {}", crossfade.from, crossfade.to);
            self.state = desired;
        }

        self.clips.advance(delta * self.config.animation_time_scale);

        if !self.state.is_moving() {
            body.set_velocity(Vec3::ZERO);
            body.set_angular_velocity(Vec3::ZERO);
            return Ok(());
        }

        // Heading from the camera toward the model, offset by input direction
        let camera_yaw = (camera.position.x - self.pose.position.x)
            .atan2(camera.position.z - self.pose.position.z);
        let heading = Quat::from_axis_angle(Vec3::Y, camera_yaw + intent.direction_offset);
        self.pose.rotation = rotate_towards(self.pose.rotation, heading, self.config.turn_step);

        let walk_direction = self.walk_direction(camera, intent.direction_offset);
        let speed = self.config.speed_for(self.state);
        let velocity = Vec3::new(walk_direction.x * -speed, 0.0, walk_direction.z * -speed);
        body.set_velocity(velocity);
        body.set_angular_velocity(Vec3::ZERO);

        let move_x = velocity.x * delta;
        let mut move_z = velocity.z * delta;
        if self.quantize(body_position.z) == self.quantize(self.prev_z) {
            // Blocked: keep the camera from drifting ahead of the body
            move_z = 0.0;
        }
        self.prev_z = body_position.z;

        self.update_camera_target(move_x, move_z, camera, orbit);
        Ok(())
    }

    /// Flattened camera forward rotated by `direction_offset` about +Y.
    fn walk_direction(&self, camera: &SceneCamera, direction_offset: f32) -> Vec3 {
        let mut forward = camera.world_direction();
        forward.y = 0.0;
        Quat::from_axis_angle(Vec3::Y, direction_offset) * forward.normalize_or_zero()
    }

    fn quantize(&self, value: f32) -> f32 {
        (value / self.config.stuck_precision).round()
    }

    fn update_camera_target(
        &mut self,
        move_x: f32,
        move_z: f32,
        camera: &mut SceneCamera,
        orbit: Option<&mut OrbitControl>,
    ) {
        self.camera_target = self.pose.position + Vec3::Y * self.config.camera_target_height;

        if let Some(orbit) = orbit {
            camera.position.x += move_x;
            camera.position.z += move_z;
            orbit.target = self.camera_target;
        }
    }
}

/// Spherically step `from` toward `to` by at most `max_angle` radians.
fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= f32::EPSILON {
        return from;
    }
    let t = (max_angle / angle).min(1.0);
    from.slerp(to, t).normalize()
}

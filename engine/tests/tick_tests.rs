//! Tick Tests - Frame Ordering, Delta Clamping and Broadcast
//!
//! Every collaborator appends to one shared event log so the test can check
//! the exact per-frame sequence.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use stride_engine::animation::ClipMixer;
use stride_engine::camera::{CameraWiring, OrbitControl, SceneCamera, ThirdPersonConfig};
use stride_engine::character::{
    CharacterController, CharacterError, LocomotionConfig, LocomotionState,
};
use stride_engine::input::KeyCode;
use stride_engine::physics::{BodyHandle, KinematicBody, KinematicWorld, PhysicsBody, PhysicsWorld};
use stride_engine::scene::{EntityKind, Scene, Transform};
use stride_engine::tick::{
    FixedStepSource, FrameHandle, FrameRequest, FrameStats, LoopState, Renderer, TickConfig,
    TickError, TickFrame, TickOrchestrator,
};

type EventLog = Rc<RefCell<Vec<String>>>;

// ============================================================================
// Recording collaborators
// ============================================================================

struct RecordingBody {
    position: Vec3,
    velocity: Vec3,
    log: EventLog,
}

impl PhysicsBody for RecordingBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.log.borrow_mut().push("body.set_velocity".into());
    }

    fn set_angular_velocity(&mut self, _angular: Vec3) {}
}

struct RecordingWorld {
    body: RecordingBody,
    deltas: Rc<RefCell<Vec<f32>>>,
    log: EventLog,
}

impl RecordingWorld {
    fn new(log: &EventLog, deltas: &Rc<RefCell<Vec<f32>>>) -> Self {
        Self {
            body: RecordingBody {
                position: Vec3::new(0.0, 2.0, 1.0),
                velocity: Vec3::ZERO,
                log: Rc::clone(log),
            },
            deltas: Rc::clone(deltas),
            log: Rc::clone(log),
        }
    }
}

impl PhysicsWorld for RecordingWorld {
    fn update(&mut self, delta_ms: f32) {
        self.deltas.borrow_mut().push(delta_ms);
        self.log.borrow_mut().push("physics.update".into());
    }

    fn update_debug_visualization(&mut self) {
        self.log.borrow_mut().push("physics.debug".into());
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut dyn PhysicsBody> {
        (handle == BodyHandle(0)).then_some(&mut self.body as &mut dyn PhysicsBody)
    }

    fn body(&self, handle: BodyHandle) -> Option<&dyn PhysicsBody> {
        (handle == BodyHandle(0)).then_some(&self.body as &dyn PhysicsBody)
    }
}

struct RecordingRenderer {
    log: EventLog,
    spring_heights: Rc<RefCell<Vec<f32>>>,
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, scene: &Scene, _camera: &SceneCamera) {
        self.log.borrow_mut().push("render".into());
        if let Some(spring) = scene.find_by_name("spring") {
            self.spring_heights.borrow_mut().push(spring.transform.position.y);
        }
    }
}

struct RecordingStats {
    log: EventLog,
}

impl FrameStats for RecordingStats {
    fn update(&mut self, _frame: &TickFrame) {
        self.log.borrow_mut().push("stats".into());
    }
}

struct Harness {
    orchestrator: TickOrchestrator,
    log: EventLog,
    deltas: Rc<RefCell<Vec<f32>>>,
    spring_heights: Rc<RefCell<Vec<f32>>>,
}

fn harness() -> Harness {
    let log: EventLog = Rc::default();
    let deltas: Rc<RefCell<Vec<f32>>> = Rc::default();
    let spring_heights: Rc<RefCell<Vec<f32>>> = Rc::default();

    let mut orchestrator = TickOrchestrator::new(
        Box::new(RecordingWorld::new(&log, &deltas)),
        TickConfig::default(),
    )
    .with_renderer(Box::new(RecordingRenderer {
        log: Rc::clone(&log),
        spring_heights: Rc::clone(&spring_heights),
    }))
    .with_stats(Box::new(RecordingStats { log: Rc::clone(&log) }));

    let sink = Rc::clone(&log);
    orchestrator
        .bus_mut()
        .add_listener(move |_: &TickFrame| sink.borrow_mut().push("broadcast".into()));

    Harness {
        orchestrator,
        log,
        deltas,
        spring_heights,
    }
}

fn controller() -> CharacterController {
    CharacterController::new(
        Box::new(ClipMixer::with_locomotion_clips()),
        LocomotionConfig::default(),
    )
    .unwrap()
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_start_requires_renderer() {
    let mut orchestrator =
        TickOrchestrator::new(Box::new(KinematicWorld::new()), TickConfig::default());
    assert_eq!(orchestrator.start(), Err(TickError::MissingRenderer));
    assert_eq!(orchestrator.state(), LoopState::Idle);
    assert_eq!(orchestrator.tick(16.0, None), Err(TickError::NotRunning));
}

#[test]
fn test_run_pumps_until_source_ends() {
    let mut h = harness();
    let mut source = FixedStepSource::new(16.0, 16.0, 10);

    assert_eq!(h.orchestrator.run(&mut source), Ok(10));
    assert_eq!(h.orchestrator.state(), LoopState::Running);
    assert_eq!(h.deltas.borrow().len(), 10);
}

#[test]
fn test_run_accepts_any_frame_iterator() {
    let mut h = harness();
    let mut frames = vec![FrameRequest::new(10.0), FrameRequest::new(30.0)].into_iter();

    assert_eq!(h.orchestrator.run(&mut frames), Ok(2));
    assert_eq!(h.orchestrator.last_timestamp(), 30.0);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_frame_sequence_order() {
    let mut h = harness();
    h.orchestrator.attach_character(controller(), BodyHandle(0));
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(16.0, None).unwrap();

    assert_eq!(
        *h.log.borrow(),
        vec![
            "physics.update",
            "physics.debug",
            "body.set_velocity",
            "render",
            "broadcast",
            "stats",
        ]
    );
}

#[test]
fn test_without_character_only_world_and_render_run() {
    let mut h = harness();
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(16.0, None).unwrap();

    assert_eq!(
        *h.log.borrow(),
        vec!["physics.update", "physics.debug", "render", "broadcast", "stats"]
    );
}

// ============================================================================
// Timing
// ============================================================================

#[test]
fn test_long_frame_is_clamped_before_physics() {
    let mut h = harness();
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(1000.0, None).unwrap();
    h.deltas.borrow_mut().clear();

    let frame = h.orchestrator.tick(1250.0, None).unwrap();

    assert_eq!(*h.deltas.borrow(), vec![300.0]);
    assert_eq!(frame.time_diff, 100.0);
    // fps reports the raw delta
    assert_eq!(frame.fps, 4.0);
}

#[test]
fn test_backwards_timestamp_steps_nothing() {
    let mut h = harness();
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(500.0, None).unwrap();
    let frame = h.orchestrator.tick(400.0, None).unwrap();

    assert_eq!(frame.time_diff, 0.0);
    assert_eq!(h.deltas.borrow().last(), Some(&0.0));
}

#[test]
fn test_repeated_timestamp_reports_infinite_fps() {
    let mut h = harness();
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(100.0, None).unwrap();
    let frame = h.orchestrator.tick(100.0, None).unwrap();

    assert_eq!(frame.time_diff, 0.0);
    assert!(frame.fps.is_infinite());
}

#[test]
fn test_character_uses_fixed_delta() {
    // A kinematic world lets the body actually move
    let mut world = KinematicWorld::new();
    let body = world.add_body(KinematicBody::new(Vec3::new(0.0, 2.0, 1.0)));
    let mut orchestrator = TickOrchestrator::new(Box::new(world), TickConfig::default())
        .with_renderer(Box::new(RecordingRenderer {
            log: Rc::default(),
            spring_heights: Rc::default(),
        }))
        .with_camera(
            SceneCamera::looking_at(Vec3::new(0.0, 5.0, -5.0), Vec3::new(0.0, 0.0, 1.0)),
            OrbitControl::default(),
        );
    orchestrator.attach_character(controller(), body);
    orchestrator.input_mut().press(KeyCode::ArrowUp);
    orchestrator.start().unwrap();

    // Short and long frames move the follow camera by the same amount
    let z0 = orchestrator.camera().position.z;
    orchestrator.tick(5.0, None).unwrap();
    let z1 = orchestrator.camera().position.z;
    orchestrator.tick(95.0, None).unwrap();
    let z2 = orchestrator.camera().position.z;

    assert!((z1 - z0 - 0.05).abs() < 1e-4);
    assert!((z2 - z1 - 0.05).abs() < 1e-4);
}

// ============================================================================
// Broadcast
// ============================================================================

#[test]
fn test_broadcast_payload() {
    let mut h = harness();
    let rx = h.orchestrator.bus_mut().subscribe();
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(20.0, Some(FrameHandle(3))).unwrap();
    h.orchestrator.tick(36.0, None).unwrap();

    let frames: Vec<TickFrame> = rx.try_iter().collect();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].timestamp, 20.0);
    assert_eq!(frames[0].time_diff, 20.0);
    assert_eq!(frames[0].fps, 50.0);
    assert_eq!(frames[0].frame, Some(FrameHandle(3)));
    assert_eq!(frames[1].time_diff, 16.0);
    assert_eq!(frames[1].frame, None);
}

// ============================================================================
// Character wiring
// ============================================================================

#[test]
fn test_missing_body_is_reported() {
    let mut h = harness();
    h.orchestrator.attach_character(controller(), BodyHandle(7));
    h.orchestrator.start().unwrap();

    assert_eq!(
        h.orchestrator.tick(16.0, None),
        Err(TickError::MissingBody(BodyHandle(7)))
    );
}

#[test]
fn test_character_error_still_completes_frame() {
    let mut h = harness();
    let timestamps: Rc<RefCell<Vec<f64>>> = Rc::default();
    let sink = Rc::clone(&timestamps);
    h.orchestrator
        .bus_mut()
        .add_listener(move |f: &TickFrame| sink.borrow_mut().push(f.timestamp));

    let mut mixer = ClipMixer::new();
    mixer.add_clip("Idle", 2.0, true);
    mixer.add_clip("Walk", 1.0, true);
    let controller =
        CharacterController::new(Box::new(mixer), LocomotionConfig::default()).unwrap();
    h.orchestrator.attach_character(controller, BodyHandle(0));
    h.orchestrator.start().unwrap();

    h.orchestrator.tick(1000.0, None).unwrap();
    h.orchestrator.input_mut().press(KeyCode::ArrowUp);
    assert_eq!(
        h.orchestrator.tick(1050.0, None),
        Err(TickError::Character(CharacterError::MissingClip(LocomotionState::Run)))
    );
    assert_eq!(h.orchestrator.last_timestamp(), 1050.0);

    h.orchestrator.input_mut().release(KeyCode::ArrowUp);
    h.orchestrator.tick(1100.0, None).unwrap();

    // 100ms of host time steps physics by exactly 300ms after the first frame
    assert_eq!(*h.deltas.borrow(), vec![300.0, 150.0, 150.0]);
    assert_eq!(*timestamps.borrow(), vec![1000.0, 1050.0, 1100.0]);
    assert_eq!(h.orchestrator.ticks(), 3);
}

#[test]
fn test_toggle_key_edge_flips_run_once() {
    let mut h = harness();
    h.orchestrator.attach_character(controller(), BodyHandle(0));
    h.orchestrator.start().unwrap();
    h.orchestrator.input_mut().press(KeyCode::ArrowUp);
    h.orchestrator.input_mut().press(KeyCode::Shift);

    h.orchestrator.tick(16.0, None).unwrap();
    assert_eq!(h.orchestrator.character().unwrap().state(), LocomotionState::Walk);

    // Holding the key does not flip it again
    h.orchestrator.tick(32.0, None).unwrap();
    assert!(!h.orchestrator.character().unwrap().toggle_run());

    h.orchestrator.input_mut().release(KeyCode::Shift);
    h.orchestrator.input_mut().press(KeyCode::Shift);
    h.orchestrator.tick(48.0, None).unwrap();
    assert_eq!(h.orchestrator.character().unwrap().state(), LocomotionState::Run);
}

#[test]
fn test_character_entity_follows_pose() {
    let mut h = harness();
    h.orchestrator
        .scene_mut()
        .spawn("hero", Transform::IDENTITY, EntityKind::Character);
    h.orchestrator.attach_character(controller(), BodyHandle(0));
    h.orchestrator.start().unwrap();
    h.orchestrator.tick(16.0, None).unwrap();

    let hero = h.orchestrator.scene().find_by_name("hero").unwrap();
    assert_eq!(hero.transform.position, Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn test_attach_in_follow_mode_targets_character() {
    let mut h = harness();
    h.orchestrator.attach_character(controller(), BodyHandle(0));
    assert_eq!(h.orchestrator.orbit().target, Vec3::new(0.0, 1.0, 1.0));
}

#[test]
fn test_third_person_wiring_owns_camera() {
    let mut h = harness();
    h.orchestrator.attach_character(controller(), BodyHandle(0));
    h.orchestrator.use_third_person_camera(ThirdPersonConfig::default());
    assert!(!h.orchestrator.camera_wiring().is_character_follow());

    h.orchestrator.start().unwrap();
    h.orchestrator.tick(16.0, None).unwrap();

    let CameraWiring::ThirdPerson(rig) = h.orchestrator.camera_wiring() else {
        panic!("expected third-person wiring");
    };
    assert_eq!(h.orchestrator.camera().position, rig.current_position());
    assert_eq!(h.orchestrator.orbit().target, rig.current_lookat());
}

// ============================================================================
// Scene entities
// ============================================================================

#[test]
fn test_spring_rises_before_render() {
    let mut h = harness();
    h.orchestrator.scene_mut().spawn(
        "spring",
        Transform::from_position(Vec3::ZERO),
        EntityKind::spring(),
    );
    h.orchestrator.start().unwrap();
    for i in 1..=10 {
        h.orchestrator.tick(i as f64 * 16.0, None).unwrap();
    }

    let heights = h.spring_heights.borrow();
    assert!((heights[0] - 0.01).abs() < 1e-6);
    assert!((heights[9] - 0.1).abs() < 1e-5);
}

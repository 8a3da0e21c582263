//! Locomotion Demo - headless character run
//!
//! Run with: `cargo run --bin locomotion_demo -- --frames 600`
//!
//! Drives the full tick loop against the kinematic world and the reference
//! clip mixer with a scripted key timeline:
//! - frame 30: ArrowUp held (runs, the run toggle starts on)
//! - frame 120: Shift tapped (drops to a walk)
//! - frame 200: ArrowLeft held (forward-left)
//! - frame 260: all keys released (back to idle)
//!
//! Set `RUST_LOG=debug` to see every gait transition, `trace` for every tick.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec3;
use log::{error, info};

use stride_engine::animation::ClipMixer;
use stride_engine::camera::{OrbitControl, SceneCamera};
use stride_engine::character::CharacterController;
use stride_engine::physics::{KinematicBody, KinematicWorld};
use stride_engine::scene::{BoundingShape, EntityKind, Scene, Transform};
use stride_engine::tick::{
    FixedStepSource, FrameSource, FrameStats, Renderer, RollingFps, TickOrchestrator,
};
use stride_engine::{EngineConfig, InputState, KeyCode};

/// Headless third-person locomotion demo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 360)]
    frames: u64,

    /// Simulated frame time in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// JSON config file (partial files fall back to defaults)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Let the smoothed third-person rig drive the camera instead of the
    /// character follow camera
    #[arg(long)]
    third_person: bool,
}

/// Logs the character and camera every `every` frames.
struct LogRenderer {
    every: u64,
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, scene: &Scene, camera: &SceneCamera) {
        if self.frames % self.every == 0 {
            if let Some(hero) = scene.find_by_name("hero") {
                let p = hero.transform.position;
                info!(
                    "frame {:>4}: hero ({:.2}, {:.2}, {:.2}) yaw {:.2}, camera ({:.2}, {:.2}, {:.2})",
                    self.frames,
                    p.x,
                    p.y,
                    p.z,
                    hero.transform.yaw(),
                    camera.position.x,
                    camera.position.y,
                    camera.position.z,
                );
            }
        }
        self.frames += 1;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let mut world = KinematicWorld::new();
    let spawn = config.locomotion.initial_position + Vec3::Y * config.locomotion.vertical_offset;
    let body = world.add_body(KinematicBody::new(spawn).with_z_bounds(-25.0, 25.0));

    let mut scene = Scene::new();
    scene.spawn("hero", Transform::from_position(config.locomotion.initial_position), EntityKind::Character);
    scene.spawn("spring", Transform::from_position(Vec3::new(4.0, 0.0, 4.0)), EntityKind::spring());
    scene.spawn("crate", Transform::from_position(Vec3::new(-3.0, 0.0, 6.0)), EntityKind::Prop { draggable: true });
    scene.spawn(
        "crate_bounds",
        Transform::from_position(Vec3::new(-3.0, 0.0, 6.0)),
        EntityKind::BoundingVolume {
            shape: BoundingShape::Box {
                half_extents: Vec3::splat(0.5),
            },
            draggable: true,
        },
    );

    let camera = SceneCamera::looking_at(Vec3::new(0.0, 5.0, -5.0), config.locomotion.initial_position);
    let mut orchestrator = TickOrchestrator::new(Box::new(world), config.tick)
        .with_renderer(Box::new(LogRenderer { every: 30, frames: 0 }))
        .with_scene(scene)
        .with_camera(camera, OrbitControl::default())
        .with_input(InputState::with_bindings(config.key_bindings()));

    let controller = CharacterController::new(Box::new(ClipMixer::with_locomotion_clips()), config.locomotion)?;
    orchestrator.attach_character(controller, body);
    if cli.third_person {
        orchestrator.use_third_person_camera(config.third_person);
    }

    let ticks = orchestrator.bus_mut().subscribe();
    let mut source = FixedStepSource::new(cli.frame_ms, cli.frame_ms, cli.frames);

    let mut recent_fps = RollingFps::new(60);
    let mut overall_fps = RollingFps::new(cli.frames.max(1) as usize);

    orchestrator.start()?;
    let mut index = 0u64;
    while let Some(request) = source.next_frame() {
        script_input(&mut orchestrator, index);
        orchestrator.tick(request.timestamp, request.frame)?;
        index += 1;

        for frame in ticks.try_iter() {
            recent_fps.update(&frame);
            overall_fps.update(&frame);
        }
        if index % 60 == 0 {
            if let Some(fps) = recent_fps.average() {
                info!("frame {index:>4}: {fps:.1} fps over the last 60 ticks");
            }
        }
    }

    match overall_fps.average() {
        Some(fps) => info!("ran {} ticks, mean {fps:.1} fps", orchestrator.ticks()),
        None => info!("ran {} ticks", orchestrator.ticks()),
    }

    if let Some(character) = orchestrator.character() {
        info!(
            "final state {}, pose ({:.2}, {:.2}, {:.2})",
            character.state(),
            character.pose().position.x,
            character.pose().position.y,
            character.pose().position.z,
        );
    }
    if let Some(spring) = orchestrator.scene().find_by_name("spring") {
        info!("spring rose to y = {:.2}", spring.transform.position.y);
    }
    Ok(())
}

fn script_input(orchestrator: &mut TickOrchestrator, frame: u64) {
    let input = orchestrator.input_mut();
    match frame {
        30 => input.press(KeyCode::ArrowUp),
        120 => input.press(KeyCode::Shift),
        121 => input.release(KeyCode::Shift),
        200 => input.press(KeyCode::ArrowLeft),
        260 => {
            input.release(KeyCode::ArrowLeft);
            input.release(KeyCode::ArrowUp);
        }
        _ => {}
    }
}

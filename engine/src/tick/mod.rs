//! Tick Module
//!
//! The per-frame loop and what it talks to.
//!
//! - [`orchestrator`] - [`TickOrchestrator`], the fixed-order frame sequence
//! - [`frame`] - [`TickFrame`] records and [`FrameRequest`]s from the host
//! - [`bus`] - [`TickBus`] broadcast of every completed tick
//! - [`host`] - renderer, stats and frame-source traits the host implements

pub mod bus;
pub mod frame;
pub mod host;
pub mod orchestrator;

pub use bus::{TickBus, TickListener};
pub use frame::{FrameHandle, FrameRequest, TickFrame};
pub use host::{FixedStepSource, FrameSource, FrameStats, Renderer, RollingFps};
pub use orchestrator::{
    CHARACTER_DELTA, LoopState, MAX_DELTA_MS, PHYSICS_TIME_SCALE, TickConfig, TickError,
    TickOrchestrator,
};

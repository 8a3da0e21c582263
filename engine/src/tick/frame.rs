//! Per-frame timing records.

/// Opaque per-frame token handed over by the host (e.g. an XR frame id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// What the external per-frame driver delivers for each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRequest {
    /// Host clock in milliseconds
    pub timestamp: f64,
    pub frame: Option<FrameHandle>,
}

impl FrameRequest {
    pub fn new(timestamp: f64) -> Self {
        Self {
            timestamp,
            frame: None,
        }
    }
}

/// Immutable record broadcast after every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFrame {
    /// Host clock in milliseconds
    pub timestamp: f64,
    /// Milliseconds since the previous tick, clamped to the configured cap
    pub time_diff: f64,
    /// `1000 / raw delta`; infinite when two ticks share a timestamp
    pub fps: f64,
    pub frame: Option<FrameHandle>,
}

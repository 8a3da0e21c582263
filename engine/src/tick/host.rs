//! Host collaborators of the tick loop
//!
//! The renderer, the performance overlay and the per-frame driver live in
//! the hosting application. The tick loop only calls through these traits.

use std::collections::VecDeque;

use super::frame::{FrameHandle, FrameRequest, TickFrame};
use crate::camera::SceneCamera;
use crate::scene::Scene;

/// Draws the scene once per tick.
pub trait Renderer {
    fn render(&mut self, scene: &Scene, camera: &SceneCamera);
}

/// Performance overlay updated at the end of every tick.
pub trait FrameStats {
    fn update(&mut self, frame: &TickFrame);
}

/// External per-frame driver (an animation-loop callback turned inside out).
/// Returning `None` stops the loop.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<FrameRequest>;
}

impl<I> FrameSource for I
where
    I: Iterator<Item = FrameRequest>,
{
    fn next_frame(&mut self) -> Option<FrameRequest> {
        self.next()
    }
}

/// Simulated clock producing evenly spaced frames.
#[derive(Debug, Clone)]
pub struct FixedStepSource {
    next_timestamp: f64,
    step_ms: f64,
    remaining: u64,
    next_handle: u64,
}

impl FixedStepSource {
    /// `frames` frames, the first at `start_ms`, then every `step_ms`.
    pub fn new(start_ms: f64, step_ms: f64, frames: u64) -> Self {
        Self {
            next_timestamp: start_ms,
            step_ms,
            remaining: frames,
            next_handle: 0,
        }
    }
}

impl Iterator for FixedStepSource {
    type Item = FrameRequest;

    fn next(&mut self) -> Option<FrameRequest> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let request = FrameRequest {
            timestamp: self.next_timestamp,
            frame: Some(FrameHandle(self.next_handle)),
        };
        self.next_timestamp += self.step_ms;
        self.next_handle += 1;
        Some(request)
    }
}

/// Frame-rate meter averaging over a fixed window of ticks.
#[derive(Debug, Clone)]
pub struct RollingFps {
    window: usize,
    samples: VecDeque<f64>,
}

impl RollingFps {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            samples: VecDeque::new(),
        }
    }

    /// Average fps over the window, ignoring non-finite samples.
    pub fn average(&self) -> Option<f64> {
        let finite: Vec<f64> = self.samples.iter().copied().filter(|s| s.is_finite()).collect();
        if finite.is_empty() {
            None
        } else {
            Some(finite.iter().sum::<f64>() / finite.len() as f64)
        }
    }
}

impl FrameStats for RollingFps {
    fn update(&mut self, frame: &TickFrame) {
        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(frame.fps);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_step_source() {
        let frames: Vec<FrameRequest> = FixedStepSource::new(100.0, 16.0, 3).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].timestamp, 100.0);
        assert_eq!(frames[2].timestamp, 132.0);
        assert_eq!(frames[1].frame, Some(FrameHandle(1)));
    }

    #[test]
    fn test_rolling_fps_window() {
        let mut fps = RollingFps::new(2);
        for value in [10.0, 20.0, 40.0] {
            fps.update(&TickFrame {
                timestamp: 0.0,
                time_diff: 0.0,
                fps: value,
                frame: None,
            });
        }
        assert_eq!(fps.average(), Some(30.0));
    }

    #[test]
    fn test_rolling_fps_averages_finite_samples_only() {
        let mut fps = RollingFps::new(8);
        for value in [f64::INFINITY, 10.0, 30.0] {
            fps.update(&TickFrame {
                timestamp: 0.0,
                time_diff: 0.0,
                fps: value,
                frame: None,
            });
        }
        assert_eq!(fps.average(), Some(20.0));
    }

    #[test]
    fn test_rolling_fps_skips_infinite() {
        let mut fps = RollingFps::new(4);
        fps.update(&TickFrame {
            timestamp: 0.0,
            time_diff: 0.0,
            fps: f64::INFINITY,
            frame: None,
        });
        assert_eq!(fps.average(), None);
    }
}

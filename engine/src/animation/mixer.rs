//! Clip Mixer
//!
//! In-crate [`AnimationClipSet`] used by the demo binary and tests in place
//! of a host animation system. It tracks time and blend weight per clip;
//! it does not sample any skeleton.
//!
//! Fades are linear in weight. A fade of zero duration applies immediately,
//! which is what the locomotion controller uses by default.

use std::collections::HashMap;

use super::clip::{AnimationClip, AnimationClipSet};

/// Linear weight ramp in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    fn weight(&self) -> f32 {
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * t
    }

    fn is_done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Playback state of a single clip.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipAction {
    /// Clip length in seconds
    duration: f32,
    /// Playhead in seconds
    time: f32,
    weight: f32,
    running: bool,
    looping: bool,
    finished: bool,
    clamp_when_finished: bool,
    fade: Option<Fade>,
}

impl ClipAction {
    /// A stopped clip of `duration` seconds.
    pub fn new(duration: f32, looping: bool) -> Self {
        Self {
            duration: duration.max(f32::EPSILON),
            time: 0.0,
            weight: 1.0,
            running: false,
            looping,
            finished: false,
            clamp_when_finished: false,
            fade: None,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    fn start_fade(&mut self, to: f32, duration: f32) {
        if duration <= 0.0 {
            self.fade = None;
            self.weight = to;
            if to <= 0.0 {
                self.running = false;
            }
        } else {
            self.fade = Some(Fade {
                from: self.weight,
                to,
                elapsed: 0.0,
                duration,
            });
        }
    }

    fn advance(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        if let Some(fade) = self.fade.as_mut() {
            fade.elapsed += dt;
            self.weight = fade.weight();
            if fade.is_done() {
                let target = fade.to;
                self.fade = None;
                if target <= 0.0 {
                    self.running = false;
                    return;
                }
            }
        }

        if self.finished {
            return;
        }

        self.time += dt;
        if self.time >= self.duration {
            if self.looping {
                self.time %= self.duration;
            } else {
                self.time = self.duration;
                self.finished = true;
                if !self.clamp_when_finished {
                    self.running = false;
                    self.weight = 0.0;
                }
            }
        }
    }
}

impl AnimationClip for ClipAction {
    fn play(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
        self.weight = 0.0;
        self.fade = None;
    }

    fn reset(&mut self) {
        self.time = 0.0;
        self.finished = false;
        self.fade = None;
    }

    fn fade_in(&mut self, duration: f32) {
        self.weight = 0.0;
        self.start_fade(1.0, duration);
    }

    fn fade_out(&mut self, duration: f32) {
        self.start_fade(0.0, duration);
    }

    fn set_clamp_when_finished(&mut self, clamp: bool) {
        self.clamp_when_finished = clamp;
    }

    fn clamp_when_finished(&self) -> bool {
        self.clamp_when_finished
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn weight(&self) -> f32 {
        self.weight
    }
}

/// Named clips advanced by one shared clock.
#[derive(Debug, Clone, Default)]
pub struct ClipMixer {
    clips: HashMap<String, ClipAction>,
    /// Accumulated clock time in seconds
    clock: f32,
}

impl ClipMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixer holding looping `Idle`, `Walk` and `Run` clips.
    pub fn with_locomotion_clips() -> Self {
        let mut mixer = Self::new();
        mixer.add_clip("Idle", 2.0, true);
        mixer.add_clip("Walk", 1.0, true);
        mixer.add_clip("Run", 0.7, true);
        mixer
    }

    /// Register a clip. Replaces an existing clip of the same name.
    pub fn add_clip(&mut self, name: impl Into<String>, duration: f32, looping: bool) {
        self.clips.insert(name.into(), ClipAction::new(duration, looping));
    }

    pub fn action(&self, name: &str) -> Option<&ClipAction> {
        self.clips.get(name)
    }

    /// Names of clips that are running with a non-zero weight, sorted.
    pub fn active_clips(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .clips
            .iter()
            .filter(|(_, action)| action.running && action.weight > 0.0)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }
}

impl AnimationClipSet for ClipMixer {
    fn clip_mut(&mut self, name: &str) -> Option<&mut dyn AnimationClip> {
        self.clips
            .get_mut(name)
            .map(|action| action as &mut dyn AnimationClip)
    }

    fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    fn advance(&mut self, dt: f32) {
        self.clock += dt;
        for action in self.clips.values_mut() {
            action.advance(dt);
        }
    }
}

//! Animation clip contracts
//!
//! Mirrors the subset of an animation mixer the locomotion core drives:
//! named clips that can be played, reset and cross-faded, plus a shared
//! clock advanced once per update.

/// One playable clip (an "action" in most engines).
pub trait AnimationClip {
    /// Start (or keep) the clip running.
    fn play(&mut self);

    /// Stop the clip and drop its weight.
    fn stop(&mut self);

    /// Rewind to the first frame and cancel any pending fade.
    fn reset(&mut self);

    /// Ramp weight from 0 to 1 over `duration` seconds. Zero is instant.
    fn fade_in(&mut self, duration: f32);

    /// Ramp weight to 0 over `duration` seconds, then stop. Zero is instant.
    fn fade_out(&mut self, duration: f32);

    /// Hold the last frame instead of stopping when a non-looping clip ends.
    fn set_clamp_when_finished(&mut self, clamp: bool);

    fn clamp_when_finished(&self) -> bool;

    /// Whether the clip is currently contributing to the pose.
    fn is_running(&self) -> bool;

    /// Current blend weight in `[0, 1]`.
    fn weight(&self) -> f32;
}

/// A named set of clips sharing one clock.
pub trait AnimationClipSet {
    /// Look up a clip by name.
    fn clip_mut(&mut self, name: &str) -> Option<&mut dyn AnimationClip>;

    /// Whether a clip with this name exists.
    fn contains(&self, name: &str) -> bool;

    /// Advance the shared clock by `dt` seconds.
    fn advance(&mut self, dt: f32);
}

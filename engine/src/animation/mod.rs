//! Animation Module
//!
//! - [`clip`] - [`AnimationClip`] / [`AnimationClipSet`] traits the
//!   locomotion controller drives
//! - [`mixer`] - [`ClipMixer`], a weight-and-time reference implementation

pub mod clip;
pub mod mixer;

pub use clip::{AnimationClip, AnimationClipSet};
pub use mixer::{ClipAction, ClipMixer};

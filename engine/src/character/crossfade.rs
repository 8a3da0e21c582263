//! Crossfade planning and execution.
//!
//! [`plan_crossfade`] is pure: it decides which two clip commands a state
//! change needs. [`apply_crossfade`] runs them against a clip set.

use log::warn;

use super::CharacterError;
use super::locomotion::LocomotionState;
use crate::animation::AnimationClipSet;

/// A single command against one clip. Both variants clamp at the end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipCommand {
    FadeOut { clip: LocomotionState, duration: f32 },
    /// Reset, fade in, then play.
    FadeIn { clip: LocomotionState, duration: f32 },
}

impl ClipCommand {
    pub fn clip(&self) -> LocomotionState {
        match *self {
            ClipCommand::FadeOut { clip, .. } | ClipCommand::FadeIn { clip, .. } => clip,
        }
    }
}

/// The two commands of a state change: fade out the old clip, fade in the new.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossfade {
    pub from: LocomotionState,
    pub to: LocomotionState,
    pub commands: [ClipCommand; 2],
}

/// Decide the commands for moving from `current` to `desired`.
/// `None` when no change is needed.
pub fn plan_crossfade(
    current: LocomotionState,
    desired: LocomotionState,
    fade_duration: f32,
) -> Option<Crossfade> {
    if current == desired {
        return None;
    }
    Some(Crossfade {
        from: current,
        to: desired,
        commands: [
            ClipCommand::FadeOut {
                clip: current,
                duration: fade_duration,
            },
            ClipCommand::FadeIn {
                clip: desired,
                duration: fade_duration,
            },
        ],
    })
}

/// Execute a crossfade. Both clips are checked before either is touched, so
/// a missing clip leaves the set unchanged.
pub fn apply_crossfade(
    clips: &mut dyn AnimationClipSet,
    crossfade: &Crossfade,
) -> Result<(), CharacterError> {
    for command in &crossfade.commands {
        let state = command.clip();
        if !clips.contains(state.clip_name()) {
            warn!("no animation clip for locomotion state {state}");
            return Err(CharacterError::MissingClip(state));
        }
    }

    for command in &crossfade.commands {
        let state = command.clip();
        let clip = clips
            .clip_mut(state.clip_name())
            .ok_or(CharacterError::MissingClip(state))?;
        clip.set_clamp_when_finished(true);
        match *command {
            ClipCommand::FadeOut { duration, .. } => clip.fade_out(duration),
            ClipCommand::FadeIn { duration, .. } => {
                clip.reset();
                clip.fade_in(duration);
                clip.play();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationClip, ClipMixer};

    #[test]
    fn test_same_state_plans_nothing() {
        assert!(plan_crossfade(LocomotionState::Walk, LocomotionState::Walk, 0.0).is_none());
    }

    #[test]
    fn test_plan_emits_exactly_two_commands() {
        let plan = plan_crossfade(LocomotionState::Idle, LocomotionState::Run, 0.25).unwrap();
        assert_eq!(plan.from, LocomotionState::Idle);
        assert_eq!(plan.to, LocomotionState::Run);
        assert_eq!(
            plan.commands,
            [
                ClipCommand::FadeOut {
                    clip: LocomotionState::Idle,
                    duration: 0.25
                },
                ClipCommand::FadeIn {
                    clip: LocomotionState::Run,
                    duration: 0.25
                },
            ]
        );
    }

    #[test]
    fn test_apply_switches_active_clip() {
        let mut mixer = ClipMixer::with_locomotion_clips();
        mixer.clip_mut("Idle").unwrap().play();

        let plan = plan_crossfade(LocomotionState::Idle, LocomotionState::Walk, 0.0).unwrap();
        apply_crossfade(&mut mixer, &plan).unwrap();

        assert_eq!(mixer.active_clips(), vec!["Walk"]);
        assert!(mixer.action("Walk").unwrap().clamp_when_finished());
        assert!(mixer.action("Idle").unwrap().clamp_when_finished());
    }

    #[test]
    fn test_missing_clip_leaves_set_untouched() {
        let mut mixer = ClipMixer::new();
        mixer.add_clip("Idle", 1.0, true);
        mixer.clip_mut("Idle").unwrap().play();

        let plan = plan_crossfade(LocomotionState::Idle, LocomotionState::Run, 0.0).unwrap();
        let err = apply_crossfade(&mut mixer, &plan).unwrap_err();

        assert_eq!(err, CharacterError::MissingClip(LocomotionState::Run));
        assert_eq!(mixer.active_clips(), vec!["Idle"]);
    }
}

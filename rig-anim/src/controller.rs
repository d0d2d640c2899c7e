//! The animation blend controller.
//!
//! A finite-state controller that crossfades between an idle clip and four
//! motion clips (walk, punch, kick, talk) in response to per-frame input
//! snapshots. The controller itself is immutable after construction; all
//! mutable state lives in the [`ControllerState`] value the caller owns and
//! threads through [`AnimationController::step`] once per frame.

use std::fmt;

use glam::{Mat4, Vec3};

use crate::clip::{ClipId, ClipRegistry};
use crate::error::Result;
use crate::input::{Actions, Directions, InputSnapshot};
use crate::playback::{BlendState, PlaybackCursor};
use crate::pose::LocalPose;
use crate::skeleton::Skeleton;

/// Blend accumulator value past which a crossfade commits
pub const COMMIT_THRESHOLD: f32 = 0.9;

/// The four non-idle motions the controller can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Walk,
    Punch,
    Kick,
    Talk,
}

impl Motion {
    /// Minimum primary-cursor time an action motion must have played
    /// before it may start blending back to idle. Walk exits on input
    /// instead and carries no gate.
    pub const fn min_active_secs(self) -> f32 {
        match self {
            Self::Walk => 0.0,
            Self::Punch => 0.7,
            Self::Kick => 1.0,
            Self::Talk => 3.0,
        }
    }

    /// Highest-priority action motion in the pressed set, if any.
    /// Punch is checked before kick before talk.
    fn from_actions(actions: Actions) -> Option<Self> {
        if actions.contains(Actions::PUNCH) {
            Some(Self::Punch)
        } else if actions.contains(Actions::KICK) {
            Some(Self::Kick)
        } else if actions.contains(Actions::TALK) {
            Some(Self::Talk)
        } else {
            None
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Walk => "walk",
            Self::Punch => "punch",
            Self::Kick => "kick",
            Self::Talk => "talk",
        };
        f.write_str(name)
    }
}

/// Where the controller is in its motion cycle.
///
/// One resting state plus an entering/active/exiting triple parameterized
/// by motion kind; the blend bookkeeping is shared across all motions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Idle clip playing solo
    Resting,
    /// Crossfading from the current clip toward the motion's clip
    Entering(Motion),
    /// Motion clip playing solo
    Active(Motion),
    /// Crossfading from the motion's clip back toward idle
    Exiting(Motion),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resting => f.write_str("resting"),
            Self::Entering(motion) => write!(f, "entering({motion})"),
            Self::Active(motion) => write!(f, "active({motion})"),
            Self::Exiting(motion) => write!(f, "exiting({motion})"),
        }
    }
}

/// Tunable controller constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    /// Blend accumulator growth per second. Multiplied by the frame delta,
    /// so crossfade speed is independent of frame rate.
    pub blend_rate: f32,
    /// Walk displacement in units per second
    pub move_speed: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            blend_rate: 0.55,
            move_speed: 2.0,
        }
    }
}

/// The clip each controller role plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionClips {
    pub idle: ClipId,
    pub walk: ClipId,
    pub punch: ClipId,
    pub kick: ClipId,
    pub talk: ClipId,
}

impl MotionClips {
    /// Resolve the conventional clip names ("idle", "walk", "punch",
    /// "kick", "talk") against a registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnimError::MissingClip`] for the first name with no
    /// registered clip.
    pub fn by_name(registry: &ClipRegistry) -> Result<Self> {
        Ok(Self {
            idle: registry.require("idle")?,
            walk: registry.require("walk")?,
            punch: registry.require("punch")?,
            kick: registry.require("kick")?,
            talk: registry.require("talk")?,
        })
    }

    /// The clip backing a motion
    pub fn clip_for(&self, motion: Motion) -> ClipId {
        match motion {
            Motion::Walk => self.walk,
            Motion::Punch => self.punch,
            Motion::Kick => self.kick,
            Motion::Talk => self.talk,
        }
    }
}

/// World-space character placement driven by the walk motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    /// Character position
    pub position: Vec3,
    /// Facing rotation around the Y axis, degrees
    pub yaw_degrees: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
        }
    }
}

/// The complete per-character controller state.
///
/// A plain value: the caller owns it, hands it to
/// [`AnimationController::step`] each frame, and keeps the returned next
/// state. The blend factor inside [`BlendState`] doubles as the blend
/// accumulator; it only ever grows within one entering/exiting phase and is
/// clamped at interpolation time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// Current phase of the motion cycle
    pub phase: Phase,
    /// The clip(s) currently weighted into the pose
    pub blend: BlendState,
    /// Character placement
    pub locomotion: Locomotion,
}

/// Decides, every frame, which clips are active at what weight, and
/// evaluates the blended pose into final bone matrices.
///
/// Construction validates every configured clip id against the registry,
/// so a missing clip fails fast instead of surfacing mid-frame.
#[derive(Debug)]
pub struct AnimationController {
    registry: ClipRegistry,
    clips: MotionClips,
    config: ControllerConfig,
}

impl AnimationController {
    /// Build a controller over an immutable clip table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnimError::ClipNotFound`] if any configured clip id
    /// was not issued by `registry`.
    pub fn new(
        registry: ClipRegistry,
        clips: MotionClips,
        config: ControllerConfig,
    ) -> Result<Self> {
        for id in [clips.idle, clips.walk, clips.punch, clips.kick, clips.talk] {
            registry.get(id)?;
        }
        Ok(Self {
            registry,
            clips,
            config,
        })
    }

    /// The clip table the controller was built over
    pub fn registry(&self) -> &ClipRegistry {
        &self.registry
    }

    /// The controller's tunables
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Resting on the idle clip, at the origin
    pub fn initial_state(&self) -> ControllerState {
        ControllerState {
            phase: Phase::Resting,
            blend: BlendState::single(PlaybackCursor::new(self.clips.idle)),
            locomotion: Locomotion::default(),
        }
    }

    /// Advance the controller by one frame.
    ///
    /// Pure: reads `state`, the input snapshot, and the frame delta, and
    /// returns the next state. `dt` is uncapped: a stalled frame overshoots
    /// blend and gate thresholds in a single step and commits immediately.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AnimError::ClipNotFound`] only when the snapshot's
    /// forced clip, or a cursor in a caller-constructed state, references a
    /// clip this controller's registry never issued.
    pub fn step(
        &self,
        state: ControllerState,
        input: &InputSnapshot,
        dt: f32,
    ) -> Result<ControllerState> {
        // Hard cut override: orthogonal to the state machine proper.
        if let Some(clip) = input.forced_clip {
            let name = self.registry.get(clip)?.name();
            log::debug!("hard cut to '{name}' from phase {}", state.phase);
            let mut next = state;
            next.phase = Phase::Resting;
            next.blend = BlendState::single(PlaybackCursor::new(clip));
            self.advance_cursors(&mut next.blend, dt)?;
            return Ok(next);
        }

        let mut next = state;
        match state.phase {
            Phase::Resting => {
                // Movement is checked before actions: simultaneous input
                // resolves to walk.
                if !input.held_directions.is_empty() {
                    self.begin_blend(&mut next, Phase::Entering(Motion::Walk));
                    self.advance_blend(&mut next, dt);
                    self.apply_locomotion(&mut next.locomotion, input.held_directions, dt);
                } else if let Some(motion) = Motion::from_actions(input.pressed_actions) {
                    self.begin_blend(&mut next, Phase::Entering(motion));
                    self.advance_blend(&mut next, dt);
                }
            }
            Phase::Entering(motion) => {
                self.advance_blend(&mut next, dt);
                if motion == Motion::Walk {
                    self.apply_locomotion(&mut next.locomotion, input.held_directions, dt);
                }
            }
            Phase::Active(Motion::Walk) => {
                if input.held_directions.is_empty() {
                    // Exit the same frame movement stops; the accumulator
                    // starts at zero and grows from the next frame on.
                    self.begin_blend(&mut next, Phase::Exiting(Motion::Walk));
                } else {
                    self.apply_locomotion(&mut next.locomotion, input.held_directions, dt);
                }
            }
            Phase::Active(motion) => {
                // Purely time-gated: the hit has to land, the line has to
                // finish. No input shortens this.
                if state.blend.primary().time() > motion.min_active_secs() {
                    self.begin_blend(&mut next, Phase::Exiting(motion));
                }
            }
            Phase::Exiting(_) => {
                self.advance_blend(&mut next, dt);
            }
        }

        if next.phase != state.phase {
            log::debug!("phase {} -> {}", state.phase, next.phase);
        } else {
            log::trace!("phase {}", next.phase);
        }

        self.advance_cursors(&mut next.blend, dt)?;
        Ok(next)
    }

    /// Sample the blended pose for a state.
    ///
    /// # Errors
    ///
    /// Fails only for cursors holding foreign clip ids (see
    /// [`AnimationController::step`]).
    pub fn sample_pose(&self, blend: &BlendState, skeleton: &Skeleton) -> Result<LocalPose> {
        let primary = self.registry.get(blend.primary().clip())?;
        let pose = primary.sample(skeleton, blend.primary().time());

        match blend.secondary() {
            None => Ok(pose),
            Some(secondary) => {
                let clip = self.registry.get(secondary.clip())?;
                let target = clip.sample(skeleton, secondary.time());
                Ok(pose.blend(&target, blend.weight()))
            }
        }
    }

    /// Evaluate a state into final bone matrices for the renderer.
    ///
    /// # Errors
    ///
    /// Same failure surface as [`AnimationController::sample_pose`].
    pub fn evaluate(&self, state: &ControllerState, skeleton: &Skeleton) -> Result<Vec<Mat4>> {
        let pose = self.sample_pose(&state.blend, skeleton)?;
        Ok(pose.model_matrices(skeleton))
    }

    /// Start a crossfade toward the phase's motion clip (or idle, for an
    /// exit). The outgoing clip keeps its time; the incoming cursor starts
    /// fresh at zero.
    fn begin_blend(&self, next: &mut ControllerState, phase: Phase) {
        let target = match phase {
            Phase::Entering(motion) => self.clips.clip_for(motion),
            _ => self.clips.idle,
        };
        next.blend = BlendState::blending(next.blend.primary(), PlaybackCursor::new(target));
        next.phase = phase;
    }

    /// The one generic blend routine: grow the accumulator by the
    /// per-second rate, and commit past the threshold. On commit the
    /// secondary cursor becomes the sole primary at the time it reached.
    fn advance_blend(&self, next: &mut ControllerState, dt: f32) {
        let factor = next.blend.factor() + self.config.blend_rate * dt;
        next.blend.set_factor(factor);

        if factor > COMMIT_THRESHOLD {
            next.blend.commit();
            next.phase = match next.phase {
                Phase::Entering(motion) => Phase::Active(motion),
                Phase::Exiting(_) => Phase::Resting,
                Phase::Resting | Phase::Active(_) => next.phase,
            };
        }
    }

    /// Walk displacement and facing for the held direction keys.
    fn apply_locomotion(&self, locomotion: &mut Locomotion, held: Directions, dt: f32) {
        if held.is_empty() {
            return;
        }
        if let Some(yaw) = held.facing_yaw() {
            locomotion.yaw_degrees = yaw;
        }
        locomotion.position += held.move_vector() * self.config.move_speed * dt;
    }

    fn advance_cursors(&self, blend: &mut BlendState, dt: f32) -> Result<()> {
        let duration = self.registry.get(blend.primary().clip())?.duration();
        blend.primary_mut().advance(dt, duration);

        if let Some(secondary) = blend.secondary_mut() {
            let duration = self.registry.get(secondary.clip())?.duration();
            secondary.advance(dt, duration);
        }
        Ok(())
    }
}

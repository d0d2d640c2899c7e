//! Skeletal animation clips, two-clip pose blending, and a character
//! motion state controller.
//!
//! The crate is purely in-memory and single-threaded: a caller's main loop
//! owns a [`ControllerState`] value, advances it once per rendered frame
//! with [`AnimationController::step`], and turns it into final bone
//! matrices with [`AnimationController::evaluate`]. Loading clip data,
//! polling real input devices, and rendering all belong to collaborators:
//! the controller consumes debounced [`InputSnapshot`] values and produces
//! `Mat4`s, nothing else.

pub mod clip;
pub mod controller;
pub mod error;
pub mod input;
pub mod playback;
pub mod pose;
pub mod skeleton;
pub mod track;
pub mod transform;

// Re-export common types
pub use clip::{AnimationClip, ClipId, ClipRegistry};
pub use controller::{
    AnimationController, COMMIT_THRESHOLD, ControllerConfig, ControllerState, Locomotion, Motion,
    MotionClips, Phase,
};
pub use error::{AnimError, Result};
pub use input::{Actions, Directions, InputSnapshot};
pub use playback::{BlendState, PlaybackCursor};
pub use pose::LocalPose;
pub use skeleton::{Bone, Skeleton};
pub use track::{BoneTrack, Channel, Interpolate};
pub use transform::Transform;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Animation clips and the immutable clip registry.

use std::collections::BTreeMap;

use crate::error::{AnimError, Result};
use crate::pose::LocalPose;
use crate::skeleton::Skeleton;
use crate::track::{BoneTrack, wrap_time};

/// A named skeletal motion: fixed duration plus per-bone keyframe tracks.
///
/// Clips are immutable once registered. Bones without a track sample as
/// their bind-local transform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct AnimationClip {
    name: String,
    duration: f32,
    tracks: BTreeMap<u16, BoneTrack>,
}

impl AnimationClip {
    /// Create a clip and validate its tracks.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidClip`] for a non-positive or non-finite
    /// duration, or [`AnimError::InvalidTrack`] when a channel's parallel
    /// arrays disagree, its keys are unsorted, or a key lies past the
    /// duration.
    pub fn new(
        name: impl Into<String>,
        duration: f32,
        tracks: BTreeMap<u16, BoneTrack>,
    ) -> Result<Self> {
        let clip = Self {
            name: name.into(),
            duration,
            tracks,
        };
        clip.validate()?;
        Ok(clip)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(AnimError::InvalidClip {
                name: self.name.clone(),
                reason: format!("duration {} is not a positive length", self.duration),
            });
        }
        for (&bone, track) in &self.tracks {
            track.validate(bone, self.duration)?;
        }
        Ok(())
    }

    /// Clip name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clip duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// The track for one bone, if keyed
    pub fn track(&self, bone: u16) -> Option<&BoneTrack> {
        self.tracks.get(&bone)
    }

    /// Number of keyed bones
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Sample the clip against a skeleton at `time`.
    ///
    /// Time wraps modulo the clip duration; every clip in this crate loops.
    pub fn sample(&self, skeleton: &Skeleton, time: f32) -> LocalPose {
        let time = wrap_time(time, self.duration);
        let transforms = skeleton
            .bones()
            .iter()
            .enumerate()
            .map(|(index, bone)| match self.tracks.get(&(index as u16)) {
                Some(track) => track.sample(time, self.duration, &bone.bind_local),
                None => bone.bind_local,
            })
            .collect();
        LocalPose::new(transforms)
    }
}

/// Handle to a registered clip. Only a [`ClipRegistry`] issues these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipId(u32);

impl ClipId {
    /// The registry slot this id points at
    pub fn index(self) -> u32 {
        self.0
    }

    pub(crate) const fn from_index(index: u32) -> Self {
        Self(index)
    }
}

/// The immutable clip table the controller is constructed over.
///
/// Registration validates each clip once; afterwards the table only hands
/// out shared references. Looking up an id the registry never issued is the
/// fail-fast invalid-clip-reference case.
#[derive(Debug, Default)]
pub struct ClipRegistry {
    clips: Vec<AnimationClip>,
}

impl ClipRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a clip, returning its id.
    ///
    /// # Errors
    ///
    /// Propagates clip validation errors; deserialized clips get the same
    /// checks as constructed ones.
    pub fn register(&mut self, clip: AnimationClip) -> Result<ClipId> {
        clip.validate()?;
        let id = ClipId(self.clips.len() as u32);
        log::debug!("registered clip '{}' as {:?}", clip.name(), id);
        self.clips.push(clip);
        Ok(id)
    }

    /// Look up a clip by id.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::ClipNotFound`] for an id this registry did not
    /// issue, which is a programming error on the caller's side.
    pub fn get(&self, id: ClipId) -> Result<&AnimationClip> {
        self.clips
            .get(id.0 as usize)
            .ok_or(AnimError::ClipNotFound {
                id: id.0,
                count: self.clips.len(),
            })
    }

    /// Find a clip id by name
    pub fn find(&self, name: &str) -> Option<ClipId> {
        self.clips
            .iter()
            .position(|clip| clip.name() == name)
            .map(|index| ClipId(index as u32))
    }

    /// Find a clip id by name, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::MissingClip`] when no clip carries the name.
    pub fn require(&self, name: &str) -> Result<ClipId> {
        self.find(name)
            .ok_or_else(|| AnimError::MissingClip(name.to_string()))
    }

    /// Number of registered clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Iterate over `(id, clip)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ClipId, &AnimationClip)> {
        self.clips
            .iter()
            .enumerate()
            .map(|(index, clip)| (ClipId(index as u32), clip))
    }
}

//! Per-bone keyframe tracks.
//!
//! A track stores one keyed channel per transform component as parallel
//! timestamp/value arrays. Sampling wraps time modulo the clip duration and
//! interpolates across the wrap boundary, so a looping clip is continuous at
//! the duration seam.

use glam::{Quat, Vec3};

use crate::error::{AnimError, Result};
use crate::transform::Transform;

/// Map a playback time into `[0, duration)`.
pub(crate) fn wrap_time(time: f32, duration: f32) -> f32 {
    let wrapped = time.rem_euclid(duration);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= duration { 0.0 } else { wrapped }
}

/// Values that can be keyframed and interpolated between two keys.
pub trait Interpolate: Copy {
    /// Interpolate from `self` toward `other` by `t` in `[0, 1]`
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolate for Vec3 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolate for Quat {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.slerp(other, t)
    }
}

/// One keyed channel: parallel timestamp and value arrays.
///
/// An empty channel means "not keyed"; sampling it yields `None` and the
/// caller falls back to the bone's bind value.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Channel<T> {
    timestamps: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolate> Channel<T> {
    /// Create an unkeyed channel
    pub const fn empty() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create a channel from parallel timestamp/value arrays
    pub fn new(timestamps: Vec<f32>, values: Vec<T>) -> Self {
        Self { timestamps, values }
    }

    /// Whether this channel carries any keys
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check the parallel-array and ordering invariants against a clip
    /// duration. Registration runs this so deserialized channels get the
    /// same checks as constructed ones.
    pub(crate) fn validate(&self, bone: u16, duration: f32) -> Result<()> {
        if self.timestamps.len() != self.values.len() {
            return Err(AnimError::InvalidTrack {
                bone,
                reason: format!(
                    "{} timestamps but {} values",
                    self.timestamps.len(),
                    self.values.len()
                ),
            });
        }

        for pair in self.timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(AnimError::InvalidTrack {
                    bone,
                    reason: format!("timestamps not strictly increasing at {}", pair[1]),
                });
            }
        }

        if let Some(&first) = self.timestamps.first() {
            if !(0.0..=duration).contains(&first) {
                return Err(AnimError::InvalidTrack {
                    bone,
                    reason: format!("timestamp {first} outside clip duration {duration}"),
                });
            }
        }
        if let Some(&last) = self.timestamps.last() {
            if last > duration {
                return Err(AnimError::InvalidTrack {
                    bone,
                    reason: format!("timestamp {last} outside clip duration {duration}"),
                });
            }
        }

        Ok(())
    }

    /// Sample the channel at `time` (already wrapped into `[0, duration)`).
    ///
    /// Between the last key and the duration boundary the channel
    /// interpolates back toward the first key, which keeps a looping clip
    /// continuous across the wrap.
    pub fn sample(&self, time: f32, duration: f32) -> Option<T> {
        let first = *self.values.first()?;
        if self.values.len() == 1 {
            return Some(first);
        }

        // Index of the first key strictly after `time`
        let next = self.timestamps.partition_point(|&ts| ts <= time);

        let (from_ts, from, to_ts, to) = if next == 0 {
            // Before the first key: the segment wraps from the last key
            let last = self.timestamps.len() - 1;
            (
                self.timestamps[last] - duration,
                self.values[last],
                self.timestamps[0],
                self.values[0],
            )
        } else if next == self.timestamps.len() {
            // After the last key: the segment wraps to the first key
            let last = self.timestamps.len() - 1;
            (
                self.timestamps[last],
                self.values[last],
                self.timestamps[0] + duration,
                self.values[0],
            )
        } else {
            (
                self.timestamps[next - 1],
                self.values[next - 1],
                self.timestamps[next],
                self.values[next],
            )
        };

        let span = to_ts - from_ts;
        let t = if span > f32::EPSILON {
            ((time - from_ts) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Some(from.interpolate(to, t))
    }
}

/// All keyed channels for one bone.
///
/// Channels left empty fall back to the bone's bind transform when sampled,
/// matching how unkeyed components default elsewhere in the crate.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct BoneTrack {
    /// Keyed translation, if any
    pub translation: Channel<Vec3>,
    /// Keyed rotation, if any
    pub rotation: Channel<Quat>,
    /// Keyed scale, if any
    pub scale: Channel<Vec3>,
}

impl BoneTrack {
    /// Sample all channels at `time` (wrapped into `[0, duration)`), taking
    /// unkeyed components from `bind`.
    pub fn sample(&self, time: f32, duration: f32, bind: &Transform) -> Transform {
        Transform {
            translation: self
                .translation
                .sample(time, duration)
                .unwrap_or(bind.translation),
            rotation: self.rotation.sample(time, duration).unwrap_or(bind.rotation),
            scale: self.scale.sample(time, duration).unwrap_or(bind.scale),
        }
    }

    pub(crate) fn validate(&self, bone: u16, duration: f32) -> Result<()> {
        self.translation.validate(bone, duration)?;
        self.rotation.validate(bone, duration)?;
        self.scale.validate(bone, duration)?;
        Ok(())
    }
}

//! Local bone transforms in translation/rotation/scale form.

use glam::{Mat4, Quat, Vec3};

/// A bone-local transform, kept decomposed so two transforms can be
/// interpolated channel by channel before being turned into a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Transform {
    /// Translation relative to the parent bone
    pub translation: Vec3,
    /// Rotation relative to the parent bone
    pub rotation: Quat,
    /// Per-axis scale relative to the parent bone
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform (no translation, no rotation, unit scale)
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Create a transform from its three channels
    pub const fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Create a pure translation
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a pure rotation
    pub const fn from_rotation(rotation: Quat) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Combine the channels into a single affine matrix
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Interpolate between two transforms.
    ///
    /// Translation and scale interpolate linearly component-wise; rotation
    /// uses spherical interpolation. `t` is expected in `[0, 1]` (0 returns
    /// `self`, 1 returns `other`).
    pub fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            translation: self.translation.lerp(other.translation, t),
            rotation: self.rotation.slerp(other.rotation, t),
            scale: self.scale.lerp(other.scale, t),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//! Bone hierarchy and bind-pose data.

use glam::Mat4;

use crate::error::{AnimError, Result};
use crate::transform::Transform;

/// One bone of a skeleton.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-support",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Bone {
    /// Bone name, used by tooling and diagnostics only
    pub name: String,
    /// Index of the parent bone; `None` for a root
    pub parent: Option<u16>,
    /// Local transform in the bind pose, used when a clip has no track for
    /// this bone
    pub bind_local: Transform,
    /// Inverse of the model-space bind transform (offset matrix); maps a
    /// vertex from model space into this bone's space
    pub inverse_bind: Mat4,
}

impl Bone {
    /// Create a root bone with identity bind data
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            bind_local: Transform::IDENTITY,
            inverse_bind: Mat4::IDENTITY,
        }
    }

    /// Create a child bone with identity bind data
    pub fn child(name: impl Into<String>, parent: u16) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            bind_local: Transform::IDENTITY,
            inverse_bind: Mat4::IDENTITY,
        }
    }

    /// Set the bind-local transform
    #[must_use]
    pub fn with_bind_local(mut self, bind_local: Transform) -> Self {
        self.bind_local = bind_local;
        self
    }

    /// Set the inverse bind (offset) matrix
    #[must_use]
    pub fn with_inverse_bind(mut self, inverse_bind: Mat4) -> Self {
        self.inverse_bind = inverse_bind;
        self
    }
}

/// An immutable bone hierarchy.
///
/// Bones are stored parents-before-children: every bone's parent index is
/// strictly smaller than its own index. That ordering is validated at
/// construction and lets pose composition run in a single forward pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Build a skeleton, validating the parent ordering invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AnimError::InvalidSkeleton`] if a bone's parent index does
    /// not precede it, or if the skeleton has more bones than a `u16` index
    /// can address.
    pub fn new(bones: Vec<Bone>) -> Result<Self> {
        if bones.len() > usize::from(u16::MAX) + 1 {
            return Err(AnimError::InvalidSkeleton(format!(
                "{} bones exceed the u16 index space",
                bones.len()
            )));
        }

        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if usize::from(parent) >= index {
                    return Err(AnimError::InvalidSkeleton(format!(
                        "bone {index} ('{}') has parent {parent}, which does not precede it",
                        bone.name
                    )));
                }
            }
        }

        Ok(Self { bones })
    }

    /// The bones, parents before children
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Whether the skeleton has no bones
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Find a bone index by name
    pub fn find(&self, name: &str) -> Option<u16> {
        self.bones
            .iter()
            .position(|bone| bone.name == name)
            .map(|index| index as u16)
    }
}

//! Pose blending and model-space matrix composition.
//!
//! A [`LocalPose`] holds one bone-local transform per skeleton bone. Two
//! poses blend channel by channel (lerp for translation/scale, slerp for
//! rotation), and a pose composes into model space by walking the parent
//! chain and applying each bone's inverse bind matrix. The result is what
//! a renderer uploads as its final bone matrices.

use glam::Mat4;

use crate::skeleton::Skeleton;
use crate::transform::Transform;

/// One bone-local transform per bone, indexed as the skeleton is.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPose {
    transforms: Vec<Transform>,
}

impl LocalPose {
    /// Wrap per-bone transforms into a pose
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    /// The skeleton's bind pose
    pub fn bind(skeleton: &Skeleton) -> Self {
        Self {
            transforms: skeleton.bones().iter().map(|bone| bone.bind_local).collect(),
        }
    }

    /// Per-bone transforms
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Number of bones in the pose
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Whether the pose has no bones
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Blend toward `other` by `factor`, clamped to `[0, 1]` before use.
    ///
    /// 0 returns `self`, 1 returns `other`. Both poses must come from the
    /// same skeleton.
    pub fn blend(&self, other: &Self, factor: f32) -> Self {
        debug_assert_eq!(self.transforms.len(), other.transforms.len());
        let factor = factor.clamp(0.0, 1.0);
        Self {
            transforms: self
                .transforms
                .iter()
                .zip(&other.transforms)
                .map(|(a, b)| a.interpolate(b, factor))
                .collect(),
        }
    }

    /// Compose the pose into final bone matrices.
    ///
    /// Each bone's local matrix is multiplied onto its parent's model-space
    /// matrix (parents precede children, so one forward pass suffices), then
    /// by the bone's inverse bind matrix. The result is indexed consistently
    /// with the skeleton.
    pub fn model_matrices(&self, skeleton: &Skeleton) -> Vec<Mat4> {
        let mut globals: Vec<Mat4> = Vec::with_capacity(self.transforms.len());

        for (local, bone) in self.transforms.iter().zip(skeleton.bones()) {
            let local = local.to_mat4();
            let global = match bone.parent {
                Some(parent) => globals[usize::from(parent)] * local,
                None => local,
            };
            globals.push(global);
        }

        globals
            .iter()
            .zip(skeleton.bones())
            .map(|(global, bone)| *global * bone.inverse_bind)
            .collect()
    }
}

//! Sampling and pose-blending behavior against a real rig.

use glam::Vec3;
use pretty_assertions::assert_eq;
use rig_anim::{Directions, InputSnapshot, LocalPose, Phase};

use crate::fixtures;

#[test]
fn sampling_wraps_continuously_at_the_duration_seam() {
    let skeleton = fixtures::skeleton();
    let registry = fixtures::registry();
    let walk = registry.get(registry.find("walk").unwrap()).unwrap();

    let duration = walk.duration();
    let before = walk.sample(&skeleton, duration - 0.001);
    let after = walk.sample(&skeleton, duration + 0.001);

    for (a, b) in before.transforms().iter().zip(after.transforms()) {
        assert!((a.translation - b.translation).length() < 1e-2);
        assert!(a.rotation.abs_diff_eq(b.rotation, 1e-2));
    }
}

#[test]
fn untracked_bones_sample_their_bind_transform() {
    let skeleton = fixtures::skeleton();
    let registry = fixtures::registry();
    let idle = registry.get(registry.find("idle").unwrap()).unwrap();

    let pose = idle.sample(&skeleton, 0.4);

    // The spine has no track in any fixture clip.
    assert_eq!(
        pose.transforms()[1].translation,
        skeleton.bones()[1].bind_local.translation
    );
}

#[test]
fn evaluate_emits_one_matrix_per_bone() {
    let controller = fixtures::controller();
    let skeleton = fixtures::skeleton();
    let state = controller.initial_state();

    let matrices = controller.evaluate(&state, &skeleton).unwrap();

    assert_eq!(matrices.len(), skeleton.len());
}

#[test]
fn mid_blend_pose_lies_between_both_clips() {
    let controller = fixtures::controller();
    let skeleton = fixtures::skeleton();
    let mut state = controller.initial_state();

    // A few entering frames leave a genuine two-clip blend.
    let forward = InputSnapshot::holding(Directions::FORWARD);
    for _ in 0..5 {
        state = controller.step(state, &forward, 0.1).unwrap();
    }
    assert_eq!(state.phase, Phase::Entering(rig_anim::Motion::Walk));
    let weight = state.blend.weight();
    assert!(weight > 0.0 && weight < 1.0);

    let blended = controller.sample_pose(&state.blend, &skeleton).unwrap();

    let registry = controller.registry();
    let primary = registry.get(state.blend.primary().clip()).unwrap();
    let secondary_cursor = state.blend.secondary().unwrap();
    let secondary = registry.get(secondary_cursor.clip()).unwrap();

    let a = primary.sample(&skeleton, state.blend.primary().time());
    let b = secondary.sample(&skeleton, secondary_cursor.time());
    let expected = a.blend(&b, weight);

    for (blended, expected) in blended.transforms().iter().zip(expected.transforms()) {
        assert!((blended.translation - expected.translation).length() < 1e-6);
        assert!(blended.rotation.abs_diff_eq(expected.rotation, 1e-6));
    }
}

#[test]
fn solo_state_ignores_the_blend_factor() {
    let controller = fixtures::controller();
    let skeleton = fixtures::skeleton();
    let state = controller.initial_state();

    let pose = controller.sample_pose(&state.blend, &skeleton).unwrap();
    let registry = controller.registry();
    let idle = registry.get(state.blend.primary().clip()).unwrap();
    let expected = idle.sample(&skeleton, state.blend.primary().time());

    assert_eq!(pose, expected);
    assert_eq!(state.blend.weight(), 0.0);
}

#[test]
fn bind_pose_matrices_cancel_identity_inverse_binds() {
    let skeleton = fixtures::skeleton();
    let pose = LocalPose::bind(&skeleton);

    let matrices = pose.model_matrices(&skeleton);

    // Identity inverse binds: the arm's final matrix is its model-space
    // bind placement, one unit up and half a unit out.
    let arm = matrices[2].transform_point3(Vec3::ZERO);
    assert!((arm - glam::vec3(0.5, 1.0, 0.0)).length() < 1e-6);
}

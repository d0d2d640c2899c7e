//! Integration tests for the rig-anim crate

mod blending;
mod controller;

pub mod fixtures {
    use std::collections::BTreeMap;

    use glam::{Quat, vec3};
    use rig_anim::{
        AnimationClip, AnimationController, Bone, BoneTrack, Channel, ClipRegistry,
        ControllerConfig, MotionClips, Skeleton, Transform,
    };

    /// Root, spine, arm: enough hierarchy to exercise parent-chain
    /// composition without drowning the assertions.
    pub fn skeleton() -> Skeleton {
        Skeleton::new(vec![
            Bone::root("root"),
            Bone::child("spine", 0)
                .with_bind_local(Transform::from_translation(vec3(0.0, 1.0, 0.0))),
            Bone::child("arm", 1)
                .with_bind_local(Transform::from_translation(vec3(0.5, 0.0, 0.0))),
        ])
        .unwrap()
    }

    fn keyed_clip(name: &str, duration: f32, root_height: f32) -> AnimationClip {
        // One translation channel on the root and one rotation channel on
        // the arm; the other bones ride their bind transforms.
        let mut tracks = BTreeMap::new();
        tracks.insert(
            0,
            BoneTrack {
                translation: Channel::new(
                    vec![0.0, duration / 2.0],
                    vec![vec3(0.0, root_height, 0.0), vec3(0.0, root_height + 0.1, 0.0)],
                ),
                ..BoneTrack::default()
            },
        );
        tracks.insert(
            2,
            BoneTrack {
                rotation: Channel::new(
                    vec![0.0, duration / 2.0],
                    vec![Quat::IDENTITY, Quat::from_rotation_x(0.8)],
                ),
                ..BoneTrack::default()
            },
        );
        AnimationClip::new(name, duration, tracks).unwrap()
    }

    pub fn registry() -> ClipRegistry {
        let mut registry = ClipRegistry::new();
        for (index, (name, duration)) in [
            ("idle", 3.3),
            ("walk", 2.06),
            ("punch", 1.03),
            ("kick", 1.6),
            ("talk", 3.6),
        ]
        .into_iter()
        .enumerate()
        {
            registry
                .register(keyed_clip(name, duration, index as f32))
                .unwrap();
        }
        registry
    }

    pub fn controller() -> AnimationController {
        // Make the controller's transition logging visible under RUST_LOG
        let _ = env_logger::builder().is_test(true).try_init();

        let registry = registry();
        let clips = MotionClips::by_name(&registry).unwrap();
        AnimationController::new(registry, clips, ControllerConfig::default()).unwrap()
    }
}

//! The built-in demo rig: a five-bone biped torso with the five controller
//! clips, so every subcommand works without any asset files on disk.

use std::collections::BTreeMap;

use glam::{Quat, Vec3, vec3};
use rig_anim::{AnimationClip, Bone, BoneTrack, Channel, Transform};

use crate::rigfile::RigFile;

/// Clip durations lifted from the reference motion set
const CLIPS: [(&str, f32); 5] = [
    ("idle", 3.3),
    ("walk", 2.06),
    ("punch", 1.03),
    ("kick", 1.6),
    ("talk", 3.6),
];

/// Build the demo rig
pub fn rig() -> RigFile {
    RigFile {
        bones: bones(),
        clips: CLIPS
            .into_iter()
            .map(|(name, duration)| clip(name, duration))
            .collect(),
    }
}

fn bones() -> Vec<Bone> {
    vec![
        Bone::root("root"),
        Bone::child("spine", 0).with_bind_local(Transform::from_translation(vec3(0.0, 1.0, 0.0))),
        Bone::child("head", 1).with_bind_local(Transform::from_translation(vec3(0.0, 0.4, 0.0))),
        Bone::child("arm.l", 1)
            .with_bind_local(Transform::from_translation(vec3(0.3, 0.3, 0.0))),
        Bone::child("arm.r", 1)
            .with_bind_local(Transform::from_translation(vec3(-0.3, 0.3, 0.0))),
    ]
}

fn clip(name: &str, duration: f32) -> AnimationClip {
    let mut tracks = BTreeMap::new();

    // Root bob: subtle for idle/talk, pronounced for the movement clips
    let bob = match name {
        "idle" | "talk" => 0.02,
        _ => 0.08,
    };
    tracks.insert(
        0,
        BoneTrack {
            translation: keys(
                duration,
                &[
                    vec3(0.0, 0.0, 0.0),
                    vec3(0.0, bob, 0.0),
                    vec3(0.0, 0.0, 0.0),
                    vec3(0.0, bob, 0.0),
                ],
            ),
            ..BoneTrack::default()
        },
    );

    // Arms swing opposite each other; the punch leads with the right
    let swing = match name {
        "punch" => 1.2,
        "kick" => 0.9,
        "walk" => 0.6,
        _ => 0.15,
    };
    tracks.insert(
        3,
        BoneTrack {
            rotation: rotation_keys(duration, swing),
            ..BoneTrack::default()
        },
    );
    tracks.insert(
        4,
        BoneTrack {
            rotation: rotation_keys(duration, -swing),
            ..BoneTrack::default()
        },
    );

    // Head nod on the talk clip only
    if name == "talk" {
        tracks.insert(
            2,
            BoneTrack {
                rotation: rotation_keys(duration, 0.2),
                ..BoneTrack::default()
            },
        );
    }

    AnimationClip::new(name, duration, tracks)
        .unwrap_or_else(|error| panic!("demo clip '{name}' is invalid: {error}"))
}

fn keys(duration: f32, values: &[Vec3]) -> Channel<Vec3> {
    let step = duration / values.len() as f32;
    Channel::new(
        (0..values.len()).map(|index| index as f32 * step).collect(),
        values.to_vec(),
    )
}

fn rotation_keys(duration: f32, amplitude: f32) -> Channel<Quat> {
    let values = [
        Quat::IDENTITY,
        Quat::from_rotation_x(amplitude),
        Quat::IDENTITY,
        Quat::from_rotation_x(-amplitude),
    ];
    let step = duration / values.len() as f32;
    Channel::new(
        (0..values.len()).map(|index| index as f32 * step).collect(),
        values.to_vec(),
    )
}

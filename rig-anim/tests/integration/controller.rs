//! End-to-end controller scenarios: full input-to-phase cycles at a fixed
//! frame cadence.

use rig_anim::{Actions, Directions, InputSnapshot, Motion, Phase};

use crate::fixtures;

const DT: f32 = 0.1;

#[test]
fn walk_entry_commits_on_the_seventeenth_increment() {
    let controller = fixtures::controller();
    let forward = InputSnapshot::holding(Directions::FORWARD);
    let mut state = controller.initial_state();

    state = controller.step(state, &forward, DT).unwrap();
    assert_eq!(state.phase, Phase::Entering(Motion::Walk));
    assert!((state.blend.factor() - 0.055).abs() < 1e-4);

    let mut frames = 1;
    while state.phase == Phase::Entering(Motion::Walk) {
        state = controller.step(state, &forward, DT).unwrap();
        frames += 1;
        assert!(frames < 100, "walk blend never committed");
    }

    // 0.9 / 0.055 is 16.4 increments, so the 17th pushes past the
    // threshold and commits.
    assert_eq!(frames, 17);
    assert_eq!(state.phase, Phase::Active(Motion::Walk));
    assert_eq!(state.blend.secondary(), None);

    // Every held frame displaced the character by speed * dt.
    let expected = 2.0 * DT * frames as f32;
    assert!((state.locomotion.position.z - expected).abs() < 1e-4);
    assert_eq!(state.locomotion.yaw_degrees, 180.0);
}

#[test]
fn blend_factor_is_monotonic_until_commit() {
    let controller = fixtures::controller();
    let forward = InputSnapshot::holding(Directions::FORWARD);
    let mut state = controller.initial_state();
    let mut previous = 0.0;

    for _ in 0..17 {
        state = controller.step(state, &forward, DT).unwrap();
        if state.phase != Phase::Entering(Motion::Walk) {
            break;
        }
        assert!(state.blend.factor() >= previous);
        previous = state.blend.factor();
    }

    assert_eq!(state.phase, Phase::Active(Motion::Walk));
}

#[test]
fn releasing_keys_exits_walk_the_same_frame() {
    let controller = fixtures::controller();
    let forward = InputSnapshot::holding(Directions::FORWARD);
    let mut state = controller.initial_state();

    while state.phase != Phase::Active(Motion::Walk) {
        state = controller.step(state, &forward, DT).unwrap();
    }
    let position = state.locomotion.position;

    state = controller.step(state, &InputSnapshot::idle(), DT).unwrap();

    assert_eq!(state.phase, Phase::Exiting(Motion::Walk));
    assert_eq!(state.blend.factor(), 0.0);
    // No displacement once nothing is held.
    assert_eq!(state.locomotion.position, position);
}

#[test]
fn committed_blends_never_reenter_the_same_phase() {
    let controller = fixtures::controller();
    let forward = InputSnapshot::holding(Directions::FORWARD);
    let mut state = controller.initial_state();

    let mut seen_active = false;
    for _ in 0..40 {
        state = controller.step(state, &forward, DT).unwrap();
        if seen_active {
            assert_ne!(state.phase, Phase::Entering(Motion::Walk));
        }
        if state.phase == Phase::Active(Motion::Walk) {
            seen_active = true;
        }
    }
    assert!(seen_active);
}

#[test]
fn idle_phase_survives_the_exit_commit() {
    let controller = fixtures::controller();
    let mut state = controller.initial_state();

    // Enter and finish a punch, then let the exit blend run to its commit.
    state = controller
        .step(state, &InputSnapshot::pressing(Actions::PUNCH), DT)
        .unwrap();
    assert_eq!(state.phase, Phase::Entering(Motion::Punch));

    let mut guard = 0;
    loop {
        let previous = state;
        state = controller.step(state, &InputSnapshot::idle(), DT).unwrap();
        if state.phase == Phase::Resting {
            // The idle cursor picked up exactly where the exit blend's
            // secondary cursor was: continued, not reset to zero.
            let at_commit = previous.blend.secondary().unwrap().time();
            assert!((state.blend.primary().time() - (at_commit + DT)).abs() < 1e-5);
            assert!(state.blend.primary().time() > 0.0);
            break;
        }
        guard += 1;
        assert!(guard < 200, "punch cycle never returned to resting");
    }
}

#[test]
fn talk_gate_blocks_exit_until_its_minimum() {
    let controller = fixtures::controller();
    let mut state = controller.initial_state();

    state = controller
        .step(state, &InputSnapshot::pressing(Actions::TALK), DT)
        .unwrap();
    while state.phase == Phase::Entering(Motion::Talk) {
        state = controller.step(state, &InputSnapshot::idle(), DT).unwrap();
    }
    assert_eq!(state.phase, Phase::Active(Motion::Talk));

    // The exit fires on exactly the first frame whose pre-step time has
    // passed the gate; until then no input could have shortened it anyway.
    let mut guard = 0;
    loop {
        let before = state.blend.primary().time();
        state = controller.step(state, &InputSnapshot::idle(), DT).unwrap();

        match state.phase {
            Phase::Active(Motion::Talk) => {
                assert!(before <= Motion::Talk.min_active_secs());
            }
            Phase::Exiting(Motion::Talk) => {
                assert!(before > Motion::Talk.min_active_secs());
                break;
            }
            other => panic!("unexpected phase {other}"),
        }

        guard += 1;
        assert!(guard < 100, "talk gate never opened");
    }
}

#[test]
fn cursor_times_stay_inside_clip_durations() {
    let controller = fixtures::controller();
    let mut state = controller.initial_state();

    let script = [
        InputSnapshot::holding(Directions::FORWARD | Directions::LEFT),
        InputSnapshot::idle(),
        InputSnapshot::pressing(Actions::TALK),
        InputSnapshot::idle(),
    ];

    for frame in 0..400 {
        let input = script[(frame / 25) % script.len()];
        state = controller.step(state, &input, 0.033).unwrap();

        let primary = state.blend.primary();
        let duration = controller
            .registry()
            .get(primary.clip())
            .unwrap()
            .duration();
        assert!((0.0..duration).contains(&primary.time()));

        if let Some(secondary) = state.blend.secondary() {
            let duration = controller
                .registry()
                .get(secondary.clip())
                .unwrap()
                .duration();
            assert!((0.0..duration).contains(&secondary.time()));
        }
    }
}

#[test]
fn walk_then_punch_sequence_returns_to_rest() {
    let controller = fixtures::controller();
    let mut state = controller.initial_state();
    let forward = InputSnapshot::holding(Directions::FORWARD);

    // Walk for a while, stop, then punch once everything settled.
    for _ in 0..30 {
        state = controller.step(state, &forward, DT).unwrap();
    }
    assert_eq!(state.phase, Phase::Active(Motion::Walk));

    let mut guard = 0;
    while state.phase != Phase::Resting {
        state = controller.step(state, &InputSnapshot::idle(), DT).unwrap();
        guard += 1;
        assert!(guard < 200);
    }

    state = controller
        .step(state, &InputSnapshot::pressing(Actions::PUNCH), DT)
        .unwrap();
    assert_eq!(state.phase, Phase::Entering(Motion::Punch));
}

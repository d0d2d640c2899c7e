//! Integration tests for the rig-rs CLI

use assert_cmd::Command;
use predicates::prelude::*;

fn rig_rs() -> Command {
    Command::cargo_bin("rig-rs").expect("binary builds")
}

#[test]
fn rig_info_lists_the_demo_clips() {
    rig_rs()
        .args(["rig", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("idle"))
        .stdout(predicate::str::contains("walk"))
        .stdout(predicate::str::contains("talk"));
}

#[test]
fn simulate_walks_through_the_demo_script() {
    rig_rs()
        .args(["simulate", "--duration", "4", "--fps", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resting"))
        .stdout(predicate::str::contains("entering(walk)"))
        .stdout(predicate::str::contains("active(walk)"))
        .stdout(predicate::str::contains("exiting(walk)"));
}

#[test]
fn simulate_rejects_a_zero_fps() {
    rig_rs()
        .args(["simulate", "--fps", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fps"));
}

#[test]
fn export_then_info_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let rig_path = dir.path().join("demo.json");

    rig_rs()
        .args(["rig", "export", "-o"])
        .arg(&rig_path)
        .assert()
        .success();

    rig_rs()
        .args(["rig", "info", "--detailed", "--rig"])
        .arg(&rig_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("punch"))
        .stdout(predicate::str::contains("arm.l"));
}

#[test]
fn simulate_accepts_a_script_file() {
    let dir = tempfile::tempdir().unwrap();
    let script_path = dir.path().join("script.json");
    std::fs::write(
        &script_path,
        r#"[{"kind": "press", "action": "punch", "at": 0.2}]"#,
    )
    .unwrap();

    rig_rs()
        .args(["simulate", "--duration", "5", "--script"])
        .arg(&script_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("entering(punch)"));
}

#[test]
fn simulate_fails_on_a_cut_to_an_unknown_clip() {
    let dir = tempfile::tempdir().unwrap();
    let script_path = dir.path().join("script.json");
    std::fs::write(
        &script_path,
        r#"[{"kind": "cut", "clip": "cartwheel", "at": 0.5}]"#,
    )
    .unwrap();

    rig_rs()
        .args(["simulate", "--duration", "2", "--script"])
        .arg(&script_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cartwheel"));
}

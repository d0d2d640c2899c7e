//! Headless controller simulation: replay a scripted input timeline and
//! print the state-transition timeline the render loop would have seen.

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Args;

use rig_anim::{AnimationController, ControllerConfig, MotionClips};

use crate::demo;
use crate::rigfile::RigFile;
use crate::script::Script;

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to a rig JSON file; the built-in demo rig when omitted
    #[arg(long)]
    pub rig: Option<PathBuf>,

    /// Path to an input script JSON; a built-in demo timeline when omitted
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    pub fps: f32,

    /// Simulated run length in seconds
    #[arg(long, default_value_t = 15.0)]
    pub duration: f32,

    /// Blend accumulator growth per second
    #[arg(long, default_value_t = ControllerConfig::default().blend_rate)]
    pub blend_rate: f32,

    /// Walk speed in units per second
    #[arg(long, default_value_t = ControllerConfig::default().move_speed)]
    pub move_speed: f32,

    /// Print the final bone matrices after the run
    #[arg(long)]
    pub matrices: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    ensure!(args.fps > 0.0, "fps must be positive");
    ensure!(args.duration >= 0.0, "duration must not be negative");

    let rig = match &args.rig {
        Some(path) => RigFile::load(path)?,
        None => demo::rig(),
    };
    let (skeleton, registry) = rig.into_parts()?;

    let clips = MotionClips::by_name(&registry)
        .context("rig must carry clips named idle, walk, punch, kick and talk")?;
    let config = ControllerConfig {
        blend_rate: args.blend_rate,
        move_speed: args.move_speed,
    };
    let controller = AnimationController::new(registry, clips, config)?;

    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::demo(),
    };

    let dt = 1.0 / args.fps;
    let frames = (args.duration * args.fps).round() as u64;
    let mut state = controller.initial_state();

    println!("{:>8}  {}", "time", "phase");
    println!("{:>8}  {}", "0.000s", state.phase);

    for frame in 0..frames {
        let now = (frame + 1) as f32 * dt;
        let prev = if frame == 0 { -1.0 } else { frame as f32 * dt };

        let input = script
            .snapshot(prev, now, controller.registry())
            .with_context(|| format!("script event in frame ending {now:.3}s"))?;
        let next = controller.step(state, &input, dt)?;

        if next.phase != state.phase {
            println!("{now:>7.3}s  {}", next.phase);
        }
        state = next;
    }

    println!();
    println!(
        "after {frames} frames: position ({:.3}, {:.3}, {:.3}), yaw {:.0} degrees, phase {}",
        state.locomotion.position.x,
        state.locomotion.position.y,
        state.locomotion.position.z,
        state.locomotion.yaw_degrees,
        state.phase
    );

    if args.matrices {
        let matrices = controller.evaluate(&state, &skeleton)?;
        println!();
        println!("final bone matrices (translation column):");
        for (bone, matrix) in skeleton.bones().iter().zip(&matrices) {
            let translation = matrix.w_axis;
            println!(
                "  {:<12} ({:+.3}, {:+.3}, {:+.3})",
                bone.name, translation.x, translation.y, translation.z
            );
        }
    }

    Ok(())
}

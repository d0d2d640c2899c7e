//! Rig inspection and export command implementations

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;

use crate::demo;
use crate::rigfile::RigFile;

#[derive(Subcommand)]
pub enum RigCommands {
    /// Display information about a rig
    Info {
        /// Path to a rig JSON file; the built-in demo rig when omitted
        #[arg(long)]
        rig: Option<PathBuf>,

        /// Show per-bone track detail
        #[arg(short, long)]
        detailed: bool,
    },

    /// Export a rig as JSON
    Export {
        /// Path to a rig JSON file; the built-in demo rig when omitted
        #[arg(long)]
        rig: Option<PathBuf>,

        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn execute(command: RigCommands) -> Result<()> {
    match command {
        RigCommands::Info { rig, detailed } => info(rig.as_deref(), detailed),
        RigCommands::Export { rig, output } => export(rig.as_deref(), output.as_deref()),
    }
}

fn load(path: Option<&Path>) -> Result<RigFile> {
    match path {
        Some(path) => RigFile::load(path),
        None => Ok(demo::rig()),
    }
}

fn info(path: Option<&Path>, detailed: bool) -> Result<()> {
    let rig = load(path)?;
    let (skeleton, registry) = rig.into_parts()?;

    println!("Bones: {}", skeleton.len());
    for (index, bone) in skeleton.bones().iter().enumerate() {
        let parent = match bone.parent {
            Some(parent) => skeleton.bones()[usize::from(parent)].name.as_str(),
            None => "-",
        };
        println!("  {index:>3}  {:<12} parent: {parent}", bone.name);
    }

    println!();
    println!("Clips: {}", registry.len());
    println!("  {:<12} {:>9} {:>13}", "name", "duration", "keyed bones");
    for (_, clip) in registry.iter() {
        println!(
            "  {:<12} {:>8.2}s {:>13}",
            clip.name(),
            clip.duration(),
            clip.track_count()
        );

        if detailed {
            for (index, bone) in skeleton.bones().iter().enumerate() {
                if let Some(track) = clip.track(index as u16) {
                    println!(
                        "      {:<12} t:{} r:{} s:{}",
                        bone.name,
                        track.translation.len(),
                        track.rotation.len(),
                        track.scale.len()
                    );
                }
            }
        }
    }

    Ok(())
}

fn export(path: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let rig = load(path)?;

    match output {
        Some(output) => {
            rig.save(output)?;
            log::info!("wrote rig to {}", output.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&rig)?),
    }

    Ok(())
}

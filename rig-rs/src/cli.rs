//! Root CLI structure for rig-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rig-rs")]
#[command(about = "Command-line tools for animation rigs and the motion controller", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rig inspection and export
    Rig {
        #[command(subcommand)]
        command: crate::commands::rig::RigCommands,
    },

    /// Run a scripted input timeline through the motion controller
    Simulate(crate::commands::simulate::SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

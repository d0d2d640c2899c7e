//! Command implementations for the rig-rs CLI

pub mod rig;
pub mod simulate;

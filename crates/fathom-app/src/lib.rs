//! FATHOM headless host.
//!
//! Wires the simulation crates to a frame loop thread and a scripted
//! autopilot, so scenarios can be run and inspected from the command line.

pub mod autopilot;
pub mod game_loop;
pub mod state;

pub use fathom_core as core;

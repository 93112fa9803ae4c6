//! Simulation engine for FATHOM.
//!
//! Owns the hecs world of mission objectives, the per-session simulation
//! context and the static environment, runs the per-frame systems in
//! order, and produces `SessionSnapshot`s for presentation collaborators.

pub mod context;
pub mod engine;
pub mod mission;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use fathom_core as core;
pub use engine::{SimConfig, SimulationEngine};

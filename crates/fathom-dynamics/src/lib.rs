//! Vehicle dynamics for FATHOM.
//!
//! Turns a normalized command vector into velocity, yaw and position
//! changes under exponential hydrodynamic drag. Pure functions over
//! plain data; no ECS or session state.

pub mod integrator;

pub use fathom_core as core;
pub use integrator::{IntegratorParams, StepReport};

#[cfg(test)]
mod tests;

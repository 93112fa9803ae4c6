//! Core types and definitions for the FATHOM vehicle simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! vehicle state, control input, operator commands, state snapshots,
//! events, and tuning constants. It has no dependency on any runtime
//! framework, renderer, or input device.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

pub use glam::DVec3;

#[cfg(test)]
mod tests;

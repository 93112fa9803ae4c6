//! Per-frame systems, run by the engine in a fixed order.
//!
//! Systems are free functions over the simulation context, the static
//! environment and (for objectives) the hecs world. They hold no state.

pub mod collision;
pub mod damage;
pub mod motion;
pub mod objectives;
pub mod snapshot;

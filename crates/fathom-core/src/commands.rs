//! Operator commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.
//! Per-frame thrust input travels separately as a `ControlInput`.

use serde::{Deserialize, Serialize};

/// All operator actions outside of per-frame thrust control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OperatorCommand {
    /// Leave the briefing and start the session.
    StartMission,
    /// Discard the current session and start the scenario again.
    RestartMission,
    /// Freeze the simulation.
    Pause,
    /// Continue a paused simulation.
    Resume,
    /// Scale thrust, speed limits and yaw response (clamped to 0.25..=20).
    SetSpeedMultiplier { value: f64 },
}

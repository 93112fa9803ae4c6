//! Session snapshot: the complete read-only state handed to camera,
//! HUD and logging collaborators after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SessionEvent;
use crate::types::{SimTime, VehicleState};

/// Complete session state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub mission: MissionState,
    pub scenario: String,
    pub speed_multiplier: f64,
    pub vehicle: VehicleView,
    pub hull: HullView,
    pub score: u32,
    pub objectives: Vec<ObjectiveView>,
    pub collision: CollisionView,
    /// Events raised during this tick only.
    pub events: Vec<SessionEvent>,
}

/// Vehicle kinematics for camera and HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleView {
    pub state: VehicleState,
    /// Speed (m/s).
    pub speed: f64,
    /// Depth below surface (m).
    pub depth: f64,
    /// Compass heading (degrees).
    pub heading_deg: f64,
}

/// Hull damage status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HullView {
    /// Accumulated damage, 0..=100.
    pub damage: f64,
    /// Remaining integrity in percent.
    pub integrity_pct: f64,
}

/// One objective as shown in the mission panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub id: u32,
    pub label: String,
    pub points: u32,
    pub completed: bool,
    /// Target point for proximity objectives.
    pub target: Option<DVec3>,
    /// Distance from the vehicle to the target (m).
    pub distance: Option<f64>,
}

/// Collision summary for the tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollisionView {
    /// Magnitude of the proximity-probe correction applied (m).
    pub probe_correction: f64,
    /// Whether a discrete obstacle was touched.
    pub obstacle_contact: bool,
    /// Corridor status; `None` when the scenario has no corridor.
    pub inside_corridor: Option<bool>,
}

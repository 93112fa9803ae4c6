//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Evaluation lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// How an objective is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ObjectiveKind {
    /// Enter the sphere of `trigger_radius` around `target`.
    ProximityTarget { target: DVec3, trigger_radius: f64 },
    /// Satisfied by scenario setup; completes on first evaluation.
    Automatic,
}

/// A scored mission objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Stable id in scenario order.
    pub id: u32,
    pub label: String,
    pub kind: ObjectiveKind,
    pub points: u32,
    /// Once set, never cleared or re-evaluated.
    pub completed: bool,
}

impl Objective {
    pub fn target(&self) -> Option<DVec3> {
        match self.kind {
            ObjectiveKind::ProximityTarget { target, .. } => Some(target),
            ObjectiveKind::Automatic => None,
        }
    }
}

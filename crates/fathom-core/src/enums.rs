//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Session phase (host-facing lifecycle).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Scenario loaded, waiting for the operator to start.
    #[default]
    Briefing,
    /// Simulation running.
    Active,
    /// Simulation held; state is frozen.
    Paused,
}

/// Mission outcome state machine. Failed and Completed are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionState {
    #[default]
    Running,
    /// Hull damage reached the maximum.
    Failed,
    /// Every objective was completed.
    Completed,
}

impl MissionState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, MissionState::Running)
    }
}

/// Severity tag for the event feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventLevel {
    Info,
    Warning,
    Success,
    Danger,
}

/// Built-in training scenarios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Open-water familiarization with proximity targets.
    #[default]
    Orientation,
    /// Spheres, boxes, cylinders and a wall with openings.
    ObstacleCourse,
    /// Follow a pipeline route inside a corridor.
    PipelineInspection,
    /// Procedurally scattered debris.
    DebrisField,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 4] = [
        ScenarioId::Orientation,
        ScenarioId::ObstacleCourse,
        ScenarioId::PipelineInspection,
        ScenarioId::DebrisField,
    ];
}

//! Scenario definitions: built-in training dives and JSON-authored ones.
//!
//! A scenario is plain data. `world_setup` turns it into an `Environment`,
//! a spawned vehicle and objective entities.

use std::path::Path;

use anyhow::{bail, ensure, Context};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use fathom_core::components::ObjectiveKind;
use fathom_core::constants::*;
use fathom_core::enums::ScenarioId;
use fathom_core::types::Current;
use fathom_geometry::corridor::MAX_SAMPLES_PER_SEGMENT;
use fathom_geometry::shapes::wall_with_openings;
use fathom_geometry::{Obstacle, PathCorridor};

use crate::systems::collision::corridor::containment_threshold;

/// Upper bound on scattered debris pieces per scenario.
pub const MAX_DEBRIS_COUNT: usize = 200;

/// Upper bound on corridor checkpoints per scenario.
pub const MAX_CORRIDOR_CHECKPOINTS: usize = 256;

/// A complete dive site and its mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Water depth at the site (m).
    pub seabed_depth: f64,
    #[serde(default)]
    pub current: Current,
    pub spawn: DVec3,
    #[serde(default)]
    pub spawn_yaw: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
    #[serde(default = "default_half_extent")]
    pub world_half_extent: f64,
    #[serde(default)]
    pub vehicle: VehicleSpec,
    #[serde(default)]
    pub geometry: Vec<GeometrySpec>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub corridor: Option<CorridorSpec>,
    #[serde(default)]
    pub debris: Option<DebrisFieldSpec>,
    #[serde(default)]
    pub objectives: Vec<ObjectiveSpec>,
}

fn default_visibility() -> f64 {
    30.0
}

fn default_half_extent() -> f64 {
    DEFAULT_WORLD_HALF_EXTENT
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    pub mass: f64,
    pub added_mass: f64,
}

impl Default for VehicleSpec {
    fn default() -> Self {
        Self {
            mass: DEFAULT_VEHICLE_MASS,
            added_mass: DEFAULT_ADDED_MASS,
        }
    }
}

/// Collidable scene meshes, standing in for loaded art assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometrySpec {
    /// Flat seabed plane at the scenario's depth.
    Seabed,
    /// Box-shaped rock outcrop.
    Rock { center: DVec3, half_extents: DVec3 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorSpec {
    pub checkpoints: Vec<DVec3>,
    pub radius: f64,
    #[serde(default = "default_samples_per_segment")]
    pub samples_per_segment: usize,
}

fn default_samples_per_segment() -> usize {
    CORRIDOR_SAMPLES_PER_SEGMENT
}

/// Randomly scattered spherical debris, placed with the session seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebrisFieldSpec {
    pub count: usize,
    pub center: DVec3,
    pub half_extents: DVec3,
    pub min_radius: f64,
    pub max_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveSpec {
    pub label: String,
    pub points: u32,
    #[serde(flatten)]
    pub kind: ObjectiveKind,
}

impl ObjectiveSpec {
    pub fn reach(label: &str, target: DVec3, trigger_radius: f64, points: u32) -> Self {
        Self {
            label: label.to_string(),
            points,
            kind: ObjectiveKind::ProximityTarget {
                target,
                trigger_radius,
            },
        }
    }

    pub fn automatic(label: &str, points: u32) -> Self {
        Self {
            label: label.to_string(),
            points,
            kind: ObjectiveKind::Automatic,
        }
    }
}

impl ScenarioDefinition {
    /// Reject definitions the engine cannot run.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.name.trim().is_empty(), "scenario name is empty");
        ensure!(
            self.seabed_depth.is_finite()
                && -self.seabed_depth + SEABED_MARGIN < SURFACE_CEILING_Y,
            "seabed depth {} leaves no water column",
            self.seabed_depth
        );
        ensure!(
            self.world_half_extent.is_finite() && self.world_half_extent > 0.0,
            "world half extent must be positive"
        );
        ensure!(
            self.visibility.is_finite() && self.visibility > 0.0,
            "visibility must be positive"
        );
        ensure!(
            self.current.x.is_finite() && self.current.y.is_finite(),
            "current must be finite"
        );
        ensure!(
            self.vehicle.mass.is_finite()
                && self.vehicle.mass > 0.0
                && self.vehicle.added_mass.is_finite()
                && self.vehicle.added_mass >= 0.0,
            "vehicle mass must be positive and added mass non-negative"
        );
        ensure!(
            self.spawn.is_finite() && self.spawn_yaw.is_finite(),
            "spawn pose must be finite"
        );
        let floor_y = -self.seabed_depth + SEABED_MARGIN;
        ensure!(
            self.spawn.y <= SURFACE_CEILING_Y
                && self.spawn.y >= floor_y
                && self.spawn.x.abs() <= self.world_half_extent
                && self.spawn.z.abs() <= self.world_half_extent,
            "spawn point {:?} lies outside the world bounds",
            self.spawn
        );

        for (index, obstacle) in self.obstacles.iter().enumerate() {
            ensure!(
                obstacle.is_well_formed(),
                "obstacle {index} ({}) is malformed",
                obstacle.kind_name()
            );
        }

        for (index, spec) in self.geometry.iter().enumerate() {
            if let GeometrySpec::Rock {
                center,
                half_extents,
            } = spec
            {
                ensure!(
                    center.is_finite() && half_extents.is_finite() && half_extents.min_element() > 0.0,
                    "rock {index} has a degenerate extent"
                );
            }
        }

        if let Some(corridor) = &self.corridor {
            ensure!(
                corridor.checkpoints.len() >= 2,
                "corridor needs at least two checkpoints"
            );
            ensure!(
                corridor.checkpoints.iter().all(|c| c.is_finite()),
                "corridor checkpoints must be finite"
            );
            ensure!(
                corridor.checkpoints.len() <= MAX_CORRIDOR_CHECKPOINTS,
                "corridor has {} checkpoints, limit is {MAX_CORRIDOR_CHECKPOINTS}",
                corridor.checkpoints.len()
            );
            let min_radius = VEHICLE_COLLISION_RADIUS + CORRIDOR_MARGIN;
            ensure!(
                corridor.radius.is_finite() && corridor.radius > min_radius,
                "corridor radius {} must exceed {min_radius} m",
                corridor.radius
            );
            ensure!(
                (1..=MAX_SAMPLES_PER_SEGMENT).contains(&corridor.samples_per_segment),
                "corridor samples per segment must be in 1..={MAX_SAMPLES_PER_SEGMENT}, got {}",
                corridor.samples_per_segment
            );

            // A vehicle on the centreline between two samples must still be inside.
            let path = PathCorridor::from_checkpoints(
                &corridor.checkpoints,
                corridor.radius,
                corridor.samples_per_segment,
            );
            let threshold = containment_threshold(&path);
            let gap = path.max_sample_gap();
            ensure!(
                gap <= 2.0 * threshold,
                "corridor samples are {gap:.2} m apart, more than twice the {threshold:.2} m containment threshold; raise samples_per_segment"
            );
        }

        if let Some(debris) = &self.debris {
            ensure!(
                debris.count <= MAX_DEBRIS_COUNT,
                "debris count {} exceeds {MAX_DEBRIS_COUNT}",
                debris.count
            );
            ensure!(
                debris.center.is_finite()
                    && debris.half_extents.is_finite()
                    && debris.half_extents.min_element() >= 0.0,
                "debris field extent must be finite and non-negative"
            );
            ensure!(
                debris.min_radius > 0.0 && debris.max_radius >= debris.min_radius,
                "debris radii must satisfy 0 < min <= max"
            );
        }

        for spec in &self.objectives {
            ensure!(!spec.label.trim().is_empty(), "objective label is empty");
            if let ObjectiveKind::ProximityTarget {
                target,
                trigger_radius,
            } = spec.kind
            {
                if !target.is_finite() {
                    bail!("objective '{}' has a non-finite target", spec.label);
                }
                ensure!(
                    trigger_radius.is_finite() && trigger_radius > 0.0,
                    "objective '{}' needs a positive trigger radius",
                    spec.label
                );
            }
        }

        Ok(())
    }
}

/// Parse and validate a scenario from JSON.
pub fn load_scenario_json(json: &str) -> anyhow::Result<ScenarioDefinition> {
    let definition: ScenarioDefinition =
        serde_json::from_str(json).context("failed to parse scenario JSON")?;
    definition
        .validate()
        .with_context(|| format!("invalid scenario '{}'", definition.name))?;
    Ok(definition)
}

/// Read, parse and validate a scenario file.
pub fn load_scenario_file(path: &Path) -> anyhow::Result<ScenarioDefinition> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file {}", path.display()))?;
    load_scenario_json(&json)
}

/// Build the definition for a built-in scenario.
pub fn build(scenario: ScenarioId) -> ScenarioDefinition {
    match scenario {
        ScenarioId::Orientation => build_orientation(),
        ScenarioId::ObstacleCourse => build_obstacle_course(),
        ScenarioId::PipelineInspection => build_pipeline_inspection(),
        ScenarioId::DebrisField => build_debris_field(),
    }
}

/// Orientation: open water, gentle current, three waypoints.
fn build_orientation() -> ScenarioDefinition {
    ScenarioDefinition {
        name: "Orientation Dive".to_string(),
        description: "Get a feel for the vehicle in open water.".to_string(),
        seabed_depth: 40.0,
        current: Current { x: 0.1, y: 0.05 },
        spawn: DVec3::new(0.0, -5.0, 0.0),
        spawn_yaw: 0.0,
        visibility: 35.0,
        world_half_extent: 200.0,
        vehicle: VehicleSpec::default(),
        geometry: vec![
            GeometrySpec::Seabed,
            GeometrySpec::Rock {
                center: DVec3::new(15.0, -36.0, -25.0),
                half_extents: DVec3::new(4.0, 4.0, 4.0),
            },
        ],
        obstacles: Vec::new(),
        corridor: None,
        debris: None,
        objectives: vec![
            ObjectiveSpec::automatic("Pre-dive systems check", 10),
            ObjectiveSpec::reach("Inspect the survey buoy", DVec3::new(0.0, -10.0, -30.0), 5.0, 100),
            ObjectiveSpec::reach("Reach the wreck marker", DVec3::new(20.0, -30.0, -40.0), 5.0, 150),
        ],
    }
}

/// Obstacle course: pillars, a crate stack and a wall with two openings.
fn build_obstacle_course() -> ScenarioDefinition {
    ScenarioDefinition {
        name: "Obstacle Course".to_string(),
        description: "Thread the vehicle through a field of structures.".to_string(),
        seabed_depth: 30.0,
        current: Current::default(),
        spawn: DVec3::new(0.0, -10.0, 10.0),
        spawn_yaw: 0.0,
        visibility: 25.0,
        world_half_extent: 150.0,
        vehicle: VehicleSpec::default(),
        geometry: vec![GeometrySpec::Seabed],
        obstacles: vec![
            Obstacle::Cylinder {
                center: DVec3::new(-6.0, -15.0, -15.0),
                radius: 1.5,
                height: 30.0,
            },
            Obstacle::Cylinder {
                center: DVec3::new(6.0, -15.0, -15.0),
                radius: 1.5,
                height: 30.0,
            },
            Obstacle::Sphere {
                center: DVec3::new(0.0, -12.0, -30.0),
                radius: 3.0,
            },
            Obstacle::Box {
                center: DVec3::new(-8.0, -26.0, -40.0),
                half_extents: DVec3::new(3.0, 3.0, 3.0),
            },
            wall_with_openings(
                DVec3::new(0.0, -14.0, -55.0),
                20.0,
                12.0,
                0.5,
                &[(-8.0, 4.0, 3.0, 3.0), (8.0, -4.0, 3.0, 3.0)],
            ),
        ],
        corridor: None,
        debris: None,
        objectives: vec![
            ObjectiveSpec::reach("Pass between the pillars", DVec3::new(0.0, -12.0, -15.0), 3.0, 50),
            ObjectiveSpec::reach("Round the buoy", DVec3::new(0.0, -12.0, -38.0), 4.0, 75),
            ObjectiveSpec::reach("Clear the wall", DVec3::new(-8.0, -10.0, -62.0), 4.0, 150),
        ],
    }
}

/// Pipeline inspection: follow a curved corridor along a seabed pipeline.
fn build_pipeline_inspection() -> ScenarioDefinition {
    let checkpoints = vec![
        DVec3::new(0.0, -20.0, 0.0),
        DVec3::new(0.0, -22.0, -30.0),
        DVec3::new(15.0, -25.0, -60.0),
        DVec3::new(30.0, -25.0, -90.0),
        DVec3::new(30.0, -28.0, -120.0),
    ];
    let objectives = vec![
        ObjectiveSpec::reach("Inspect flange A", checkpoints[1], 4.0, 100),
        ObjectiveSpec::reach("Inspect anode B", checkpoints[2], 4.0, 100),
        ObjectiveSpec::reach("Inspect field joint C", checkpoints[3], 4.0, 100),
        ObjectiveSpec::reach("Inspect pipeline end", checkpoints[4], 4.0, 200),
    ];
    ScenarioDefinition {
        name: "Pipeline Inspection".to_string(),
        description: "Survey the pipeline without leaving the inspection corridor.".to_string(),
        seabed_depth: 60.0,
        current: Current { x: -0.05, y: 0.0 },
        spawn: checkpoints[0],
        spawn_yaw: 0.0,
        visibility: 20.0,
        world_half_extent: 250.0,
        vehicle: VehicleSpec::default(),
        geometry: vec![GeometrySpec::Seabed],
        obstacles: Vec::new(),
        corridor: Some(CorridorSpec {
            checkpoints,
            radius: 6.0,
            samples_per_segment: CORRIDOR_SAMPLES_PER_SEGMENT,
        }),
        debris: None,
        objectives,
    }
}

/// Debris field: reach the far side of a seeded scatter of wreckage.
fn build_debris_field() -> ScenarioDefinition {
    ScenarioDefinition {
        name: "Debris Field".to_string(),
        description: "Cross a field of scattered wreckage to the recovery point.".to_string(),
        seabed_depth: 45.0,
        current: Current { x: 0.15, y: -0.1 },
        spawn: DVec3::new(0.0, -25.0, 0.0),
        spawn_yaw: 0.0,
        visibility: 15.0,
        world_half_extent: 200.0,
        vehicle: VehicleSpec::default(),
        geometry: vec![GeometrySpec::Seabed],
        obstacles: Vec::new(),
        corridor: None,
        debris: Some(DebrisFieldSpec {
            count: 24,
            center: DVec3::new(0.0, -25.0, -60.0),
            half_extents: DVec3::new(30.0, 10.0, 30.0),
            min_radius: 1.0,
            max_radius: 3.0,
        }),
        objectives: vec![
            ObjectiveSpec::automatic("Debris briefing acknowledged", 10),
            ObjectiveSpec::reach("Reach the recovery point", DVec3::new(0.0, -25.0, -120.0), 6.0, 250),
        ],
    }
}

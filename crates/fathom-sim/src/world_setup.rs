//! Session setup: turns a `ScenarioDefinition` into an environment,
//! a spawned vehicle and objective entities.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use fathom_core::components::{Objective, ObjectiveKind};
use fathom_core::types::{VehicleState, WorldBounds};
use fathom_dynamics::IntegratorParams;
use fathom_geometry::{Obstacle, PathCorridor, SceneGeometry, TriangleMesh};

use crate::context::Environment;
use crate::scenario::{DebrisFieldSpec, GeometrySpec, ScenarioDefinition};

/// Minimum gap kept between scattered debris and the spawn point or targets.
const DEBRIS_CLEARANCE: f64 = 4.0;
/// Placement attempts per requested debris piece before giving up.
const DEBRIS_ATTEMPTS_PER_PIECE: usize = 10;

/// Build the static environment for a scenario.
///
/// `extra_geometry` holds meshes registered by the host after scene load;
/// they are merged with the scenario's own geometry.
pub fn build_environment(
    definition: &ScenarioDefinition,
    extra_geometry: &SceneGeometry,
    rng: &mut ChaCha8Rng,
) -> Environment {
    let bounds = WorldBounds::for_seabed(definition.seabed_depth, definition.world_half_extent);

    let mut geometry = build_geometry(definition);
    geometry.extend(extra_geometry.clone());

    let mut obstacles = definition.obstacles.clone();
    if let Some(spec) = &definition.debris {
        let mut avoid = vec![definition.spawn];
        avoid.extend(definition.objectives.iter().filter_map(|o| match o.kind {
            ObjectiveKind::ProximityTarget { target, .. } => Some(target),
            ObjectiveKind::Automatic => None,
        }));
        let debris = scatter_debris(spec, &avoid, rng);
        tracing::debug!(requested = spec.count, placed = debris.len(), "scattered debris");
        obstacles.extend(debris);
    }

    let corridor = definition.corridor.as_ref().map(|spec| {
        PathCorridor::from_checkpoints(&spec.checkpoints, spec.radius, spec.samples_per_segment)
    });

    Environment {
        geometry,
        obstacles,
        corridor,
        params: IntegratorParams {
            current: definition.current,
            bounds,
        },
        seabed_depth: definition.seabed_depth,
        visibility: definition.visibility,
    }
}

/// Collidable meshes described by the scenario.
pub fn build_geometry(definition: &ScenarioDefinition) -> SceneGeometry {
    let mut geometry = SceneGeometry::default();
    for spec in &definition.geometry {
        let mesh = match *spec {
            GeometrySpec::Seabed => TriangleMesh::horizontal_plane(
                -definition.seabed_depth,
                definition.world_half_extent,
            ),
            GeometrySpec::Rock {
                center,
                half_extents,
            } => TriangleMesh::from_box(center, half_extents),
        };
        geometry.add_mesh(mesh);
    }
    geometry
}

/// Scatter spherical debris inside the field, keeping clear of `avoid` points.
/// May place fewer than requested if the field is too crowded.
pub fn scatter_debris(
    spec: &DebrisFieldSpec,
    avoid: &[DVec3],
    rng: &mut ChaCha8Rng,
) -> Vec<Obstacle> {
    let mut placed = Vec::with_capacity(spec.count);
    let mut attempts = spec.count * DEBRIS_ATTEMPTS_PER_PIECE;

    while placed.len() < spec.count && attempts > 0 {
        attempts -= 1;
        let offset = DVec3::new(
            rng.gen_range(-1.0..=1.0) * spec.half_extents.x,
            rng.gen_range(-1.0..=1.0) * spec.half_extents.y,
            rng.gen_range(-1.0..=1.0) * spec.half_extents.z,
        );
        let center = spec.center + offset;
        let radius = rng.gen_range(spec.min_radius..=spec.max_radius);

        let clear = avoid
            .iter()
            .all(|p| p.distance(center) > radius + DEBRIS_CLEARANCE);
        if clear {
            placed.push(Obstacle::Sphere { center, radius });
        }
    }
    placed
}

/// Place the vehicle at the scenario's spawn pose.
pub fn spawn_vehicle(definition: &ScenarioDefinition) -> VehicleState {
    let mut vehicle = VehicleState::spawn(definition.spawn, definition.spawn_yaw);
    vehicle.mass = definition.vehicle.mass;
    vehicle.added_mass = definition.vehicle.added_mass;
    vehicle
}

/// Spawn one entity per objective, ids in definition order.
pub fn spawn_objectives(world: &mut World, definition: &ScenarioDefinition) {
    for (id, spec) in definition.objectives.iter().enumerate() {
        world.spawn((Objective {
            id: id as u32,
            label: spec.label.clone(),
            kind: spec.kind,
            points: spec.points,
            completed: false,
        },));
    }
}

//! Snapshot system: builds a `SessionSnapshot` from the world and context.
//!
//! Read-only; never modifies the world.

use hecs::World;

use fathom_core::components::Objective;
use fathom_core::constants::MAX_DAMAGE;
use fathom_core::enums::SessionPhase;
use fathom_core::events::SessionEvent;
use fathom_core::state::*;
use fathom_core::types::VehicleState;

use crate::context::SimulationContext;
use crate::systems::collision::CollisionReport;

pub fn build_snapshot(
    world: &World,
    ctx: &SimulationContext,
    phase: SessionPhase,
    scenario: &str,
    collision: &CollisionReport,
    events: Vec<SessionEvent>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: ctx.time,
        phase,
        mission: ctx.mission,
        scenario: scenario.to_string(),
        speed_multiplier: ctx.speed_multiplier,
        vehicle: build_vehicle(&ctx.vehicle),
        hull: HullView {
            damage: ctx.damage.damage(),
            integrity_pct: (MAX_DAMAGE - ctx.damage.damage()) / MAX_DAMAGE * 100.0,
        },
        score: ctx.score,
        objectives: build_objectives(world, &ctx.vehicle),
        collision: CollisionView {
            probe_correction: collision.probe_correction,
            obstacle_contact: collision.obstacle_contact.is_some(),
            inside_corridor: collision.inside_corridor,
        },
        events,
    }
}

fn build_vehicle(vehicle: &VehicleState) -> VehicleView {
    VehicleView {
        state: *vehicle,
        speed: vehicle.speed(),
        depth: vehicle.depth(),
        heading_deg: vehicle.heading_degrees(),
    }
}

/// Objective list in id order.
fn build_objectives(world: &World, vehicle: &VehicleState) -> Vec<ObjectiveView> {
    let mut views: Vec<ObjectiveView> = world
        .query::<&Objective>()
        .iter()
        .map(|(_, objective)| {
            let target = objective.target();
            ObjectiveView {
                id: objective.id,
                label: objective.label.clone(),
                points: objective.points,
                completed: objective.completed,
                target,
                distance: target.map(|t| vehicle.position.distance(t)),
            }
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

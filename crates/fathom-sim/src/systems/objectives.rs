//! Objective tracker: completes objectives and awards score.

use hecs::World;

use fathom_core::components::{Objective, ObjectiveKind};
use fathom_core::enums::EventLevel;
use fathom_core::types::VehicleState;

use crate::context::SimulationContext;
use crate::mission;

/// Whether `objective` is satisfied by the vehicle's current state.
pub fn is_satisfied(objective: &Objective, vehicle: &VehicleState) -> bool {
    match objective.kind {
        ObjectiveKind::ProximityTarget {
            target,
            trigger_radius,
        } => vehicle.position.distance(target) < trigger_radius,
        ObjectiveKind::Automatic => true,
    }
}

/// Evaluate every incomplete objective. Returns points awarded this frame.
pub fn run(world: &mut World, ctx: &mut SimulationContext) -> u32 {
    if ctx.mission.is_terminal() {
        return 0;
    }

    // Collect completions first; events need `ctx` mutably.
    let mut completed = Vec::new();
    for (_entity, objective) in world.query_mut::<&mut Objective>() {
        if objective.completed || !is_satisfied(objective, &ctx.vehicle) {
            continue;
        }
        objective.completed = true;
        completed.push((objective.id, objective.label.clone(), objective.points));
    }
    completed.sort_by_key(|(id, _, _)| *id);

    let mut awarded = 0;
    for (id, label, points) in completed {
        awarded += points;
        ctx.score = ctx.score.saturating_add(points);
        tracing::debug!(objective = id, points, "objective complete");
        ctx.emit(
            EventLevel::Success,
            format!("Objective complete: {label} (+{points})"),
        );
    }
    awarded
}

/// True when at least one objective exists and all are completed.
///
/// An empty objective set is never complete, so free-dive scenarios run
/// until the vehicle is lost or the session ends.
pub fn all_completed(world: &World) -> bool {
    let mut query = world.query::<&Objective>();
    let mut any = false;
    for (_entity, objective) in query.iter() {
        if !objective.completed {
            return false;
        }
        any = true;
    }
    any
}

/// Flip the mission to Completed once every objective is done.
pub fn check_completion(world: &World, ctx: &mut SimulationContext) -> bool {
    if !mission::evaluate_completion(&mut ctx.mission, all_completed(world)) {
        return false;
    }
    tracing::info!(score = ctx.score, time = ctx.time.elapsed_secs, "mission complete");
    ctx.emit(
        EventLevel::Success,
        format!("Mission complete. Final score {}", ctx.score),
    );
    true
}

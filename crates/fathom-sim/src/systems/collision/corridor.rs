//! Corridor containment: keep the vehicle inside the path tube.

use glam::DVec3;

use fathom_core::constants::{CORRIDOR_MARGIN, CORRIDOR_VELOCITY_DAMPING, VEHICLE_COLLISION_RADIUS};
use fathom_core::types::{normalize_or_none, VehicleState};
use fathom_geometry::PathCorridor;

use super::response::CollisionResponse;

/// The vehicle has left the corridor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorExit {
    /// Nearest sampled path point.
    pub nearest: DVec3,
    /// Distance beyond the containment threshold (m).
    pub overshoot: f64,
    pub response: CollisionResponse,
}

/// Largest distance from the path the vehicle centre may sit at.
pub fn containment_threshold(corridor: &PathCorridor) -> f64 {
    corridor.radius() - VEHICLE_COLLISION_RADIUS - CORRIDOR_MARGIN
}

/// `None` while inside the corridor, or when the corridor has no samples.
pub fn detect(vehicle: &VehicleState, corridor: &PathCorridor) -> Option<CorridorExit> {
    let nearest = corridor.nearest_sample(vehicle.position)?;
    let threshold = containment_threshold(corridor);
    if nearest.distance <= threshold {
        return None;
    }

    let overshoot = nearest.distance - threshold;
    // Sitting exactly on the sample leaves no direction to push in.
    let push = normalize_or_none(nearest.point - vehicle.position)
        .map_or(DVec3::ZERO, |toward| toward * overshoot);

    Some(CorridorExit {
        nearest: nearest.point,
        overshoot,
        response: CollisionResponse::push(push).with_damping(CORRIDOR_VELOCITY_DAMPING),
    })
}

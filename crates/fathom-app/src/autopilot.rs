//! Scripted autopilot: steers toward the next incomplete proximity objective.

use glam::DVec3;

use fathom_core::state::SessionSnapshot;
use fathom_core::types::{CommandVector, ControlInput};
use fathom_dynamics::integrator::wrap_angle;

/// Heading error (rad) below which the autopilot drives forward at full rate.
const ALIGNED_HEADING: f64 = 0.5;
/// Distance (m) over which surge and heave taper off near the target.
const APPROACH_DISTANCE: f64 = 5.0;
const YAW_GAIN: f64 = 2.0;
const DEPTH_GAIN: f64 = 0.5;
const MIN_SURGE: f64 = 0.2;

/// Next target: the lowest-id incomplete objective with a target point.
pub fn next_target(snapshot: &SessionSnapshot) -> Option<DVec3> {
    snapshot
        .objectives
        .iter()
        .filter(|o| !o.completed)
        .find_map(|o| o.target)
}

/// Heading that points the vehicle's forward axis along `(dx, dz)`.
pub fn heading_to(dx: f64, dz: f64) -> f64 {
    (-dx).atan2(-dz)
}

/// Control input for this frame. Holds position when nothing is left to reach.
pub fn steer(snapshot: &SessionSnapshot) -> ControlInput {
    let Some(target) = next_target(snapshot) else {
        return ControlInput::default();
    };
    let vehicle = &snapshot.vehicle.state;
    let offset = target - vehicle.position;
    let horizontal = (offset.x * offset.x + offset.z * offset.z).sqrt();

    let yaw_error = wrap_angle(heading_to(offset.x, offset.z) - vehicle.yaw);
    let yaw = yaw_error * YAW_GAIN;
    let surge = if yaw_error.abs() < ALIGNED_HEADING {
        (horizontal / APPROACH_DISTANCE).clamp(MIN_SURGE, 1.0)
    } else {
        MIN_SURGE
    };
    let heave = offset.y * DEPTH_GAIN;

    ControlInput::new(CommandVector::new(surge, 0.0, heave, yaw), 0.0)
}

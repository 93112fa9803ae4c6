//! Per-frame motion integrator.
//!
//! Drag is applied as `v *= base^(dt * REFERENCE_FRAME_RATE_HZ)`, which gives
//! the same real-time decay at any frame rate.

use glam::DVec3;

use fathom_core::constants::*;
use fathom_core::types::{ControlInput, Current, VehicleState, WorldBounds};

/// Static per-session inputs to the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegratorParams {
    pub current: Current,
    pub bounds: WorldBounds,
}

/// Which boundaries clamped the vehicle during a step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub hit_ceiling: bool,
    pub hit_floor: bool,
    pub hit_horizontal: bool,
}

/// Linear acceleration at full command (m/s²).
pub fn acceleration(speed_multiplier: f64, effective_mass: f64) -> f64 {
    THRUST_FORCE / effective_mass * speed_multiplier
}

/// Speed limit (m/s).
pub fn max_speed(speed_multiplier: f64) -> f64 {
    BASE_MAX_SPEED * speed_multiplier
}

/// Yaw acceleration at full command (rad/s²).
pub fn angular_acceleration(speed_multiplier: f64) -> f64 {
    BASE_ANGULAR_ACCELERATION * speed_multiplier
}

/// Yaw rate limit (rad/s).
pub fn max_angular_speed(speed_multiplier: f64) -> f64 {
    BASE_MAX_ANGULAR_SPEED * speed_multiplier
}

/// Fraction of velocity retained after `dt` seconds of drag.
pub fn drag_retention(drag_base: f64, dt: f64) -> f64 {
    let drag_coeff = 1.0 - drag_base.powf(dt * REFERENCE_FRAME_RATE_HZ);
    1.0 - drag_coeff
}

/// Surge direction for the given yaw, tilted by camera pitch.
pub fn forward_vector(yaw: f64, pitch: f64) -> DVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    DVec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
}

/// Sway direction (starboard) for the given yaw.
pub fn right_vector(yaw: f64) -> DVec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    DVec3::new(cos_yaw, 0.0, -sin_yaw)
}

/// Advance the vehicle by one frame. `dt` is clamped to `[0, MAX_FRAME_DT]`.
pub fn step(
    state: &mut VehicleState,
    input: &ControlInput,
    dt: f64,
    speed_multiplier: f64,
    params: &IntegratorParams,
) -> StepReport {
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
    let cmd = &input.command;

    // Thrust, one independent impulse per axis.
    let accel = acceleration(speed_multiplier, state.effective_mass());
    let forward = forward_vector(state.yaw, input.camera_pitch);
    let right = right_vector(state.yaw);
    state.velocity += forward * (cmd.surge * accel * dt);
    state.velocity += right * (cmd.sway * accel * dt);
    state.velocity += DVec3::Y * (cmd.heave * accel * dt);

    // Ambient current.
    state.velocity.x += params.current.x * dt * CURRENT_INFLUENCE;
    state.velocity.z += params.current.y * dt * CURRENT_INFLUENCE;

    // Drag, snap, clamp.
    state.velocity *= drag_retention(LINEAR_DRAG_BASE, dt);
    if state.velocity.length() < VELOCITY_EPSILON {
        state.velocity = DVec3::ZERO;
    }
    state.velocity = state.velocity.clamp_length_max(max_speed(speed_multiplier));

    // Angular channel.
    state.angular_velocity_yaw += cmd.yaw * angular_acceleration(speed_multiplier) * dt;
    state.angular_velocity_yaw *= drag_retention(ANGULAR_DRAG_BASE, dt);
    if state.angular_velocity_yaw.abs() < ANGULAR_EPSILON {
        state.angular_velocity_yaw = 0.0;
    }
    let max_rate = max_angular_speed(speed_multiplier);
    state.angular_velocity_yaw = state.angular_velocity_yaw.clamp(-max_rate, max_rate);
    state.yaw = wrap_angle(state.yaw + state.angular_velocity_yaw * dt);

    state.position += state.velocity * dt;

    clamp_to_bounds(state, &params.bounds)
}

/// Inelastic world boundaries: clamp position and zero the velocity
/// component that points further out.
pub fn clamp_to_bounds(state: &mut VehicleState, bounds: &WorldBounds) -> StepReport {
    let mut report = StepReport::default();

    if state.position.y > bounds.ceiling_y {
        state.position.y = bounds.ceiling_y;
        state.velocity.y = state.velocity.y.min(0.0);
        report.hit_ceiling = true;
    } else if state.position.y < bounds.floor_y {
        state.position.y = bounds.floor_y;
        state.velocity.y = state.velocity.y.max(0.0);
        report.hit_floor = true;
    }

    let limit = bounds.half_extent;
    for (pos, vel) in [
        (&mut state.position.x, &mut state.velocity.x),
        (&mut state.position.z, &mut state.velocity.z),
    ] {
        if *pos > limit {
            *pos = limit;
            *vel = vel.min(0.0);
            report.hit_horizontal = true;
        } else if *pos < -limit {
            *pos = -limit;
            *vel = vel.max(0.0);
            report.hit_horizontal = true;
        }
    }

    report
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

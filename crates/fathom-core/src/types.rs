//! Fundamental kinematic and simulation types.
//!
//! World frame: +Y is up, yaw rotates about +Y. At yaw 0 the vehicle
//! faces -Z; positive yaw turns counter-clockwise seen from above.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Mutable kinematic record of the controlled vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// World position (m).
    pub position: DVec3,
    /// World velocity (m/s).
    pub velocity: DVec3,
    /// Heading about +Y (radians).
    pub yaw: f64,
    /// Yaw rate (rad/s).
    pub angular_velocity_yaw: f64,
    /// Dry mass (kg).
    pub mass: f64,
    /// Entrained-water mass (kg).
    pub added_mass: f64,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::spawn(DVec3::ZERO, 0.0)
    }
}

impl VehicleState {
    /// Vehicle at rest with the default hull masses.
    pub fn spawn(position: DVec3, yaw: f64) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            yaw,
            angular_velocity_yaw: 0.0,
            mass: DEFAULT_VEHICLE_MASS,
            added_mass: DEFAULT_ADDED_MASS,
        }
    }

    /// Mass used for all acceleration calculations.
    pub fn effective_mass(&self) -> f64 {
        self.mass + self.added_mass
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Depth below the surface (m, positive downward).
    pub fn depth(&self) -> f64 {
        -self.position.y
    }

    /// Compass heading in degrees, 0 = -Z, increasing clockwise.
    pub fn heading_degrees(&self) -> f64 {
        (-self.yaw).to_degrees().rem_euclid(360.0)
    }

    /// True when every field is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.yaw.is_finite()
            && self.angular_velocity_yaw.is_finite()
    }
}

/// Normalized four-axis thrust command. Every axis lies in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandVector {
    /// Fore (+) / aft (-).
    pub surge: f64,
    /// Right (+) / left (-).
    pub sway: f64,
    /// Up (+) / down (-).
    pub heave: f64,
    /// Counter-clockwise (+) / clockwise (-) seen from above.
    pub yaw: f64,
}

impl CommandVector {
    pub fn new(surge: f64, sway: f64, heave: f64, yaw: f64) -> Self {
        Self {
            surge: clamp_axis(surge),
            sway: clamp_axis(sway),
            heave: clamp_axis(heave),
            yaw: clamp_axis(yaw),
        }
    }

    pub fn surge(value: f64) -> Self {
        Self::new(value, 0.0, 0.0, 0.0)
    }

    pub fn heave(value: f64) -> Self {
        Self::new(0.0, 0.0, value, 0.0)
    }

    pub fn yaw(value: f64) -> Self {
        Self::new(0.0, 0.0, 0.0, value)
    }

    /// Re-clamp all axes (for values that arrived through deserialization).
    pub fn sanitized(self) -> Self {
        Self::new(self.surge, self.sway, self.heave, self.yaw)
    }
}

fn clamp_axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Everything the input collaborator hands the core for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    pub command: CommandVector,
    /// Camera pitch (radians, +up), tilts surge thrust vertically.
    pub camera_pitch: f64,
}

impl ControlInput {
    pub fn new(command: CommandVector, camera_pitch: f64) -> Self {
        let camera_pitch = if camera_pitch.is_finite() {
            camera_pitch.clamp(-MAX_CAMERA_PITCH, MAX_CAMERA_PITCH)
        } else {
            0.0
        };
        Self {
            command: command.sanitized(),
            camera_pitch,
        }
    }
}

/// Hard limits of the operating volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Highest allowed y (m).
    pub ceiling_y: f64,
    /// Lowest allowed y (m).
    pub floor_y: f64,
    /// Allowed |x| and |z| (m).
    pub half_extent: f64,
}

impl WorldBounds {
    /// Bounds for a site with the given seabed depth.
    pub fn for_seabed(seabed_depth: f64, half_extent: f64) -> Self {
        Self {
            ceiling_y: SURFACE_CEILING_Y,
            floor_y: -seabed_depth + SEABED_MARGIN,
            half_extent,
        }
    }
}

/// Ambient water current in the horizontal plane (m/s).
/// `y` maps onto world Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Current {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames.
    pub tick: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector in the direction of `v`, or `None` when `v` is too short
/// (or not finite) to normalize safely.
pub fn normalize_or_none(v: DVec3) -> Option<DVec3> {
    let length = v.length();
    if length.is_finite() && length > NORMALIZE_EPSILON {
        Some(v / length)
    } else {
        None
    }
}

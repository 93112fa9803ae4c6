//! Simulation constants and tuning parameters.

// --- Frame timing ---

/// Reference frame rate the exponential drag bases are expressed against (Hz).
pub const REFERENCE_FRAME_RATE_HZ: f64 = 60.0;

/// Upper bound on a single frame step (seconds).
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Vehicle ---

/// Dry mass of the training ROV (kg).
pub const DEFAULT_VEHICLE_MASS: f64 = 100.0;

/// Added mass from entrained water (kg).
pub const DEFAULT_ADDED_MASS: f64 = 30.0;

/// Combined thruster force along any single axis at speed multiplier 1.0 (N).
/// 1040 N over the default effective mass of 130 kg gives 8 m/s².
pub const THRUST_FORCE: f64 = 1040.0;

/// Maximum linear speed at speed multiplier 1.0 (m/s).
pub const BASE_MAX_SPEED: f64 = 2.0;

/// Yaw acceleration at full yaw command and speed multiplier 1.0 (rad/s²).
pub const BASE_ANGULAR_ACCELERATION: f64 = 10.0;

/// Maximum yaw rate at speed multiplier 1.0 (rad/s).
pub const BASE_MAX_ANGULAR_SPEED: f64 = 1.2;

/// Per-reference-frame velocity retention factor.
pub const LINEAR_DRAG_BASE: f64 = 0.95;

/// Per-reference-frame yaw rate retention factor.
pub const ANGULAR_DRAG_BASE: f64 = 0.90;

/// Speeds below this snap to zero (m/s).
pub const VELOCITY_EPSILON: f64 = 1e-3;

/// Yaw rates below this snap to zero (rad/s).
pub const ANGULAR_EPSILON: f64 = 1e-4;

/// Fraction of ambient current transferred into vehicle velocity per second.
pub const CURRENT_INFLUENCE: f64 = 0.5;

/// Operator speed multiplier range.
pub const MIN_SPEED_MULTIPLIER: f64 = 0.25;
pub const MAX_SPEED_MULTIPLIER: f64 = 20.0;

/// Camera pitch limit that tilts surge thrust (radians).
pub const MAX_CAMERA_PITCH: f64 = 0.8;

// --- World bounds ---

/// Highest allowed vehicle altitude; keeps the ROV just below the surface (m).
pub const SURFACE_CEILING_Y: f64 = -0.5;

/// Minimum clearance above the seabed (m).
pub const SEABED_MARGIN: f64 = 1.0;

/// Default horizontal half-extent of the operating area (m).
pub const DEFAULT_WORLD_HALF_EXTENT: f64 = 500.0;

/// Distance above the seabed floor clamp at which a depth warning fires (m).
pub const DEPTH_WARNING_MARGIN: f64 = 2.0;

// --- Collision: ray probing ---

/// Probe rays shorter than this produce repulsion (m).
pub const PROBE_COLLISION_DISTANCE: f64 = 1.5;

/// Repulsion gain per metre of probe penetration.
pub const PROBE_PUSH_FORCE: f64 = 0.5;

/// Fraction of inbound velocity removed along the probe correction.
pub const PROBE_RESTITUTION: f64 = 0.8;

// --- Collision: discrete shapes ---

/// Effective collision radius of the vehicle hull (m).
pub const VEHICLE_COLLISION_RADIUS: f64 = 1.0;

/// Fixed displacement applied away from an overlapped obstacle (m).
pub const SHAPE_PUSH_STEP: f64 = 0.3;

/// Bounce fraction of the inbound velocity after an obstacle strike.
pub const SHAPE_RESTITUTION: f64 = 0.3;

/// Flat damage per obstacle strike.
pub const IMPACT_DAMAGE_BASE: f64 = 5.0;

/// Additional damage per m/s of impact speed.
pub const IMPACT_DAMAGE_PER_MPS: f64 = 5.0;

/// Minimum interval between damage applications from the same source (s).
pub const DAMAGE_COOLDOWN_SECS: f64 = 0.5;

// --- Collision: corridor ---

/// Extra clearance kept between the hull and the corridor wall (m).
pub const CORRIDOR_MARGIN: f64 = 0.5;

/// Damage per metre of overshoot outside the corridor.
pub const CORRIDOR_DAMAGE_PER_METER: f64 = 10.0;

/// Velocity multiplier applied on corridor exit.
pub const CORRIDOR_VELOCITY_DAMPING: f64 = 0.2;

/// Spline samples generated between consecutive checkpoints.
pub const CORRIDOR_SAMPLES_PER_SEGMENT: usize = 16;

// --- Damage ---

/// Damage at which the mission fails.
pub const MAX_DAMAGE: f64 = 100.0;

/// Damage levels that raise a hull warning.
pub const DAMAGE_WARNING_THRESHOLDS: [f64; 2] = [50.0, 75.0];

// --- Numerics ---

/// Vectors shorter than this are never normalized.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

// --- Event feed ---

/// Maximum number of events retained in the rolling log.
pub const MAX_EVENT_LOG: usize = 50;

//! Omnidirectional proximity probing against registered scene meshes.

use std::f64::consts::FRAC_1_SQRT_2 as D;

use glam::{DQuat, DVec3};

use fathom_core::constants::{PROBE_COLLISION_DISTANCE, PROBE_PUSH_FORCE, PROBE_RESTITUTION};
use fathom_core::types::{normalize_or_none, VehicleState};
use fathom_geometry::SceneGeometry;

use super::response::CollisionResponse;

/// Probe directions in the vehicle's yaw frame.
pub const PROBE_DIRECTIONS: [DVec3; 18] = [
    // Axes
    DVec3::X,
    DVec3::NEG_X,
    DVec3::Y,
    DVec3::NEG_Y,
    DVec3::Z,
    DVec3::NEG_Z,
    // Horizontal diagonals
    DVec3::new(D, 0.0, D),
    DVec3::new(D, 0.0, -D),
    DVec3::new(-D, 0.0, D),
    DVec3::new(-D, 0.0, -D),
    // Vertical-plane diagonals
    DVec3::new(D, D, 0.0),
    DVec3::new(-D, D, 0.0),
    DVec3::new(0.0, D, D),
    DVec3::new(0.0, D, -D),
    DVec3::new(D, -D, 0.0),
    DVec3::new(-D, -D, 0.0),
    DVec3::new(0.0, -D, D),
    DVec3::new(0.0, -D, -D),
];

/// Result of one probe sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeContact {
    pub response: CollisionResponse,
    /// Number of rays that hit inside the probe distance.
    pub rays_hit: usize,
}

/// World-space direction for a probe ray. Pure up/down ignore yaw.
pub fn world_direction(local: DVec3, yaw: f64) -> DVec3 {
    if local.x == 0.0 && local.z == 0.0 {
        local
    } else {
        DQuat::from_rotation_y(yaw) * local
    }
}

/// Cast every probe ray and accumulate a push away from nearby geometry.
/// Returns `None` when nothing is within reach or no geometry is registered.
pub fn detect(vehicle: &VehicleState, geometry: &SceneGeometry) -> Option<ProbeContact> {
    if geometry.is_empty() {
        return None;
    }

    let mut correction = DVec3::ZERO;
    let mut rays_hit = 0;
    for local in PROBE_DIRECTIONS {
        let dir = world_direction(local, vehicle.yaw);
        if let Some(d) = geometry.ray_cast(vehicle.position, dir, PROBE_COLLISION_DISTANCE) {
            if d < PROBE_COLLISION_DISTANCE {
                correction -= dir * (PROBE_COLLISION_DISTANCE - d) * PROBE_PUSH_FORCE;
                rays_hit += 1;
            }
        }
    }

    // Opposing hits can cancel exactly; that is no correction.
    let normal = normalize_or_none(correction)?;
    Some(ProbeContact {
        response: CollisionResponse::push(correction).with_cancel(normal, PROBE_RESTITUTION),
        rays_hit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_geometry::TriangleMesh;

    #[test]
    fn test_probe_directions_are_unit_and_distinct() {
        for (i, a) in PROBE_DIRECTIONS.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < 1e-12, "direction {i} not unit");
            for b in &PROBE_DIRECTIONS[i + 1..] {
                assert!(a.distance(*b) > 1e-6, "duplicate direction {a:?}");
            }
        }
    }

    #[test]
    fn test_vertical_rays_ignore_yaw() {
        let yaw = 1.1;
        assert_eq!(world_direction(DVec3::Y, yaw), DVec3::Y);
        assert_eq!(world_direction(DVec3::NEG_Y, yaw), DVec3::NEG_Y);

        // Local forward (-Z) rotates with yaw the same way the integrator does.
        let forward = world_direction(DVec3::NEG_Z, yaw);
        let expected = DVec3::new(-yaw.sin(), 0.0, -yaw.cos());
        assert!((forward - expected).length() < 1e-12);
    }

    #[test]
    fn test_no_geometry_gives_no_correction() {
        let vehicle = VehicleState::spawn(DVec3::new(0.0, -10.0, 0.0), 0.0);
        assert!(detect(&vehicle, &SceneGeometry::default()).is_none());
    }

    #[test]
    fn test_probe_pushes_away_from_floor() {
        let mut geometry = SceneGeometry::default();
        geometry.add_mesh(TriangleMesh::horizontal_plane(-11.2, 50.0));
        let vehicle = VehicleState::spawn(DVec3::new(3.0, -10.0, -7.0), 0.3);

        let contact = detect(&vehicle, &geometry).expect("floor within reach");
        assert_eq!(contact.rays_hit, 1, "diagonals travel 1.7 m to the floor");
        let push = contact.response.push_vector;
        let expected = (PROBE_COLLISION_DISTANCE - 1.2) * PROBE_PUSH_FORCE;
        assert!((push.y - expected).abs() < 1e-9, "push {push:?}");
        assert!(push.x.abs() < 1e-12 && push.z.abs() < 1e-12);
        assert_eq!(contact.response.velocity_cancel_normal, Some(DVec3::Y));
    }

    #[test]
    fn test_geometry_out_of_reach_gives_no_correction() {
        let mut geometry = SceneGeometry::default();
        geometry.add_mesh(TriangleMesh::horizontal_plane(-20.0, 50.0));
        let vehicle = VehicleState::spawn(DVec3::new(0.0, -10.0, 0.0), 0.0);
        assert!(detect(&vehicle, &geometry).is_none());
    }
}

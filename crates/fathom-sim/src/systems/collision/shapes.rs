//! Discrete-shape overlap against the curated obstacle list.

use glam::DVec3;

use fathom_core::constants::{SHAPE_PUSH_STEP, SHAPE_RESTITUTION, VEHICLE_COLLISION_RADIUS};
use fathom_core::types::{normalize_or_none, VehicleState};
use fathom_geometry::Obstacle;

use super::response::CollisionResponse;

/// First obstacle the vehicle overlaps this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeContact {
    /// Index into the obstacle list.
    pub index: usize,
    /// Sub-box index for compound walls.
    pub sub_box: Option<usize>,
    /// Unit normal pointing from the contact toward the vehicle.
    pub normal: DVec3,
    /// Speed into the contact along the normal, before resolution (m/s).
    pub impact_speed: f64,
    pub response: CollisionResponse,
}

/// Scan obstacles in order and report the first overlap.
///
/// At most one discrete contact is resolved per frame.
pub fn detect(vehicle: &VehicleState, obstacles: &[Obstacle]) -> Option<ShapeContact> {
    obstacles.iter().enumerate().find_map(|(index, obstacle)| {
        let overlap = obstacle.overlap(vehicle.position, VEHICLE_COLLISION_RADIUS)?;
        let normal = contact_normal(vehicle, overlap.anchor, obstacle.center());
        let impact_speed = (-vehicle.velocity.dot(normal)).max(0.0);
        Some(ShapeContact {
            index,
            sub_box: overlap.sub_box,
            normal,
            impact_speed,
            response: CollisionResponse::push(normal * SHAPE_PUSH_STEP)
                .with_cancel(normal, 1.0 + SHAPE_RESTITUTION),
        })
    })
}

/// Direction away from the contact. Falls back to the obstacle center, then
/// against the current velocity, then straight up, so it is never NaN.
fn contact_normal(vehicle: &VehicleState, anchor: DVec3, center: DVec3) -> DVec3 {
    normalize_or_none(vehicle.position - anchor)
        .or_else(|| normalize_or_none(vehicle.position - center))
        .or_else(|| normalize_or_none(-vehicle.velocity))
        .unwrap_or(DVec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at_origin() -> Vec<Obstacle> {
        vec![Obstacle::Sphere {
            center: DVec3::ZERO,
            radius: 2.0,
        }]
    }

    #[test]
    fn test_sphere_boundary_both_sides() {
        let eps = 1e-6;
        let reach = 2.0 + VEHICLE_COLLISION_RADIUS;
        let inside = VehicleState::spawn(DVec3::new(reach - eps, 0.0, 0.0), 0.0);
        let outside = VehicleState::spawn(DVec3::new(reach + eps, 0.0, 0.0), 0.0);

        assert!(detect(&inside, &sphere_at_origin()).is_some());
        assert!(detect(&outside, &sphere_at_origin()).is_none());
    }

    #[test]
    fn test_first_overlap_wins() {
        let obstacles = vec![
            Obstacle::Sphere {
                center: DVec3::new(50.0, 0.0, 0.0),
                radius: 1.0,
            },
            Obstacle::Box {
                center: DVec3::new(0.0, 0.0, -1.5),
                half_extents: DVec3::ONE,
            },
            Obstacle::Sphere {
                center: DVec3::ZERO,
                radius: 2.0,
            },
        ];
        let vehicle = VehicleState::spawn(DVec3::ZERO, 0.0);
        let contact = detect(&vehicle, &obstacles).expect("overlap");
        assert_eq!(contact.index, 1);
    }

    #[test]
    fn test_contact_reflects_inbound_velocity() {
        let mut vehicle = VehicleState::spawn(DVec3::new(2.5, 0.0, 0.0), 0.0);
        vehicle.velocity = DVec3::new(-1.0, 0.0, 0.5);

        let contact = detect(&vehicle, &sphere_at_origin()).expect("overlap");
        assert!((contact.normal - DVec3::X).length() < 1e-12);
        assert!((contact.impact_speed - 1.0).abs() < 1e-12);

        super::super::response::resolve(&mut vehicle, &contact.response);
        assert!((vehicle.position.x - (2.5 + SHAPE_PUSH_STEP)).abs() < 1e-12);
        assert!(
            (vehicle.velocity.x - SHAPE_RESTITUTION).abs() < 1e-12,
            "inbound component reflected by restitution"
        );
        assert_eq!(vehicle.velocity.z, 0.5, "tangential component kept");
    }

    #[test]
    fn test_normal_at_center_is_finite() {
        let mut vehicle = VehicleState::spawn(DVec3::ZERO, 0.0);
        vehicle.velocity = DVec3::ZERO;
        let contact = detect(&vehicle, &sphere_at_origin()).expect("overlap");
        assert_eq!(contact.normal, DVec3::Y);
        assert!(contact.response.push_vector.is_finite());
    }

    #[test]
    fn test_compound_wall_reports_sub_box() {
        let wall = fathom_geometry::shapes::wall_with_openings(
            DVec3::new(0.0, -10.0, -20.0),
            10.0,
            5.0,
            0.5,
            &[(0.0, 0.0, 2.0, 2.0)],
        );
        let obstacles = vec![wall];

        let through_opening = VehicleState::spawn(DVec3::new(0.0, -10.0, -20.0), 0.0);
        assert!(detect(&through_opening, &obstacles).is_none());

        let into_wall = VehicleState::spawn(DVec3::new(6.0, -10.0, -20.2), 0.0);
        let contact = detect(&into_wall, &obstacles).expect("hits a solid block");
        assert!(contact.sub_box.is_some());
    }
}
